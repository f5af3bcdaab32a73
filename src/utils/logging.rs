/// 日志工具模块
///
/// 提供日志初始化以及格式化输出的辅助函数
use crate::models::ChapterExam;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；未设置时默认 `info`，开启详细日志时为 `debug`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 重复初始化（例如测试中）直接忽略
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `pdf_path`: 文档路径
/// - `chapter_count`: 待处理章节数
pub fn log_startup(pdf_path: &str, chapter_count: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 章节考题提取");
    info!("📄 文档: {}", pdf_path);
    info!("📊 待处理章节数: {}", chapter_count);
    info!("{}", "=".repeat(60));
}

/// 记录章节开始信息
pub fn log_chapter_start(index: usize, total: usize, chapter: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📦 开始处理第 {}/{} 个章节: {}", index, total, chapter);
}

/// 记录章节完成信息
pub fn log_chapter_complete(exam: &ChapterExam) {
    info!(
        "✓ {} 完成: 题目 {} 道, 含答案 {} 道",
        exam.chapter_title,
        exam.questions.len(),
        exam.answered_count()
    );
    for notice in &exam.notices {
        info!("  ⚠️ {}", notice);
    }
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `total`: 总数
/// - `total_questions`: 共提取的题目数量
pub fn print_final_stats(success: usize, failed: usize, total: usize, total_questions: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("📝 题目总数: {}", total_questions);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
