//! 单个章节处理器 - 编排层
//!
//! ## 职责
//!
//! 运行一个章节的提取流程，并把结果写入题库文件。
//!
//! ## 核心功能
//!
//! 1. **流程调度**：调用 `ChapterExamFlow`
//! 2. **结果落盘**：通过 `BankWriter` 写入
//! 3. **日志输出**：章节开始/完成信息

use std::path::PathBuf;
use tracing::info;

use crate::error::AppResult;
use crate::infrastructure::DocumentAccessor;
use crate::models::{ChapterExam, ChapterSelector};
use crate::services::BankWriter;
use crate::utils::logging::{log_chapter_complete, log_chapter_start};
use crate::workflow::ChapterExamFlow;

/// 单个章节的处理结果
#[derive(Debug)]
pub struct ChapterOutcome {
    pub exam: ChapterExam,
    pub output_path: PathBuf,
}

/// 处理单个章节
///
/// # 参数
/// - `doc`: 已打开的文档
/// - `flow`: 提取流程（可复用）
/// - `writer`: 题库写入服务
/// - `selector`: 要处理的章节
/// - `index` / `total`: 章节序号（用于日志）
///
/// # 返回
/// 章节不存在、页面读取失败或写入失败时返回错误
pub async fn process_chapter<D: DocumentAccessor>(
    doc: &D,
    flow: &ChapterExamFlow,
    writer: &BankWriter,
    selector: &ChapterSelector,
    index: usize,
    total: usize,
) -> AppResult<ChapterOutcome> {
    log_chapter_start(index, total, &selector.to_string());

    let exam = flow.run(doc, selector).await?;
    log_chapter_complete(&exam);

    let output_path = writer.write(&exam).await?;
    info!("💾 已保存: {}", output_path.display());

    Ok(ChapterOutcome { exam, output_path })
}
