//! 批量章节处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责文档资源和批量章节的处理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、打开文档、创建写入服务
//! 2. **目录列表**：输出文档顶层目录
//! 3. **逐章处理**：委托 chapter_processor 处理单个章节
//! 4. **全局统计**：汇总所有章节的处理结果
//!
//! 单个章节失败只记录并计数，不会中断整批

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{DocumentAccessor, LopdfDocument};
use crate::models::ChapterSelector;
use crate::orchestrator::chapter_processor;
use crate::services::BankWriter;
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow::ChapterExamFlow;

/// 应用主结构
pub struct App {
    config: Config,
    document: LopdfDocument,
    writer: BankWriter,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate().context("配置校验失败")?;

        let selectors = config.chapter_selectors();
        log_startup(&config.pdf_path, selectors.len());

        let document = LopdfDocument::load(&config.pdf_path)
            .with_context(|| format!("无法打开文档: {}", config.pdf_path))?;
        info!("✓ 文档已加载，共 {} 页", document.num_pages());

        let writer = BankWriter::from_config(&config);
        info!("✓ 题库输出目录: {}", writer.output_dir().display());

        Ok(Self {
            config,
            document,
            writer,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<BatchStats> {
        let toc = list_table_of_contents(&self.document)
            .await
            .context("读取目录失败")?;
        if toc.is_empty() {
            warn!("⚠️ 文档中没有目录（书签），无法定位章节");
        }

        let flow = ChapterExamFlow::new(&self.config);
        let selectors = self.config.chapter_selectors();
        let stats = process_chapters(&self.document, &flow, &self.writer, &selectors).await;

        print_final_stats(stats.success, stats.failed, stats.total, stats.questions);
        Ok(stats)
    }
}

/// 批量处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
    /// 成功章节中提取出的题目总数
    pub questions: usize,
}

/// 依次处理所有章节
pub async fn process_chapters<D: DocumentAccessor>(
    doc: &D,
    flow: &ChapterExamFlow,
    writer: &BankWriter,
    selectors: &[ChapterSelector],
) -> BatchStats {
    let total = selectors.len();
    let mut stats = BatchStats {
        total,
        ..Default::default()
    };

    for (idx, selector) in selectors.iter().enumerate() {
        let index = idx + 1;
        match chapter_processor::process_chapter(doc, flow, writer, selector, index, total).await {
            Ok(outcome) => {
                stats.success += 1;
                stats.questions += outcome.exam.questions.len();
            }
            Err(e) if e.is_chapter_not_found() => {
                warn!("[章节 {}] ⚠️ {}", index, e);
                stats.failed += 1;
            }
            Err(e) => {
                error!("[章节 {}] ❌ 处理过程中发生错误: {}", index, e);
                stats.failed += 1;
            }
        }
    }

    stats
}

/// 文档顶层目录标题
///
/// 同时按 `序号. 标题` 输出到日志
pub async fn list_table_of_contents<D: DocumentAccessor>(doc: &D) -> AppResult<Vec<String>> {
    let outline = doc.outline().await?;
    if outline.is_empty() {
        return Ok(Vec::new());
    }

    info!("✓ 目录中共有 {} 个顶层条目:", outline.len());
    let titles: Vec<String> = outline.into_iter().map(|node| node.title).collect();
    for (index, title) in titles.iter().enumerate() {
        info!("{}. {}", index + 1, title);
    }
    Ok(titles)
}
