//! 章节考题提取流程 - 流程层
//!
//! 核心职责：定义"一个章节"的完整提取流程
//!
//! 流程顺序：
//! 1. 目录中定位章节 → 找到 Exam Questions / Exam Answers 小节
//! 2. 书签目标 → 起始页；下一个书签的起始页 - 1 → 结束页
//! 3. 并发读取两个页范围的文本
//! 4. 解析题目、解析答案、合并

use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{DocumentAccessor, LopdfDocument};
use crate::models::{
    ChapterExam, ChapterSelector, Destination, Notice, OutlineNode, PageRange, SectionKind,
};
use crate::services::{
    extract_page_range, find_chapter, find_section, following_destinations, merge_qna,
    next_sibling_destination, parse_exam_answers, parse_exam_questions, resolve_optional_page,
    resolve_page,
};
use crate::utils::truncate_text;

/// 章节考题提取流程
///
/// - 编排导航、页范围计算、文本读取、解析、合并
/// - 不持有文档，每次调用传入
/// - 只有"章节不存在"和页面读取失败会返回错误，其余情况记为 `Notice`
#[derive(Debug, Clone, Default)]
pub struct ChapterExamFlow {
    verbose_logging: bool,
}

impl ChapterExamFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            verbose_logging: config.verbose_logging,
        }
    }

    pub async fn run<D: DocumentAccessor>(
        &self,
        doc: &D,
        selector: &ChapterSelector,
    ) -> AppResult<ChapterExam> {
        let outline = doc.outline().await?;
        if outline.is_empty() {
            warn!("⚠️ 文档没有目录（书签）");
        }

        let chapter = find_chapter(&outline, selector)
            .ok_or_else(|| AppError::chapter_not_found(selector.to_string()))?;
        let chapter_title = chapter.title.trim().to_string();
        info!("✓ 找到章节: {}", chapter_title);

        let mut notices = Vec::new();
        let questions_node = find_section(chapter, SectionKind::Questions);
        let answers_node = find_section(chapter, SectionKind::Answers);

        let (Some(questions_node), Some(answers_node)) = (questions_node, answers_node) else {
            for (node, section) in [
                (questions_node, SectionKind::Questions),
                (answers_node, SectionKind::Answers),
            ] {
                if node.is_none() {
                    warn!("⚠️ {} 缺少小节: {}", chapter_title, section);
                    notices.push(Notice::SectionMissing { section });
                }
            }
            return Ok(ChapterExam::empty(chapter_title, notices));
        };

        let question_range = self
            .section_range(
                doc,
                &outline,
                chapter,
                questions_node,
                SectionKind::Questions,
                &mut notices,
            )
            .await;
        let answer_range = self
            .section_range(
                doc,
                &outline,
                chapter,
                answers_node,
                SectionKind::Answers,
                &mut notices,
            )
            .await;

        // 两个范围互不依赖，并发读取
        let (question_text, answer_text) = futures::future::try_join(
            read_range(doc, question_range),
            read_range(doc, answer_range),
        )
        .await?;

        if self.verbose_logging {
            debug!("题目文本: {}", truncate_text(&question_text, 120));
            debug!("答案文本: {}", truncate_text(&answer_text, 120));
        }

        let questions = parse_exam_questions(&question_text);
        let answers = parse_exam_answers(&answer_text);
        info!(
            "📝 {} 解析结果: 题目 {} 道, 答案 {} 条",
            chapter_title,
            questions.len(),
            answers.len()
        );

        if questions.is_empty() {
            notices.push(Notice::NoQuestionsParsed);
        }

        Ok(ChapterExam {
            chapter_title,
            questions: merge_qna(&questions, &answers),
            notices,
        })
    }

    /// 计算小节页范围
    ///
    /// 结束页取紧随其后的兄弟书签（没有则取目录中下一个书签）的起始页 - 1；
    /// 该书签无法解析时依次尝试目录中更靠后的书签。
    /// 后面没有任何书签时取文档最后一页，有书签但都无法解析时跳过该小节
    async fn section_range<D: DocumentAccessor>(
        &self,
        doc: &D,
        outline: &[OutlineNode],
        chapter: &OutlineNode,
        node: &OutlineNode,
        section: SectionKind,
        notices: &mut Vec<Notice>,
    ) -> Option<PageRange> {
        let Some(start) = resolve_optional_page(doc, node.destination.as_ref()).await else {
            warn!("⚠️ 无法确定 {} 的起始页，跳过", section);
            notices.push(Notice::DestinationUnresolved { section });
            return None;
        };

        let mut boundaries: Vec<&Destination> = next_sibling_destination(node, &chapter.children)
            .into_iter()
            .chain(following_destinations(outline, node))
            .collect();
        boundaries.dedup_by(|a, b| std::ptr::eq(*a, *b));

        let end = if boundaries.is_empty() {
            doc.num_pages()
        } else {
            match resolve_first(doc, &boundaries).await {
                Some(next_start) => next_start.saturating_sub(1),
                None => {
                    warn!("⚠️ {} 之后的书签都无法解析，无法确定结束页，跳过", section);
                    notices.push(Notice::BoundaryUnresolved { section });
                    return None;
                }
            }
        };

        match PageRange::new(start, end) {
            Some(range) => {
                debug!("{} 页范围: {} (共 {} 页)", section, range, range.page_count());
                Some(range)
            }
            None => {
                warn!("⚠️ {} 页范围为空: {} > {}", section, start, end);
                notices.push(Notice::EmptyPageRange {
                    section,
                    start,
                    end,
                });
                None
            }
        }
    }
}

/// 按顺序解析候选书签，返回第一个能解析出的页码
async fn resolve_first<D: DocumentAccessor>(
    doc: &D,
    boundaries: &[&Destination],
) -> Option<u32> {
    for destination in boundaries {
        if let Some(page) = resolve_page(doc, destination).await {
            return Some(page);
        }
    }
    None
}

async fn read_range<D: DocumentAccessor>(doc: &D, range: Option<PageRange>) -> AppResult<String> {
    match range {
        Some(range) => extract_page_range(doc, range).await,
        None => Ok(String::new()),
    }
}

/// 从已打开的文档中提取一个章节的考题
pub async fn extract_chapter_exam_content<D: DocumentAccessor>(
    doc: &D,
    chapter: impl Into<ChapterSelector>,
) -> AppResult<ChapterExam> {
    ChapterExamFlow::default().run(doc, &chapter.into()).await
}

/// 打开 PDF 并提取一个章节的考题
pub async fn extract_chapter_exam_content_from_path(
    path: impl AsRef<Path>,
    chapter: impl Into<ChapterSelector>,
) -> AppResult<ChapterExam> {
    let doc = LopdfDocument::load(path.as_ref())?;
    extract_chapter_exam_content(&doc, chapter).await
}
