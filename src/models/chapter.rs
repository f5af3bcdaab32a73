use serde::{Deserialize, Serialize};
use std::fmt;

use super::question::MCQuestion;

/// 1-based 闭区间页范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    /// `start` 为 0 或 `end < start` 时不构成区间
    pub fn new(start: u32, end: u32) -> Option<Self> {
        if start == 0 || end < start {
            return None;
        }
        Some(Self { start, end })
    }

    pub fn page_count(&self) -> u32 {
        self.end - self.start + 1
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// 章节下的考试小节
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Questions,
    Answers,
}

impl SectionKind {
    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Questions => "Exam Questions",
            SectionKind::Answers => "Exam Answers",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 要提取的章节：按完整标题或按章节号
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterSelector {
    Title(String),
    Number(u32),
}

impl ChapterSelector {
    /// 纯数字视为章节号，其余视为标题
    pub fn parse(entry: &str) -> Self {
        let trimmed = entry.trim();
        match trimmed.parse::<u32>() {
            Ok(number) if trimmed.chars().all(|c| c.is_ascii_digit()) => {
                ChapterSelector::Number(number)
            }
            _ => ChapterSelector::Title(trimmed.to_string()),
        }
    }
}

impl From<&str> for ChapterSelector {
    fn from(title: &str) -> Self {
        ChapterSelector::Title(title.to_string())
    }
}

impl From<u32> for ChapterSelector {
    fn from(number: u32) -> Self {
        ChapterSelector::Number(number)
    }
}

impl fmt::Display for ChapterSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChapterSelector::Title(title) => f.write_str(title),
            ChapterSelector::Number(number) => write!(f, "Chapter {}", number),
        }
    }
}

/// 提取过程中产生的非致命提示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// 章节下缺少考试小节
    SectionMissing { section: SectionKind },
    /// 小节书签无法解析为页码
    DestinationUnresolved { section: SectionKind },
    /// 小节之后的书签都无法解析为页码，无法确定结束页
    BoundaryUnresolved { section: SectionKind },
    /// 计算出的页范围为空
    EmptyPageRange {
        section: SectionKind,
        start: u32,
        end: u32,
    },
    /// 文本中没有识别出任何题目
    NoQuestionsParsed,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::SectionMissing { section } => write!(f, "缺少小节: {}", section),
            Notice::DestinationUnresolved { section } => {
                write!(f, "无法解析小节书签目标: {}", section)
            }
            Notice::BoundaryUnresolved { section } => {
                write!(f, "无法确定小节结束页: {}", section)
            }
            Notice::EmptyPageRange {
                section,
                start,
                end,
            } => write!(f, "小节 {} 页范围为空 ({} > {})", section, start, end),
            Notice::NoQuestionsParsed => write!(f, "未识别出任何题目"),
        }
    }
}

/// 单个章节的提取结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterExam {
    pub chapter_title: String,
    pub questions: Vec<MCQuestion>,
    #[serde(default)]
    pub notices: Vec<Notice>,
}

impl ChapterExam {
    pub fn empty(chapter_title: impl Into<String>, notices: Vec<Notice>) -> Self {
        Self {
            chapter_title: chapter_title.into(),
            questions: Vec::new(),
            notices,
        }
    }

    pub fn answered_count(&self) -> usize {
        self.questions.iter().filter(|q| q.answer.is_some()).count()
    }
}
