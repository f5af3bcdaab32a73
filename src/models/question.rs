use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 选项字母，只支持 A-D 四个
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChoiceLetter {
    A,
    B,
    C,
    D,
}

impl ChoiceLetter {
    /// 从单个字母解析，大小写敏感
    pub fn from_letter(s: &str) -> Option<Self> {
        match s {
            "A" => Some(ChoiceLetter::A),
            "B" => Some(ChoiceLetter::B),
            "C" => Some(ChoiceLetter::C),
            "D" => Some(ChoiceLetter::D),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChoiceLetter::A => "A",
            ChoiceLetter::B => "B",
            ChoiceLetter::C => "C",
            ChoiceLetter::D => "D",
        }
    }
}

impl fmt::Display for ChoiceLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 四个选项的文本
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choices {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

impl Choices {
    pub fn new(
        a: impl Into<String>,
        b: impl Into<String>,
        c: impl Into<String>,
        d: impl Into<String>,
    ) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
            d: d.into(),
        }
    }
}

/// 答案及解析
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MCAnswer {
    pub correct_choice: ChoiceLetter,
    pub explanation: String,
}

impl MCAnswer {
    pub fn new(correct_choice: ChoiceLetter, explanation: impl Into<String>) -> Self {
        Self {
            correct_choice,
            explanation: explanation.into(),
        }
    }
}

/// 单选题
///
/// `answer` 只由合并步骤填入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MCQuestion {
    pub question_number: u32,
    pub question_text: String,
    pub choices: Choices,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<MCAnswer>,
}

impl MCQuestion {
    pub fn new(question_number: u32, question_text: impl Into<String>, choices: Choices) -> Self {
        Self {
            question_number,
            question_text: question_text.into(),
            choices,
            answer: None,
        }
    }
}

/// 题号 → 答案，仅在合并前使用
pub type AnswerMap = BTreeMap<u32, MCAnswer>;
