//! 答案解析服务 - 业务能力层
//!
//! 把"Exam Answers"小节的文本解析为 题号 → 答案

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::models::{AnswerMap, ChoiceLetter, MCAnswer};
use crate::services::question_parser::PAGE_FOOTER;
use crate::services::text_extractor::normalize_whitespace;

static CHAPTER_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Chapter\s+\d+\s+exam\s+answers?").expect("章节页眉正则无效")
});

static SECTION_HEADERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Exam Questions\s+Answers|Exam Answers").expect("小节页眉正则无效")
});

static ANSWER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(\d{1,3})\.\s+Answer\b").expect("答案标记正则无效"));

static ANSWER_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(\d{1,3})\.\s+Answer:\s+([A-D])(?:\s+(.*))?$").expect("答案块正则无效")
});

/// 解析答案小节文本
///
/// 同一题号出现多次时后出现的覆盖前面的；没有匹配时返回空表
pub fn parse_exam_answers(text: &str) -> AnswerMap {
    let cleaned = clean_answer_text(text);

    let mut answers = AnswerMap::new();
    for (number, answer) in split_blocks(&cleaned)
        .into_iter()
        .filter_map(parse_answer_block)
    {
        answers.insert(number, answer);
    }

    debug!("解析出 {} 条答案", answers.len());
    answers
}

fn clean_answer_text(text: &str) -> String {
    let text = CHAPTER_HEADER.replace(text, "");
    let text = SECTION_HEADERS.replace_all(&text, "");
    let text = PAGE_FOOTER.replace_all(&text, "");
    normalize_whitespace(&text)
}

fn parse_answer_block(block: &str) -> Option<(u32, MCAnswer)> {
    let caps = ANSWER_BLOCK.captures(block)?;
    let number = caps[1].parse::<u32>().ok()?;
    let letter = ChoiceLetter::from_letter(&caps[2])?;
    let explanation = caps.get(3).map_or("", |m| m.as_str().trim());
    Some((number, MCAnswer::new(letter, explanation)))
}

/// 按 `N. Answer` 标记把文本切块
///
/// 每块从标记起到下一个标记前（或文本末尾）为止，首个标记之前的文本忽略
fn split_blocks(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = ANSWER_TOKEN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.start()))
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            text[start..end].trim()
        })
        .collect()
}
