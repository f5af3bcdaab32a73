//! 题目解析服务 - 业务能力层
//!
//! 把"Exam Questions"小节的文本切成题目块，再逐块解析

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::models::{Choices, MCQuestion};
use crate::services::text_extractor::normalize_whitespace;

static CHAPTER_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Chapter\s+\d+\s+exam\s+questions?").expect("章节页眉正则无效")
});

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Exam Questions").expect("小节页眉正则无效"));

/// 页脚进度标记，如 `you are here ► 87`
pub(crate) static PAGE_FOOTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)you are here\s*[^\s\d]?\s*\d+").expect("页脚正则无效")
});

/// 题号候选：`12.` 形式，前面是文本开头或空白，后面是空白
static NUMBER_DOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,3}\.").expect("题号正则无效"));

/// 题号 + 题干 + 选项 A-C + `D.` 标记；选项 D 的内容到下一个题号为止
static QUESTION_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)^(\d{1,3})\.\s+(.*?)\s+A[.)]\s+(.*?)\s+B[.)]\s+(.*?)\s+C[.)]\s+(.*?)\s+D[.)]\s+",
    )
    .expect("题目正则无效")
});

/// 解析题目小节文本
///
/// 题号原样保留，不要求连续；不符合"题号 + 题干 + 四个选项"格式的题目直接丢弃。
/// 题干和选项 A-C 里的 `100.` 之类不会截断题目，只有选项 D 之后的题号才开始下一题
pub fn parse_exam_questions(text: &str) -> Vec<MCQuestion> {
    let cleaned = clean_question_text(text);
    let tokens = number_tokens(&cleaned);

    let mut questions = Vec::new();
    let mut index = 0;
    while index < tokens.len() {
        match match_question(&cleaned, &tokens, index) {
            Some((question, next)) => {
                questions.push(question);
                index = next;
            }
            None => index += 1,
        }
    }

    debug!("解析出 {} 道题目", questions.len());
    questions
}

fn clean_question_text(text: &str) -> String {
    let text = CHAPTER_HEADER.replace(text, "");
    let text = SECTION_HEADER.replace_all(&text, "");
    let text = PAGE_FOOTER.replace_all(&text, "");
    normalize_whitespace(&text)
}

/// 所有题号候选的起始位置，相邻的题号（如 `2. 3.`）都会被识别
fn number_tokens(text: &str) -> Vec<usize> {
    NUMBER_DOT
        .find_iter(text)
        .filter(|m| {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            before.map_or(true, char::is_whitespace) && after.is_some_and(char::is_whitespace)
        })
        .map(|m| m.start())
        .collect()
}

/// 从第 `index` 个题号开始匹配一道题
///
/// # 返回
/// 题目，以及下一道题的题号下标（没有时为 `tokens.len()`）
fn match_question(text: &str, tokens: &[usize], index: usize) -> Option<(MCQuestion, usize)> {
    let start = tokens[index];
    let caps = QUESTION_HEAD.captures(&text[start..])?;
    let head_end = start + caps.get(0)?.end();
    let choices_start = start + caps.get(3)?.start();

    // 选项 A-C 里包含另一道题的完整开头，说明当前题目缺选项
    let truncated = tokens[index + 1..]
        .iter()
        .take_while(|&&token| token < head_end)
        .filter(|&&token| token >= choices_start)
        .any(|&token| {
            QUESTION_HEAD
                .find(&text[token..])
                .is_some_and(|m| token + m.end() <= head_end)
        });
    if truncated {
        return None;
    }

    let next = tokens[index + 1..]
        .iter()
        .position(|&token| token > head_end)
        .map_or(tokens.len(), |offset| index + 1 + offset);
    let end = tokens.get(next).copied().unwrap_or(text.len());

    let number = caps[1].parse::<u32>().ok()?;
    let choices = Choices::new(
        caps[3].trim(),
        caps[4].trim(),
        caps[5].trim(),
        text[head_end..end].trim(),
    );
    Some((MCQuestion::new(number, caps[2].trim(), choices), next))
}
