//! 页范围文本提取服务 - 业务能力层
//!
//! 只负责把连续若干页的文本拼成一个规范化字符串

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::AppResult;
use crate::infrastructure::DocumentAccessor;
use crate::models::PageRange;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("空白正则无效"));

/// 提取 `[start, end]`（1-based，闭区间）的文本
///
/// - 同一页的片段以单个空格连接，页与页之间再补一个空格
/// - 最后压缩连续空白并去掉首尾空白
/// - `end < start` 时返回空字符串；区间会被裁剪到 `[1, num_pages]`
///
/// 页面读取失败直接返回错误，不用空文本代替
pub async fn extract_range_text<D: DocumentAccessor>(
    doc: &D,
    start: u32,
    end: u32,
) -> AppResult<String> {
    let start = start.max(1);
    let end = end.min(doc.num_pages());
    if end < start {
        debug!("页范围 {}-{} 为空，跳过", start, end);
        return Ok(String::new());
    }

    let mut text = String::new();
    for page_number in start..=end {
        let items = doc.page_text(page_number).await?;
        text.push_str(&items.join(" "));
        text.push(' ');
    }

    debug!("📄 读取第 {}-{} 页，共 {} 字符", start, end, text.len());
    Ok(normalize_whitespace(&text))
}

/// 按 `PageRange` 提取
pub async fn extract_page_range<D: DocumentAccessor>(
    doc: &D,
    range: PageRange,
) -> AppResult<String> {
    extract_range_text(doc, range.start, range.end).await
}

/// 连续两个及以上空白压缩为一个空格，并去掉首尾空白
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}
