//! 文档访问接口 - 基础设施层
//!
//! 解码器只通过这个 trait 暴露能力，流程层不认识具体的 PDF 库

use crate::error::AppResult;
use crate::models::{OutlineNode, PageRef};

/// 文档访问器
///
/// 职责：
/// - 提供目录树、命名目标解析、页索引换算、按页取文本
/// - 只读，一次提取过程中不会被修改
/// - 不认识 Question / Answer
#[allow(async_fn_in_trait)]
pub trait DocumentAccessor {
    /// 目录（书签）树，没有目录时返回空列表
    async fn outline(&self) -> AppResult<Vec<OutlineNode>>;

    /// 把命名目标解析为具体页面引用
    async fn destination(&self, name: &str) -> AppResult<Option<PageRef>>;

    /// 页面引用 → 0-based 页索引
    async fn page_index(&self, reference: &PageRef) -> AppResult<u32>;

    /// 第 `page_number` 页（1-based）的文本片段，按版面顺序
    async fn page_text(&self, page_number: u32) -> AppResult<Vec<String>>;

    /// 总页数
    fn num_pages(&self) -> u32;
}
