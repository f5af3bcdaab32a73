//! 内存文档
//!
//! 已经拿到目录和页面文本时直接使用，测试也依赖它

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::error::{AppError, AppResult, DocumentError};
use crate::infrastructure::DocumentAccessor;
use crate::models::{OutlineNode, PageRef};

/// 内存中的文档
#[derive(Debug, Default)]
pub struct MemoryDocument {
    outline: Vec<OutlineNode>,
    named_destinations: HashMap<String, PageRef>,
    page_objects: HashMap<(u32, u16), u32>,
    pages: Vec<Vec<String>>,
    failing_pages: HashSet<u32>,
    fetched_pages: Mutex<Vec<u32>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outline(mut self, outline: Vec<OutlineNode>) -> Self {
        self.outline = outline;
        self
    }

    /// 追加一页，参数为该页的文本片段
    pub fn with_page<S: Into<String>>(mut self, items: impl IntoIterator<Item = S>) -> Self {
        self.pages.push(items.into_iter().map(Into::into).collect());
        self
    }

    /// 追加 `count` 个空白页面
    pub fn with_blank_pages(mut self, count: usize) -> Self {
        self.pages.extend(std::iter::repeat_with(Vec::new).take(count));
        self
    }

    pub fn with_named_destination(mut self, name: impl Into<String>, reference: PageRef) -> Self {
        self.named_destinations.insert(name.into(), reference);
        self
    }

    /// 登记页面对象 (id, generation) 对应的 0-based 索引
    pub fn with_page_object(mut self, id: u32, generation: u16, index: u32) -> Self {
        self.page_objects.insert((id, generation), index);
        self
    }

    /// 读取该页（1-based）时返回错误
    pub fn with_failing_page(mut self, page_number: u32) -> Self {
        self.failing_pages.insert(page_number);
        self
    }

    /// 按调用顺序记录的已读取页码
    pub fn fetched_pages(&self) -> Vec<u32> {
        self.fetched_pages
            .lock()
            .map(|pages| pages.clone())
            .unwrap_or_default()
    }
}

impl DocumentAccessor for MemoryDocument {
    async fn outline(&self) -> AppResult<Vec<OutlineNode>> {
        Ok(self.outline.clone())
    }

    async fn destination(&self, name: &str) -> AppResult<Option<PageRef>> {
        Ok(self.named_destinations.get(name).copied())
    }

    async fn page_index(&self, reference: &PageRef) -> AppResult<u32> {
        let index = match reference {
            PageRef::Object { id, generation } => self.page_objects.get(&(*id, *generation)).copied(),
            PageRef::Index(index) => Some(*index),
        };

        match index {
            Some(index) if index < self.num_pages() => Ok(index),
            _ => Err(DocumentError::InvalidPageRef {
                reference: reference.to_string(),
            }
            .into()),
        }
    }

    async fn page_text(&self, page_number: u32) -> AppResult<Vec<String>> {
        if let Ok(mut fetched) = self.fetched_pages.lock() {
            fetched.push(page_number);
        }

        if self.failing_pages.contains(&page_number) {
            return Err(AppError::page_fetch_failed(
                page_number,
                std::io::Error::new(std::io::ErrorKind::Other, "页面读取失败"),
            ));
        }

        match page_number.checked_sub(1).and_then(|i| self.pages.get(i as usize)) {
            Some(items) => Ok(items.clone()),
            None => Err(DocumentError::PageOutOfRange {
                page: page_number,
                num_pages: self.num_pages(),
            }
            .into()),
        }
    }

    fn num_pages(&self) -> u32 {
        self.pages.len() as u32
    }
}
