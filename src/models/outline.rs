//! 书签（目录）树数据结构
//!
//! 一次加载生成，之后只读，不存在环

use serde::{Deserialize, Serialize};
use std::fmt;

/// 页面引用
///
/// 文档解码器给出的"具体页面位置"，本身不是页码，需要通过 `page_index` 换算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageRef {
    /// 间接对象引用 (对象号, 代号)
    Object { id: u32, generation: u16 },
    /// 显式的 0-based 页索引
    Index(u32),
}

impl PageRef {
    pub fn object(id: u32, generation: u16) -> Self {
        PageRef::Object { id, generation }
    }
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageRef::Object { id, generation } => write!(f, "{} {} R", id, generation),
            PageRef::Index(index) => write!(f, "#{}", index),
        }
    }
}

/// 书签目标
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    /// 直接指向页面
    Direct(PageRef),
    /// 命名目标，需要文档再解析一次
    Named(String),
}

impl Destination {
    pub fn named(name: impl Into<String>) -> Self {
        Destination::Named(name.into())
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Direct(page_ref) => write!(f, "{}", page_ref),
            Destination::Named(name) => write!(f, "/{}", name),
        }
    }
}

/// 书签节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Destination>,
    #[serde(default)]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// 创建没有目标的分组节点
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            destination: None,
            children: Vec::new(),
        }
    }

    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn with_children(mut self, children: Vec<OutlineNode>) -> Self {
        self.children = children;
        self
    }

    /// 标题是否（去掉首尾空白后）与目标一致
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.trim() == title.trim()
    }
}
