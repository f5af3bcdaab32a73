//! 目录导航服务 - 业务能力层
//!
//! 只负责在书签树里"找节点"，不读取页面

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{ChapterSelector, Destination, OutlineNode, SectionKind};

static QUESTIONS_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bexam\s+questions?\b").expect("题目小节正则无效"));

static ANSWERS_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bexam\s+(?:questions?\s+)?answers?\b").expect("答案小节正则无效"));

static CHAPTER_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:chapter)\s+(\d+)").expect("章节号正则无效"));

/// 深度优先（先序）查找标题匹配的第一个节点
///
/// 标题去掉首尾空白后大小写敏感比较
pub fn find_node<'a>(tree: &'a [OutlineNode], title: &str) -> Option<&'a OutlineNode> {
    find_first(tree, &|node: &OutlineNode| node.title_matches(title))
}

/// 按选择器查找章节节点
///
/// `Number(n)` 匹配标题以 `Chapter n` 开头的第一个节点（如 `Chapter 3: Scope`）
pub fn find_chapter<'a>(
    tree: &'a [OutlineNode],
    selector: &ChapterSelector,
) -> Option<&'a OutlineNode> {
    match selector {
        ChapterSelector::Title(title) => find_node(tree, title),
        ChapterSelector::Number(number) => find_first(tree, &|node: &OutlineNode| {
            CHAPTER_NUMBER
                .captures(node.title.trim())
                .and_then(|caps| caps[1].parse::<u32>().ok())
                == Some(*number)
        }),
    }
}

/// 在章节的直接子节点中查找考试小节，不递归
///
/// `Exam Questions Answers` 属于答案小节，不会被当作题目小节
pub fn find_section(node: &OutlineNode, kind: SectionKind) -> Option<&OutlineNode> {
    node.children.iter().find(|child| {
        let title = child.title.trim();
        match kind {
            SectionKind::Questions => {
                QUESTIONS_SECTION.is_match(title) && !ANSWERS_SECTION.is_match(title)
            }
            SectionKind::Answers => ANSWERS_SECTION.is_match(title),
        }
    })
}

/// 紧随其后的兄弟节点的目标
///
/// `node` 必须借用自 `siblings`；是最后一个或下一个兄弟没有目标时返回 `None`
pub fn next_sibling_destination<'a>(
    node: &OutlineNode,
    siblings: &'a [OutlineNode],
) -> Option<&'a Destination> {
    let position = siblings
        .iter()
        .position(|sibling| std::ptr::eq(sibling, node))?;
    siblings.get(position + 1)?.destination.as_ref()
}

/// 先序遍历中位于 `node` 子树之后、带目标的所有节点的目标，按目录顺序
///
/// 第一个即"目录中的下一个书签"；`node` 不在树中时返回空
pub fn following_destinations<'a>(
    tree: &'a [OutlineNode],
    node: &OutlineNode,
) -> Vec<&'a Destination> {
    let mut entries = Vec::new();
    flatten(tree, 0, &mut entries);

    let Some(position) = entries
        .iter()
        .position(|&(_, entry)| std::ptr::eq(entry, node))
    else {
        return Vec::new();
    };
    let depth = entries[position].0;

    entries[position + 1..]
        .iter()
        .skip_while(|&&(entry_depth, _)| entry_depth > depth)
        .filter_map(|&(_, entry)| entry.destination.as_ref())
        .collect()
}

fn find_first<'a>(
    nodes: &'a [OutlineNode],
    predicate: &dyn Fn(&OutlineNode) -> bool,
) -> Option<&'a OutlineNode> {
    for node in nodes {
        if predicate(node) {
            return Some(node);
        }
        if let Some(found) = find_first(&node.children, predicate) {
            return Some(found);
        }
    }
    None
}

fn flatten<'a>(nodes: &'a [OutlineNode], depth: usize, out: &mut Vec<(usize, &'a OutlineNode)>) {
    for node in nodes {
        out.push((depth, node));
        flatten(&node.children, depth + 1, out);
    }
}
