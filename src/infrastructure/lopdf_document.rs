//! 基于 lopdf 的 PDF 文档访问器
//!
//! 目录通过 `/Outlines` 的 `/First`、`/Next` 链接遍历，
//! 命名目标依次查找 `/Names → /Dests` 名称树和旧式 `/Dests` 字典。

use std::collections::HashSet;
use std::path::Path;

use lopdf::{Dictionary, Object, ObjectId};
use tracing::{debug, warn};

use crate::error::{AppError, AppResult, DocumentError};
use crate::infrastructure::DocumentAccessor;
use crate::models::{Destination, OutlineNode, PageRef};

/// 目录最大嵌套深度
const MAX_OUTLINE_DEPTH: usize = 64;

/// 已加载的 PDF 文档
pub struct LopdfDocument {
    inner: lopdf::Document,
    /// 按页顺序缓存的页面对象 ID（下标即 0-based 页索引）
    page_ids: Vec<ObjectId>,
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

impl LopdfDocument {
    /// 从文件加载
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let inner = lopdf::Document::load(path)
            .map_err(|e| AppError::document_load_failed(path.display().to_string(), e))?;
        debug!("已加载文档: {}", path.display());
        Ok(Self::from_document(inner))
    }

    /// 从内存字节加载
    pub fn load_mem(bytes: &[u8]) -> AppResult<Self> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| AppError::document_load_failed("<memory>", e))?;
        Ok(Self::from_document(inner))
    }

    pub fn from_document(inner: lopdf::Document) -> Self {
        // get_pages 返回以 1-based 页码为键的 BTreeMap，按键有序
        let page_ids = inner.get_pages().into_values().collect();
        Self { inner, page_ids }
    }

    fn catalog(&self) -> Option<&Dictionary> {
        match self.inner.trailer.get(b"Root").ok()? {
            Object::Reference(id) => self.inner.get_object(*id).ok()?.as_dict().ok(),
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// 引用对象解引用一次
    fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        match obj {
            Object::Reference(id) => self.inner.get_object(*id).ok(),
            other => Some(other),
        }
    }

    fn read_outline_level(
        &self,
        first: ObjectId,
        depth: usize,
        visited: &mut HashSet<ObjectId>,
    ) -> Vec<OutlineNode> {
        let mut nodes = Vec::new();
        if depth >= MAX_OUTLINE_DEPTH {
            warn!("⚠️ 目录嵌套超过 {} 层，已截断", MAX_OUTLINE_DEPTH);
            return nodes;
        }

        let mut current = Some(first);
        while let Some(node_id) = current {
            // 循环引用保护
            if !visited.insert(node_id) {
                break;
            }

            let Some(dict) = self
                .inner
                .get_object(node_id)
                .ok()
                .and_then(|obj| obj.as_dict().ok())
            else {
                break;
            };

            let title = dict
                .get(b"Title")
                .ok()
                .and_then(|obj| self.resolve(obj))
                .and_then(decode_text_object)
                .unwrap_or_default();

            let children = match dict.get(b"First") {
                Ok(Object::Reference(child_id)) => {
                    self.read_outline_level(*child_id, depth + 1, visited)
                }
                _ => Vec::new(),
            };

            nodes.push(OutlineNode {
                title,
                destination: self.read_bookmark_destination(dict),
                children,
            });

            current = match dict.get(b"Next") {
                Ok(Object::Reference(next_id)) => Some(*next_id),
                _ => None,
            };
        }

        nodes
    }

    /// 书签目标：先看 `/Dest`，再看 GoTo 动作的 `/D`
    fn read_bookmark_destination(&self, node: &Dictionary) -> Option<Destination> {
        if let Ok(dest) = node.get(b"Dest") {
            if let Some(destination) = self.destination_from_object(dest) {
                return Some(destination);
            }
        }

        let action = self.resolve(node.get(b"A").ok()?)?.as_dict().ok()?;
        match action.get(b"S") {
            Ok(Object::Name(kind)) if kind.as_slice() == b"GoTo" => {
                self.destination_from_object(action.get(b"D").ok()?)
            }
            _ => None,
        }
    }

    fn destination_from_object(&self, obj: &Object) -> Option<Destination> {
        match self.resolve(obj)? {
            Object::Array(items) => match items.first()? {
                Object::Reference(page_id) => {
                    Some(Destination::Direct(PageRef::object(page_id.0, page_id.1)))
                }
                Object::Integer(index) if *index >= 0 => {
                    Some(Destination::Direct(PageRef::Index(*index as u32)))
                }
                _ => None,
            },
            Object::String(bytes, _) => Some(Destination::Named(decode_pdf_string(bytes))),
            Object::Name(name) => Some(Destination::Named(
                String::from_utf8_lossy(name).into_owned(),
            )),
            Object::Dictionary(dict) => self.destination_from_object(dict.get(b"D").ok()?),
            _ => None,
        }
    }

    fn lookup_named(&self, name: &str) -> Option<Destination> {
        let catalog = self.catalog()?;

        // 新式：/Names → /Dests 名称树
        let from_tree = catalog
            .get(b"Names")
            .ok()
            .and_then(|obj| self.resolve(obj))
            .and_then(|obj| obj.as_dict().ok())
            .and_then(|names| names.get(b"Dests").ok())
            .and_then(|obj| self.resolve(obj))
            .and_then(|obj| obj.as_dict().ok())
            .and_then(|tree| self.lookup_name_tree(tree, name, 0));
        if from_tree.is_some() {
            return from_tree;
        }

        // 旧式：/Dests 字典
        let dests = self.resolve(catalog.get(b"Dests").ok()?)?.as_dict().ok()?;
        self.destination_from_object(dests.get(name.as_bytes()).ok()?)
    }

    fn lookup_name_tree(&self, tree: &Dictionary, name: &str, depth: usize) -> Option<Destination> {
        if depth >= MAX_OUTLINE_DEPTH {
            return None;
        }

        // 叶子节点：[key1 value1 key2 value2 ...]
        if let Some(pairs) = tree
            .get(b"Names")
            .ok()
            .and_then(|obj| self.resolve(obj))
            .and_then(|obj| obj.as_array().ok())
        {
            for pair in pairs.chunks(2) {
                let [key, value] = pair else { continue };
                let matches = self
                    .resolve(key)
                    .and_then(decode_text_object)
                    .is_some_and(|key| key == name);
                if matches {
                    return self.destination_from_object(value);
                }
            }
        }

        // 中间节点：/Kids
        let kids = tree
            .get(b"Kids")
            .ok()
            .and_then(|obj| self.resolve(obj))
            .and_then(|obj| obj.as_array().ok())?;
        kids.iter()
            .filter_map(|kid| self.resolve(kid)?.as_dict().ok())
            .find_map(|kid| self.lookup_name_tree(kid, name, depth + 1))
    }
}

impl DocumentAccessor for LopdfDocument {
    async fn outline(&self) -> AppResult<Vec<OutlineNode>> {
        let Some(catalog) = self.catalog() else {
            return Ok(Vec::new());
        };

        let first = catalog
            .get(b"Outlines")
            .ok()
            .and_then(|obj| self.resolve(obj))
            .and_then(|obj| obj.as_dict().ok())
            .and_then(|outlines| match outlines.get(b"First") {
                Ok(Object::Reference(id)) => Some(*id),
                _ => None,
            });

        match first {
            Some(first) => Ok(self.read_outline_level(first, 0, &mut HashSet::new())),
            None => Ok(Vec::new()),
        }
    }

    async fn destination(&self, name: &str) -> AppResult<Option<PageRef>> {
        // 命名目标只解析一层，避免命名目标互相指向
        Ok(match self.lookup_named(name) {
            Some(Destination::Direct(reference)) => Some(reference),
            _ => None,
        })
    }

    async fn page_index(&self, reference: &PageRef) -> AppResult<u32> {
        let index = match reference {
            PageRef::Object { id, generation } => self
                .page_ids
                .iter()
                .position(|page_id| *page_id == (*id, *generation))
                .map(|i| i as u32),
            PageRef::Index(index) => Some(*index).filter(|i| *i < self.num_pages()),
        };

        index.ok_or_else(|| {
            DocumentError::InvalidPageRef {
                reference: reference.to_string(),
            }
            .into()
        })
    }

    async fn page_text(&self, page_number: u32) -> AppResult<Vec<String>> {
        if page_number == 0 || page_number > self.num_pages() {
            return Err(DocumentError::PageOutOfRange {
                page: page_number,
                num_pages: self.num_pages(),
            }
            .into());
        }

        let text = self
            .inner
            .extract_text(&[page_number])
            .map_err(|e| AppError::page_fetch_failed(page_number, e))?;

        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn num_pages(&self) -> u32 {
        self.page_ids.len() as u32
    }
}

fn decode_text_object(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

/// PDF 文本字符串：带 BOM 的 UTF-16BE，否则按 UTF-8 / Latin-1 处理
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let [0xFE, 0xFF, rest @ ..] = bytes {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Stream, StringFormat};

    /// 生成带目录的测试 PDF：
    /// Chapter 1 → Exam Questions (直接引用第 2 页) / Exam Answers (命名目标 "a1" → 第 3 页)
    fn build_pdf() -> Vec<u8> {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut page_ids = Vec::new();
        for _ in 0..4 {
            let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
            });
            page_ids.push(page_id);
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
                "Count" => page_ids.len() as i64,
            }),
        );

        let outlines_id = doc.new_object_id();
        let chapter_id = doc.new_object_id();
        let questions_id = doc.new_object_id();
        let answers_id = doc.new_object_id();

        doc.objects.insert(
            questions_id,
            Object::Dictionary(dictionary! {
                "Title" => Object::String(b"Exam Questions".to_vec(), StringFormat::Literal),
                "Parent" => chapter_id,
                "Next" => answers_id,
                "Dest" => vec![Object::Reference(page_ids[1]), "Fit".into()],
            }),
        );
        doc.objects.insert(
            answers_id,
            Object::Dictionary(dictionary! {
                "Title" => Object::String(b"Exam Answers".to_vec(), StringFormat::Literal),
                "Parent" => chapter_id,
                "Prev" => questions_id,
                "A" => dictionary! {
                    "S" => "GoTo",
                    "D" => Object::String(b"a1".to_vec(), StringFormat::Literal),
                },
            }),
        );
        doc.objects.insert(
            chapter_id,
            Object::Dictionary(dictionary! {
                "Title" => Object::String(b"Chapter 1".to_vec(), StringFormat::Literal),
                "Parent" => outlines_id,
                "First" => questions_id,
                "Last" => answers_id,
                "Dest" => vec![Object::Reference(page_ids[0]), "Fit".into()],
            }),
        );
        doc.objects.insert(
            outlines_id,
            Object::Dictionary(dictionary! {
                "Type" => "Outlines",
                "First" => chapter_id,
                "Last" => chapter_id,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
            "Outlines" => outlines_id,
            "Dests" => dictionary! {
                "a1" => vec![Object::Reference(page_ids[2]), "Fit".into()],
            },
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_decode_pdf_string_utf16() {
        let bytes = [0xFE, 0xFF, 0x00, b'E', 0x00, b'x'];
        assert_eq!(decode_pdf_string(&bytes), "Ex");
        assert_eq!(decode_pdf_string(b"Exam"), "Exam");
    }

    #[tokio::test]
    async fn test_reads_outline_tree() {
        let doc = LopdfDocument::load_mem(&build_pdf()).unwrap();
        assert_eq!(doc.num_pages(), 4);

        let outline = doc.outline().await.unwrap();
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].title, "Chapter 1");
        assert_eq!(outline[0].children.len(), 2);
        assert_eq!(outline[0].children[0].title, "Exam Questions");
        assert_eq!(
            outline[0].children[1].destination,
            Some(Destination::named("a1"))
        );
    }

    #[tokio::test]
    async fn test_resolves_direct_and_named_destinations() {
        let doc = LopdfDocument::load_mem(&build_pdf()).unwrap();
        let outline = doc.outline().await.unwrap();

        let Some(Destination::Direct(questions_ref)) = outline[0].children[0].destination.clone()
        else {
            panic!("Exam Questions 应为直接引用");
        };
        assert_eq!(doc.page_index(&questions_ref).await.unwrap(), 1);

        let answers_ref = doc.destination("a1").await.unwrap().unwrap();
        assert_eq!(doc.page_index(&answers_ref).await.unwrap(), 2);
        assert_eq!(doc.destination("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_page_text_out_of_range() {
        let doc = LopdfDocument::load_mem(&build_pdf()).unwrap();
        assert!(doc.page_text(0).await.is_err());
        assert!(doc.page_text(5).await.is_err());
    }
}
