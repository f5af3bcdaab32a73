//! 书签目标解析服务 - 业务能力层
//!
//! 把书签目标换算成 1-based 页码；任何一步失败都只记录警告，不向上抛

use tracing::{debug, warn};

use crate::error::{AppResult, DocumentError};
use crate::infrastructure::DocumentAccessor;
use crate::models::{Destination, PageRef};

/// 解析书签目标对应的页码（1-based）
///
/// - `Direct` 直接换算页索引
/// - `Named` 先通过文档查出页面引用再换算
///
/// 失败时返回 `None`，一个小节解析失败不影响其它小节
pub async fn resolve_page<D: DocumentAccessor>(doc: &D, destination: &Destination) -> Option<u32> {
    match try_resolve_page(doc, destination).await {
        Ok(page) => {
            debug!("书签目标 {} → 第 {} 页", destination, page);
            Some(page)
        }
        Err(e) => {
            warn!("⚠️  无法解析书签目标 {}: {}", destination, e);
            None
        }
    }
}

/// 目标可能不存在时的便捷版本
pub async fn resolve_optional_page<D: DocumentAccessor>(
    doc: &D,
    destination: Option<&Destination>,
) -> Option<u32> {
    match destination {
        Some(destination) => resolve_page(doc, destination).await,
        None => None,
    }
}

async fn try_resolve_page<D: DocumentAccessor>(doc: &D, destination: &Destination) -> AppResult<u32> {
    let reference: PageRef = match destination {
        Destination::Direct(reference) => *reference,
        Destination::Named(name) => doc
            .destination(name)
            .await?
            .ok_or_else(|| DocumentError::UnknownDestination { name: name.clone() })?,
    };

    let index = doc.page_index(&reference).await?;
    Ok(index + 1)
}
