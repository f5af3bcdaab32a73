//! 基础设施层
//!
//! 持有文档资源，只暴露读取能力

pub mod document;
pub mod lopdf_document;
pub mod memory;

pub use document::DocumentAccessor;
pub use lopdf_document::LopdfDocument;
pub use memory::MemoryDocument;
