//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量章节处理器
//! - 管理应用生命周期（初始化、运行）
//! - 持有文档（LopdfDocument）和写入服务（BankWriter）
//! - 输出目录列表和全局统计信息
//!
//! ### `chapter_processor` - 单个章节处理器
//! - 调用 ChapterExamFlow 提取一个章节
//! - 写入题库文件
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<ChapterSelector>)
//!     ↓
//! chapter_processor (处理单个章节 + 落盘)
//!     ↓
//! workflow::ChapterExamFlow (导航 → 页范围 → 文本 → 解析 → 合并)
//!     ↓
//! services (能力层：navigator / resolver / extractor / parser / merger / writer)
//!     ↓
//! infrastructure (基础设施：DocumentAccessor)
//! ```

pub mod batch_processor;
pub mod chapter_processor;

// 重新导出主要类型
pub use batch_processor::{list_table_of_contents, process_chapters, App, BatchStats};
pub use chapter_processor::{process_chapter, ChapterOutcome};
