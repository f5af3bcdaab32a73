//! # Exam Extract
//!
//! 从 PDF 书签结构中提取章节考题（题目、选项、答案、解析）并生成题库
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有文档，只暴露读取能力
//! - `DocumentAccessor` - 目录树、命名目标、页索引、页面文本
//! - `LopdfDocument` / `MemoryDocument` - PDF 文件与内存两种实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，互不依赖流程顺序
//! - 目录导航、书签目标解析、页范围文本提取
//! - 题目解析、答案解析、合并、题库写入
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个章节"的完整提取流程
//! - `ChapterExamFlow` - 导航 → 页范围 → 并发读文本 → 解析 → 合并
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 应用入口，批量处理章节并统计
//! - `orchestrator/chapter_processor` - 单个章节处理并落盘
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, OutputFormat};
pub use error::{AppError, AppResult};
pub use infrastructure::{DocumentAccessor, LopdfDocument, MemoryDocument};
pub use models::{
    AnswerMap, ChapterExam, ChapterSelector, ChoiceLetter, Choices, Destination, MCAnswer,
    MCQuestion, Notice, OutlineNode, PageRange, PageRef, SectionKind,
};
pub use orchestrator::{list_table_of_contents, process_chapters, App, BatchStats};
pub use services::{merge_qna, parse_exam_answers, parse_exam_questions, BankWriter};
pub use workflow::{
    extract_chapter_exam_content, extract_chapter_exam_content_from_path, ChapterExamFlow,
};
