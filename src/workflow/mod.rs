pub mod chapter_flow;

pub use chapter_flow::{
    extract_chapter_exam_content, extract_chapter_exam_content_from_path, ChapterExamFlow,
};
