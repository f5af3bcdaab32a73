pub mod answer_parser;
pub mod bank_writer;
pub mod destination_resolver;
pub mod merger;
pub mod outline_navigator;
pub mod question_parser;
pub mod text_extractor;

pub use answer_parser::parse_exam_answers;
pub use bank_writer::{slugify, BankWriter};
pub use destination_resolver::{resolve_optional_page, resolve_page};
pub use merger::merge_qna;
pub use outline_navigator::{
    find_chapter, find_node, find_section, following_destinations, next_sibling_destination,
};
pub use question_parser::parse_exam_questions;
pub use text_extractor::{extract_page_range, extract_range_text, normalize_whitespace};
