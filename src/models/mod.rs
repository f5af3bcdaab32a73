pub mod chapter;
pub mod outline;
pub mod question;

pub use chapter::{ChapterExam, ChapterSelector, Notice, PageRange, SectionKind};
pub use outline::{Destination, OutlineNode, PageRef};
pub use question::{AnswerMap, ChoiceLetter, Choices, MCAnswer, MCQuestion};
