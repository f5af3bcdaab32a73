use exam_extract::error::DocumentError;
use exam_extract::orchestrator::{list_table_of_contents, process_chapters};
use exam_extract::{
    extract_chapter_exam_content, merge_qna, parse_exam_answers, parse_exam_questions, AppError,
    BankWriter, ChapterExam, ChapterExamFlow, ChapterSelector, ChoiceLetter, Choices, Destination,
    MCAnswer, MemoryDocument, Notice, OutlineNode, OutputFormat, PageRef, SectionKind,
};

fn dest(index: u32) -> Destination {
    Destination::Direct(PageRef::Index(index))
}

/// 8 页的示例文档：
/// - 第 3-4 页 Chapter 1 题目，第 5-6 页答案
/// - 第 7 页起 Chapter 2，只有题目小节
fn sample_document() -> MemoryDocument {
    MemoryDocument::new()
        .with_outline(vec![
            OutlineNode::new("Chapter 1")
                .with_destination(dest(1))
                .with_children(vec![
                    OutlineNode::new("Intro").with_destination(dest(1)),
                    OutlineNode::new("Exam Questions").with_destination(Destination::named("q1")),
                    OutlineNode::new("Exam Answers")
                        .with_destination(Destination::Direct(PageRef::object(50, 0))),
                ]),
            OutlineNode::new("Chapter 2")
                .with_destination(Destination::named("ch2"))
                .with_children(vec![OutlineNode::new("Exam Questions").with_destination(dest(7))]),
        ])
        .with_named_destination("q1", PageRef::Index(2))
        .with_named_destination("ch2", PageRef::object(70, 0))
        .with_page_object(50, 0, 4)
        .with_page_object(70, 0, 6)
        .with_page(["Cover"])
        .with_page(["Chapter 1", "Introduction text"])
        .with_page([
            "Chapter 1 Exam Questions",
            "1. Which of the following is NOT a project constraint?",
            "A. Quality",
            "B. Scale",
            "C. Time",
            "D. Cost",
        ])
        .with_page([
            "2. Which number is even?",
            "A. 1",
            "B. 3",
            "C. 4",
            "D. 5",
            "you are here ► 14",
        ])
        .with_page([
            "Chapter 1 Exam Answers",
            "1. Answer: B",
            "Scale is not a project constraint.",
        ])
        .with_page(["2. Answer: C", "Because 4 is even."])
        .with_page(["Chapter 2"])
        .with_page(["Chapter 2 Exam Questions 1. Orphan? A. a B. b C. c D. d"])
}

#[tokio::test]
async fn test_extract_full_chapter() {
    let doc = sample_document();
    let exam = extract_chapter_exam_content(&doc, "Chapter 1").await.unwrap();

    assert_eq!(exam.chapter_title, "Chapter 1");
    assert!(exam.notices.is_empty());
    assert_eq!(exam.questions.len(), 2);

    let first = &exam.questions[0];
    assert_eq!(first.question_number, 1);
    assert_eq!(first.choices, Choices::new("Quality", "Scale", "Time", "Cost"));
    assert_eq!(
        first.answer,
        Some(MCAnswer::new(ChoiceLetter::B, "Scale is not a project constraint."))
    );

    let second = &exam.questions[1];
    assert_eq!(second.choices.d, "5");
    assert_eq!(
        second.answer,
        Some(MCAnswer::new(ChoiceLetter::C, "Because 4 is even."))
    );

    // 题目 3-4 页，答案 5-6 页（答案小节的结束边界来自下一章）
    let mut fetched = doc.fetched_pages();
    fetched.sort_unstable();
    assert_eq!(fetched, vec![3, 4, 5, 6]);
}

#[tokio::test]
async fn test_chapter_not_found() {
    let doc = sample_document();
    let err = extract_chapter_exam_content(&doc, "Chapter 9")
        .await
        .unwrap_err();
    assert!(err.is_chapter_not_found());
    assert!(doc.fetched_pages().is_empty());

    let empty = MemoryDocument::new().with_blank_pages(2);
    let err = extract_chapter_exam_content(&empty, 1u32).await.unwrap_err();
    assert!(err.is_chapter_not_found());
}

#[tokio::test]
async fn test_missing_section_is_not_an_error() {
    let doc = sample_document();
    let exam = extract_chapter_exam_content(&doc, 2u32).await.unwrap();

    assert_eq!(exam.chapter_title, "Chapter 2");
    assert!(exam.questions.is_empty());
    assert_eq!(
        exam.notices,
        vec![Notice::SectionMissing {
            section: SectionKind::Answers
        }]
    );
    assert!(doc.fetched_pages().is_empty());
}

#[tokio::test]
async fn test_unresolvable_answers_keep_questions() {
    let doc = MemoryDocument::new()
        .with_outline(vec![
            OutlineNode::new("Chapter 1").with_children(vec![
                OutlineNode::new("Exam Questions").with_destination(dest(0)),
                OutlineNode::new("Exam Answers").with_destination(Destination::named("nowhere")),
            ]),
            OutlineNode::new("Chapter 2")
                .with_destination(dest(2))
                .with_children(vec![
                    OutlineNode::new("Exam Questions").with_destination(dest(2)),
                    OutlineNode::new("Exam Answers").with_destination(dest(3)),
                ]),
        ])
        .with_page(["1. Which number is even? A. 1 B. 3 C. 4 D. 5"])
        .with_page(["1. Answer: C Because 4 is even."])
        .with_page(["1. Other? A. e B. f C. g D. h"])
        .with_page(["1. Answer: D Belongs to chapter 2."]);

    let exam = extract_chapter_exam_content(&doc, "Chapter 1").await.unwrap();
    assert_eq!(
        exam.notices,
        vec![Notice::DestinationUnresolved {
            section: SectionKind::Answers
        }]
    );
    assert_eq!(exam.questions.len(), 1);
    assert_eq!(exam.questions[0].question_text, "Which number is even?");
    assert!(exam.questions[0].answer.is_none());
    // 题目小节止于下一章之前，不读第 2 章的页面
    assert_eq!(doc.fetched_pages(), vec![1, 2]);
}

#[tokio::test]
async fn test_unresolved_next_chapter_does_not_leak_answers() {
    let doc = MemoryDocument::new()
        .with_outline(vec![
            OutlineNode::new("Chapter 1")
                .with_destination(dest(0))
                .with_children(vec![
                    OutlineNode::new("Exam Questions").with_destination(dest(0)),
                    OutlineNode::new("Exam Answers").with_destination(dest(1)),
                ]),
            OutlineNode::new("Chapter 2")
                .with_destination(Destination::named("broken"))
                .with_children(vec![
                    OutlineNode::new("Exam Questions").with_destination(dest(2)),
                    OutlineNode::new("Exam Answers").with_destination(dest(3)),
                ]),
        ])
        .with_page(["1. First? A. a B. b C. c D. d"])
        .with_page(["1. Answer: A ch1 explanation"])
        .with_page(["1. Other? A. e B. f C. g D. h"])
        .with_page(["1. Answer: D ch2 explanation"]);

    let exam = extract_chapter_exam_content(&doc, "Chapter 1").await.unwrap();
    assert!(exam.notices.is_empty());
    assert_eq!(exam.questions.len(), 1);
    assert_eq!(
        exam.questions[0].answer,
        Some(MCAnswer::new(ChoiceLetter::A, "ch1 explanation"))
    );
    // 第 2 章书签无法解析时，答案小节止于第 2 章题目小节之前
    let mut fetched = doc.fetched_pages();
    fetched.sort_unstable();
    assert_eq!(fetched, vec![1, 2]);
}

#[tokio::test]
async fn test_all_later_boundaries_unresolved_skip_section() {
    let doc = MemoryDocument::new()
        .with_outline(vec![
            OutlineNode::new("Chapter 1").with_children(vec![
                OutlineNode::new("Exam Questions").with_destination(dest(0)),
                OutlineNode::new("Exam Answers").with_destination(dest(1)),
            ]),
            OutlineNode::new("Chapter 2").with_destination(Destination::named("broken")),
        ])
        .with_page(["1. First? A. a B. b C. c D. d"])
        .with_page(["1. Answer: A ch1 explanation"])
        .with_page(["1. Answer: D ch2 explanation"]);

    let exam = extract_chapter_exam_content(&doc, "Chapter 1").await.unwrap();
    assert_eq!(
        exam.notices,
        vec![Notice::BoundaryUnresolved {
            section: SectionKind::Answers
        }]
    );
    assert_eq!(exam.questions.len(), 1);
    assert!(exam.questions[0].answer.is_none());
    assert_eq!(doc.fetched_pages(), vec![1]);
}

#[tokio::test]
async fn test_unresolvable_questions_yield_no_questions() {
    let doc = MemoryDocument::new()
        .with_outline(vec![OutlineNode::new("Chapter 1").with_children(vec![
            OutlineNode::new("Exam Questions").with_destination(dest(42)),
            OutlineNode::new("Exam Answers").with_destination(dest(1)),
        ])])
        .with_page(["1. Which number is even? A. 1 B. 3 C. 4 D. 5"])
        .with_page(["1. Answer: C Because 4 is even."]);

    let exam = extract_chapter_exam_content(&doc, "Chapter 1").await.unwrap();
    assert!(exam.questions.is_empty());
    assert_eq!(
        exam.notices,
        vec![
            Notice::DestinationUnresolved {
                section: SectionKind::Questions
            },
            Notice::NoQuestionsParsed,
        ]
    );
    assert_eq!(doc.fetched_pages(), vec![2]);
}

#[tokio::test]
async fn test_sections_on_same_page_give_empty_range() {
    let doc = MemoryDocument::new()
        .with_outline(vec![OutlineNode::new("Chapter 1").with_children(vec![
            OutlineNode::new("Exam Questions").with_destination(dest(0)),
            OutlineNode::new("Exam Answers").with_destination(dest(0)),
        ])])
        .with_page(["1. Q? A. a B. b C. c D. d 1. Answer: A fine"]);

    let exam = extract_chapter_exam_content(&doc, "Chapter 1").await.unwrap();
    assert!(exam.notices.contains(&Notice::EmptyPageRange {
        section: SectionKind::Questions,
        start: 1,
        end: 0,
    }));
    assert!(exam.notices.contains(&Notice::NoQuestionsParsed));
}

#[tokio::test]
async fn test_nested_chapter_and_last_section_runs_to_end() {
    let doc = MemoryDocument::new()
        .with_outline(vec![
            OutlineNode::new("Preface").with_destination(dest(0)),
            OutlineNode::new("Part I").with_children(vec![OutlineNode::new("Chapter 3: Risk")
                .with_destination(dest(1))
                .with_children(vec![
                    OutlineNode::new("Exam Question").with_destination(dest(1)),
                    OutlineNode::new("exam answers").with_destination(dest(2)),
                ])]),
        ])
        .with_page(["Preface"])
        .with_page(["3. Which number is even? A. 1 B. 3 C. 4 D. 5"])
        .with_page(["3. Answer: C Because 4", "is even."])
        .with_page(["More explanation."]);

    let exam = extract_chapter_exam_content(&doc, 3u32).await.unwrap();
    assert_eq!(exam.chapter_title, "Chapter 3: Risk");
    assert_eq!(exam.questions.len(), 1);
    assert_eq!(
        exam.questions[0].answer,
        Some(MCAnswer::new(
            ChoiceLetter::C,
            "Because 4 is even. More explanation."
        ))
    );
    assert_eq!(doc.fetched_pages(), vec![2, 3, 4]);
}

#[tokio::test]
async fn test_page_fetch_failure_propagates() {
    let doc = sample_document().with_failing_page(4);
    let err = extract_chapter_exam_content(&doc, "Chapter 1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Document(DocumentError::PageFetch { page: 4, .. })
    ));
}

#[test]
fn test_scenario_merge_partial_answers() {
    let questions = parse_exam_questions(
        "1. Which of the following is NOT a project constraint? A. Quality B. Scale C. Time D. Cost \
         2. Which number is even? A. 1 B. 3 C. 4 D. 5",
    );
    let answers = parse_exam_answers("1. Answer: B Scale is not a project constraint.");

    let merged = merge_qna(&questions, &answers);
    assert_eq!(merged.len(), 2);
    assert!(merged[0].answer.is_some());
    assert!(merged[1].answer.is_none());
}

#[test]
fn test_list_table_of_contents() {
    let doc = sample_document();
    let titles = tokio_test::block_on(list_table_of_contents(&doc)).unwrap();
    assert_eq!(titles, vec!["Chapter 1", "Chapter 2"]);

    let empty = MemoryDocument::new();
    assert!(tokio_test::block_on(list_table_of_contents(&empty))
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_process_chapters_writes_bank() {
    let dir = tempfile::tempdir().unwrap();
    let doc = sample_document();
    let writer = BankWriter::new(dir.path(), OutputFormat::Json);
    let selectors = vec![
        ChapterSelector::parse("Chapter 1"),
        ChapterSelector::parse("2"),
        ChapterSelector::parse("Chapter 9"),
    ];

    let stats = process_chapters(&doc, &ChapterExamFlow::default(), &writer, &selectors).await;
    assert_eq!(stats.total, 3);
    assert_eq!(stats.success, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.questions, 2);

    let content = std::fs::read_to_string(dir.path().join("chapter_1.json")).unwrap();
    let exam: ChapterExam = serde_json::from_str(&content).unwrap();
    assert_eq!(exam.questions.len(), 2);
    assert!(dir.path().join("chapter_2.json").exists());
    assert!(!dir.path().join("chapter_9.json").exists());
}
