//! 题目与答案合并

use crate::models::{AnswerMap, MCQuestion};

/// 按题号把答案左连接到题目上
///
/// 输出与 `questions` 等长同序；没有对应题目的答案直接丢弃。
/// 不修改入参，返回新的记录
pub fn merge_qna(questions: &[MCQuestion], answers: &AnswerMap) -> Vec<MCQuestion> {
    questions
        .iter()
        .map(|question| MCQuestion {
            answer: answers.get(&question.question_number).cloned(),
            ..question.clone()
        })
        .collect()
}
