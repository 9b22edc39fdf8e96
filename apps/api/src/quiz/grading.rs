//! Grading a submitted attempt against a stored question set.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::quiz::models::{AnswerKey, QuestionSet};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradingError {
    #[error("question index {index} is out of range (set has {total} questions)")]
    QuestionOutOfRange { index: usize, total: usize },

    #[error("question {index} was answered more than once")]
    DuplicateAnswer { index: usize },
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedAnswer {
    pub question_index: usize,
    /// `None` records a skipped question.
    #[serde(default)]
    pub selected_answer: Option<AnswerKey>,
    #[serde(default)]
    pub time_spent_secs: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizSubmission {
    pub user_id: Uuid,
    pub answers: Vec<SubmittedAnswer>,
    /// Wall-clock duration. When absent, the per-question times are summed.
    #[serde(default)]
    pub time_taken_secs: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_index: usize,
    pub selected_answer: Option<AnswerKey>,
    pub is_correct: bool,
    pub time_spent_secs: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicPerformance {
    pub topic: String,
    pub correct: u32,
    pub total: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResults {
    pub total_questions: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    /// Rounded percentage, 0–100.
    pub score: u32,
    pub time_taken_secs: u32,
    /// One record per question in set order, unanswered ones included.
    pub answers: Vec<AnswerRecord>,
    /// Sorted by topic name.
    pub topic_performance: Vec<TopicPerformance>,
}

/// Grades `submission` against `set`. Unanswered questions count as incorrect.
pub fn grade(set: &QuestionSet, submission: &QuizSubmission) -> Result<QuizResults, GradingError> {
    let total = set.mcqs.len();
    let mut submitted: Vec<Option<&SubmittedAnswer>> = vec![None; total];
    let mut seen = HashSet::new();

    for answer in &submission.answers {
        let index = answer.question_index;
        if index >= total {
            return Err(GradingError::QuestionOutOfRange { index, total });
        }
        if !seen.insert(index) {
            return Err(GradingError::DuplicateAnswer { index });
        }
        submitted[index] = Some(answer);
    }

    let mut answers = Vec::with_capacity(total);
    let mut topics: BTreeMap<&str, (u32, u32)> = BTreeMap::new();

    for (index, (mcq, answer)) in set.mcqs.iter().zip(submitted.iter().copied()).enumerate() {
        let selected_answer = answer.and_then(|a| a.selected_answer);
        let is_correct = selected_answer == Some(mcq.correct_answer);

        let entry = topics.entry(mcq.topic_or_general()).or_default();
        entry.1 += 1;
        if is_correct {
            entry.0 += 1;
        }

        answers.push(AnswerRecord {
            question_index: index,
            selected_answer,
            is_correct,
            time_spent_secs: answer.map_or(0, |a| a.time_spent_secs),
        });
    }

    let correct_answers = answers.iter().filter(|a| a.is_correct).count() as u32;
    let total_questions = total as u32;
    let time_taken_secs = submission
        .time_taken_secs
        .unwrap_or_else(|| {
            answers
                .iter()
                .fold(0u32, |acc, a| acc.saturating_add(a.time_spent_secs))
        });

    let topic_performance = topics
        .into_iter()
        .map(|(topic, (correct, total))| TopicPerformance {
            topic: topic.to_string(),
            correct,
            total,
            percentage: percentage(correct, total),
        })
        .collect();

    Ok(QuizResults {
        total_questions,
        correct_answers,
        incorrect_answers: total_questions - correct_answers,
        score: percentage(correct_answers, total_questions),
        time_taken_secs,
        answers,
        topic_performance,
    })
}

fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (f64::from(part) * 100.0 / f64::from(whole)).round() as u32
}
