use chrono::Utc;
use lcms_store::{Difficulty, Quiz};
use serde::Deserialize;

use crate::error::ApiError;

/// Payload for creating a quiz. The store assigns id and timestamps.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuiz {
    pub question: String,
    pub correct_answer: String,
    pub wrong_answers: Vec<String>,
    #[serde(default)]
    pub related_topic_id: Option<String>,
    pub difficulty: Difficulty,
}

/// Field rules shared by the create and update paths.
pub(crate) fn check_quiz(
    question: &str,
    correct_answer: &str,
    wrong_answers: &[String],
) -> Result<(), String> {
    if question.trim().is_empty() {
        return Err("Question cannot be empty".to_string());
    }
    if correct_answer.trim().is_empty() {
        return Err("Correct answer cannot be empty".to_string());
    }
    if wrong_answers.len() != 3 {
        return Err("Exactly 3 wrong answers are required".to_string());
    }
    if wrong_answers.iter().any(|a| a == correct_answer) {
        return Err("Wrong answers must differ from the correct answer".to_string());
    }
    Ok(())
}

impl NewQuiz {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_quiz(&self.question, &self.correct_answer, &self.wrong_answers)
            .map_err(ApiError::Validation)
    }

    pub fn into_record(self) -> Quiz {
        Quiz {
            id: String::new(),
            question: self.question,
            correct_answer: self.correct_answer,
            wrong_answers: self.wrong_answers,
            related_topic_id: self.related_topic_id.filter(|s| !s.is_empty()),
            difficulty: self.difficulty,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}
