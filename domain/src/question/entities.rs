//! Question domain entities

use serde::{Deserialize, Serialize};

/// A generated quiz question (Entity)
///
/// Questions are immutable once generated. The `good_answer` field is an
/// index into `answers`; only the projection layer decides when a viewer is
/// allowed to see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question type, `1..=MAX_QUESTION_TYPE`
    pub question_type: u32,
    /// Human-readable title of this type of question
    pub title: String,
    /// The subject the question is about
    pub subject: String,
    /// The wording shown to the player
    pub wording: String,
    /// Candidate answers, in display order
    pub answers: Vec<String>,
    /// Index of the correct entry in `answers`
    pub good_answer: usize,
}

impl Question {
    pub fn new(
        question_type: u32,
        title: impl Into<String>,
        subject: impl Into<String>,
        wording: impl Into<String>,
        answers: Vec<String>,
        good_answer: usize,
    ) -> Self {
        Self {
            question_type,
            title: title.into(),
            subject: subject.into(),
            wording: wording.into(),
            answers,
            good_answer,
        }
    }
}
