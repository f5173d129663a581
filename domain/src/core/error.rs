//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Round must contain {expected} questions, got {got}")]
    WrongQuestionCount { expected: usize, got: usize },

    #[error("All questions in a round must share type {expected}, found {found}")]
    MixedQuestionTypes { expected: u32, found: u32 },

    #[error("Player '{0}' is not a participant of this duel")]
    NotAParticipant(String),
}
