//! Question source port
//!
//! Defines the interface for generating quiz question content.

use async_trait::async_trait;
use quizduel_domain::Question;
use thiserror::Error;

/// Stable machine-readable code carried by insufficient-data failures.
///
/// Clients branch on this code, so it is part of the contract.
pub const INSUFFICIENT_DATA_CODE: &str = "NED";

/// Errors that can occur while generating a question
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source cannot produce enough distinct content for this type.
    ///
    /// Composition treats this as "abandon the type", never as a fault.
    #[error("Not enough data to generate a question ({INSUFFICIENT_DATA_CODE})")]
    InsufficientData,

    #[error("Question source failure: {0}")]
    Backend(String),
}

impl SourceError {
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, SourceError::InsufficientData)
    }
}

/// Source of generated quiz questions
///
/// This port defines how the duel engine obtains question content.
/// Implementations (adapters) live in the infrastructure layer and must be
/// safe to call concurrently: a round build issues several `generate` calls
/// at once.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Produce one question instance of the given type.
    async fn generate(&self, question_type: u32) -> Result<Question, SourceError>;
}
