//! Question bank source.
//!
//! Adapter implementing the [`QuestionSource`] port over a fixed bank of
//! pre-authored questions keyed by type, loaded from a TOML file. Each
//! `generate` call draws a random question of the requested type; a type
//! with no entries reports `InsufficientData` and gets abandoned by the
//! composer.
//!
//! The bank is also the injection point for deterministic content in
//! tests and demos, replacing any global generator override.

use async_trait::async_trait;
use quizduel_application::ports::question_source::{QuestionSource, SourceError};
use quizduel_domain::Question;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors raised while loading a question bank file.
#[derive(Error, Debug)]
pub enum BankError {
    #[error("Can't read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("Can't parse question bank: {0}")]
    Parse(#[from] toml::de::Error),
}

/// On-disk format: a flat list of questions.
#[derive(Debug, Deserialize)]
struct QuestionBankFile {
    #[serde(default)]
    questions: Vec<Question>,
}

/// [`QuestionSource`] backed by an in-memory question bank.
pub struct BankQuestionSource {
    bank: HashMap<u32, Vec<Question>>,
}

impl BankQuestionSource {
    pub fn new(questions: impl IntoIterator<Item = Question>) -> Self {
        let mut bank: HashMap<u32, Vec<Question>> = HashMap::new();
        for question in questions {
            bank.entry(question.question_type).or_default().push(question);
        }
        Self { bank }
    }

    /// Load a bank from a TOML file of `[[questions]]` entries.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let file: QuestionBankFile = toml::from_str(&raw)?;
        let source = Self::new(file.questions);
        info!(
            path = %path.as_ref().display(),
            types = source.bank.len(),
            "Question bank loaded"
        );
        Ok(source)
    }

    /// Question types the bank can produce at all.
    pub fn available_types(&self) -> Vec<u32> {
        let mut types: Vec<u32> = self.bank.keys().copied().collect();
        types.sort_unstable();
        types
    }
}

#[async_trait]
impl QuestionSource for BankQuestionSource {
    async fn generate(&self, question_type: u32) -> Result<Question, SourceError> {
        self.bank
            .get(&question_type)
            .and_then(|pool| pool.choose(&mut rand::thread_rng()))
            .cloned()
            .ok_or(SourceError::InsufficientData)
    }
}
