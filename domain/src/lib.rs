//! Domain layer for quizduel
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Duel
//!
//! A duel is a match of fixed structure between two players: five rounds of
//! five questions each. Both players answer the same questions and are
//! scored against each other.
//!
//! ## Reveal tier
//!
//! A round's content is revealed to a player in stages depending on the
//! round number, the current round, and whether the player has already
//! submitted answers. Projection is stateless: stored records are never
//! mutated to "unlock" a tier.

pub mod core;
pub mod duel;
pub mod question;

// Re-export commonly used types
pub use crate::core::error::DomainError;
pub use duel::{
    entities::{
        AnswerLog, DuelId, DuelOutcome, DuelRecord, PlayerStats, Round, MAX_QUESTION_TYPE,
        QUESTIONS_PER_ROUND, ROUNDS_PER_DUEL,
    },
    score::{score, Scores},
    view::{project, DuelView, QuestionView},
};
pub use question::entities::Question;
