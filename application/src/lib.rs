//! Application layer for quizduel
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DuelRules;
pub use ports::{
    duel_store::{DuelStore, StoreError},
    question_source::{QuestionSource, SourceError, INSUFFICIENT_DATA_CODE},
};
pub use use_cases::create_duel::{CreateDuelError, CreateDuelInput, CreateDuelUseCase};
pub use use_cases::fetch_duel::{FetchDuelError, FetchDuelUseCase};
pub use use_cases::play_round::{PlayRoundError, PlayRoundInput, PlayRoundUseCase};
