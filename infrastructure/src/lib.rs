//! Infrastructure layer for quizduel
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod source;
pub mod store;

// Re-export commonly used types
pub use config::{BankConfig, ConfigLoader, FileConfig};
pub use source::{BankError, BankQuestionSource};
pub use store::MemoryDuelStore;
