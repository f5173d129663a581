//! Question source adapters.

pub mod bank;

pub use bank::{BankError, BankQuestionSource};
