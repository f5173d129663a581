//! Application configuration.
//!
//! - [`duel_rules::DuelRules`] — composition tunables for the duel engine

pub mod duel_rules;

pub use duel_rules::DuelRules;
