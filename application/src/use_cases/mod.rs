//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod create_duel;
pub mod fetch_duel;
pub mod play_round;
