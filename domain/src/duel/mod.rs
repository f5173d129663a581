//! Duel domain.
//!
//! - [`entities::Round`] — a batch of same-type questions, the unit of turn progression
//! - [`entities::DuelRecord`] — the duel aggregate owned by the store
//! - [`score`] — cumulative correct-answer counts for both players
//! - [`view`] — viewer-specific projection with staged visibility

pub mod entities;
pub mod score;
pub mod view;
