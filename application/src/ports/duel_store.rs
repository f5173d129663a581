//! Duel store port
//!
//! Defines the transactional persistence surface the duel engine requires.

use async_trait::async_trait;
use quizduel_domain::{DuelId, DuelOutcome, DuelRecord, PlayerStats, Round};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Duel not found")]
    NotFound,

    /// An answer set for this (duel, player, round) already exists.
    ///
    /// Returned by [`DuelStore::append_answers`] when the check-and-append
    /// loses to a concurrent submission by the same player.
    #[error("Answers already recorded for this round")]
    Conflict,

    #[error("Store failure: {0}")]
    Backend(String),
}

/// Durable storage for duels and per-player answer logs
///
/// The store owns every [`DuelRecord`]; callers only see transient copies.
/// Implementations must serialize mutations per duel so the round-gating
/// and at-most-once invariants hold under concurrent play.
#[async_trait]
pub trait DuelStore: Send + Sync {
    /// Persist a freshly composed duel and return its id.
    async fn create_duel(
        &self,
        challenger: &str,
        opponent: &str,
        rounds: Vec<Round>,
    ) -> Result<DuelId, StoreError>;

    /// Fetch one duel on behalf of `requester`.
    ///
    /// Returns `Ok(None)` when the duel does not exist **or** the requester
    /// is not a participant, so existence is not leaked.
    async fn get_duel(
        &self,
        id: DuelId,
        requester: &str,
    ) -> Result<Option<DuelRecord>, StoreError>;

    /// All duels `player` participates in.
    async fn get_all_duels(&self, player: &str) -> Result<Vec<DuelRecord>, StoreError>;

    /// Atomically record `player`'s answers for `round_number` and return
    /// the updated record.
    ///
    /// The duplicate-submission check and the log append must be atomic for
    /// the (duel, player, round) key; a duplicate fails with
    /// [`StoreError::Conflict`] and leaves the record untouched.
    async fn append_answers(
        &self,
        id: DuelId,
        player: &str,
        round_number: usize,
        answers: Vec<usize>,
    ) -> Result<DuelRecord, StoreError>;

    /// Advance the duel's current round.
    async fn advance_round(&self, id: DuelId, new_round: usize) -> Result<DuelRecord, StoreError>;

    /// Mark the duel finished; with an outcome, increment the winner's
    /// victories and the loser's defeats in the same update.
    async fn finish_duel(
        &self,
        id: DuelId,
        outcome: Option<DuelOutcome>,
    ) -> Result<DuelRecord, StoreError>;

    /// Whether every named player exists.
    async fn players_exist(&self, players: &[&str]) -> Result<bool, StoreError>;

    /// A player's win/loss counters.
    async fn player_stats(&self, player: &str) -> Result<PlayerStats, StoreError>;
}
