//! Play Round use case.
//!
//! The duel state machine: validates a round submission, records the
//! answers, and drives the `Created → InProgress(round) → Finished`
//! progression. `current_round` is the single authoritative gate; it only
//! moves after a validated submission completes a round for both players.

use crate::ports::duel_store::{DuelStore, StoreError};
use quizduel_domain::{project, score, DuelId, DuelOutcome, DuelRecord, DuelView};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when playing a round.
///
/// All variants except `Store` are usage errors from malformed or
/// out-of-order play actions; none are retried.
#[derive(Error, Debug)]
pub enum PlayRoundError {
    #[error("Duel not found")]
    NotFound,

    #[error("This duel is finished")]
    DuelFinished,

    #[error("Invalid duel round {got}, current round is {expected}")]
    InvalidRound { expected: usize, got: usize },

    #[error("You can only play a round once")]
    AlreadyPlayed,

    #[error("Incorrect number of answers: expected {expected}, got {got}")]
    InvalidAnswers { expected: usize, got: usize },

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for PlayRoundError {
    fn from(error: StoreError) -> Self {
        match error {
            // The atomic append lost to a concurrent submission by the
            // same player; to the caller that is a duplicate play.
            StoreError::Conflict => PlayRoundError::AlreadyPlayed,
            StoreError::NotFound => PlayRoundError::NotFound,
            other => PlayRoundError::Store(other),
        }
    }
}

/// Input for the [`PlayRoundUseCase`].
#[derive(Debug, Clone)]
pub struct PlayRoundInput {
    pub duel_id: DuelId,
    pub player: String,
    /// 1-based round number the player believes they are answering.
    pub round_number: usize,
    /// One answer index per question of the round.
    pub answers: Vec<usize>,
}

impl PlayRoundInput {
    pub fn new(
        duel_id: DuelId,
        player: impl Into<String>,
        round_number: usize,
        answers: Vec<usize>,
    ) -> Self {
        Self {
            duel_id,
            player: player.into(),
            round_number,
            answers,
        }
    }
}

/// Use case for submitting a round's answers.
///
/// Validation order (first failing check wins): duel exists → duel still in
/// progress → round number is the current round → player has not already
/// played it → answer count matches the round size. On success the store
/// appends atomically; once both players hold the round, the duel either
/// advances or, on the last round, finishes with win/loss bookkeeping.
pub struct PlayRoundUseCase {
    store: Arc<dyn DuelStore>,
}

impl PlayRoundUseCase {
    pub fn new(store: Arc<dyn DuelStore>) -> Self {
        Self { store }
    }

    /// Execute the submission and return the player's updated view.
    pub async fn execute(&self, input: PlayRoundInput) -> Result<DuelView, PlayRoundError> {
        let duel = self
            .store
            .get_duel(input.duel_id, &input.player)
            .await?
            .ok_or(PlayRoundError::NotFound)?;

        self.validate(&duel, &input)?;

        let updated = self
            .store
            .append_answers(
                input.duel_id,
                &input.player,
                input.round_number,
                input.answers.clone(),
            )
            .await?;

        let settled = self.settle(&updated, &input).await?;

        debug!(
            duel_id = input.duel_id,
            player = %input.player,
            round = input.round_number,
            current_round = settled.current_round,
            in_progress = settled.in_progress,
            "Round submission applied"
        );

        project(&settled, &input.player).ok_or(PlayRoundError::NotFound)
    }

    fn validate(&self, duel: &DuelRecord, input: &PlayRoundInput) -> Result<(), PlayRoundError> {
        if !duel.in_progress {
            return Err(PlayRoundError::DuelFinished);
        }
        if input.round_number != duel.current_round {
            return Err(PlayRoundError::InvalidRound {
                expected: duel.current_round,
                got: input.round_number,
            });
        }
        if duel.has_played(&input.player, input.round_number) {
            return Err(PlayRoundError::AlreadyPlayed);
        }
        let expected = duel
            .rounds
            .get(input.round_number - 1)
            .map(|round| round.questions().len())
            .unwrap_or(0);
        if input.answers.len() != expected {
            return Err(PlayRoundError::InvalidAnswers {
                expected,
                got: input.answers.len(),
            });
        }
        Ok(())
    }

    /// Advance or finish the duel once both players hold the round.
    async fn settle(
        &self,
        updated: &DuelRecord,
        input: &PlayRoundInput,
    ) -> Result<DuelRecord, PlayRoundError> {
        if !updated.both_played(input.round_number) {
            return Ok(updated.clone());
        }

        if updated.is_last_round(input.round_number) {
            let scores = score(updated, &input.player);
            let outcome = if scores.is_tie() {
                None
            } else {
                let opponent = updated
                    .opponent_of(&input.player)
                    .map_err(|_| PlayRoundError::NotFound)?;
                let (winner, loser) = if scores.user > scores.opponent {
                    (input.player.clone(), opponent.to_string())
                } else {
                    (opponent.to_string(), input.player.clone())
                };
                Some(DuelOutcome { winner, loser })
            };
            info!(
                duel_id = input.duel_id,
                user_score = scores.user,
                opponent_score = scores.opponent,
                tie = outcome.is_none(),
                "Duel finished"
            );
            return Ok(self.store.finish_duel(input.duel_id, outcome).await?);
        }

        Ok(self
            .store
            .advance_round(input.duel_id, input.round_number + 1)
            .await?)
    }
}
