//! Duel domain entities

use crate::core::error::DomainError;
use crate::question::entities::Question;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of rounds in a duel
pub const ROUNDS_PER_DUEL: usize = 5;
/// Number of questions in a round
pub const QUESTIONS_PER_ROUND: usize = 5;
/// Highest question type; types are numbered `1..=MAX_QUESTION_TYPE`
pub const MAX_QUESTION_TYPE: u32 = 10;

/// Duel identifier assigned by the store
pub type DuelId = u64;

/// Ordered answer sets of one player, one entry per round played.
///
/// Append-only: its length equals the number of rounds the player has
/// completed and never exceeds the duel's current round.
pub type AnswerLog = Vec<Vec<usize>>;

/// A round: a fixed-size batch of questions sharing one type (Entity)
///
/// Round content is immutable; only the answers submitted against a round
/// change over time, and those live in the per-player [`AnswerLog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    question_type: u32,
    questions: Vec<Question>,
}

impl Round {
    /// Build a round, enforcing the question count and type homogeneity.
    pub fn new(question_type: u32, questions: Vec<Question>) -> Result<Self, DomainError> {
        if questions.len() != QUESTIONS_PER_ROUND {
            return Err(DomainError::WrongQuestionCount {
                expected: QUESTIONS_PER_ROUND,
                got: questions.len(),
            });
        }
        if let Some(other) = questions
            .iter()
            .find(|q| q.question_type != question_type)
        {
            return Err(DomainError::MixedQuestionTypes {
                expected: question_type,
                found: other.question_type,
            });
        }
        Ok(Self {
            question_type,
            questions,
        })
    }

    pub fn question_type(&self) -> u32 {
        self.question_type
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

/// Final outcome of a duel with unequal scores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuelOutcome {
    pub winner: String,
    pub loser: String,
}

/// Per-player win/loss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub victories: u64,
    pub defeats: u64,
}

/// The duel aggregate (Entity)
///
/// Owned exclusively by the store: the state machine and the projector only
/// operate on transient copies, and every mutation goes through a store
/// write. `current_round` is 1-based and is the single gate for round
/// progression; it stays at the last round once the duel finishes, only
/// `in_progress` flips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelRecord {
    pub id: DuelId,
    pub players: [String; 2],
    pub rounds: Vec<Round>,
    pub current_round: usize,
    pub in_progress: bool,
    pub answers: HashMap<String, AnswerLog>,
    pub created_at: DateTime<Utc>,
}

impl DuelRecord {
    /// Create a freshly composed duel at round 1 with empty answer logs.
    pub fn new(
        id: DuelId,
        challenger: impl Into<String>,
        opponent: impl Into<String>,
        rounds: Vec<Round>,
    ) -> Self {
        let challenger = challenger.into();
        let opponent = opponent.into();
        let answers = HashMap::from([
            (challenger.clone(), AnswerLog::new()),
            (opponent.clone(), AnswerLog::new()),
        ]);
        Self {
            id,
            players: [challenger, opponent],
            rounds,
            current_round: 1,
            in_progress: true,
            answers,
            created_at: Utc::now(),
        }
    }

    pub fn is_participant(&self, player: &str) -> bool {
        self.players.iter().any(|p| p == player)
    }

    /// The other participant, if `player` is one of the two.
    pub fn opponent_of<'a>(&'a self, player: &'a str) -> Result<&'a str, DomainError> {
        if !self.is_participant(player) {
            return Err(DomainError::NotAParticipant(player.to_string()));
        }
        let other = self
            .players
            .iter()
            .find(|p| p.as_str() != player)
            .map(String::as_str)
            // Both slots hold the same name only for malformed records;
            // self-challenges are rejected at creation.
            .unwrap_or(player);
        Ok(other)
    }

    /// A player's answer log; empty for non-participants.
    pub fn log_of(&self, player: &str) -> &[Vec<usize>] {
        self.answers.get(player).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `player` has submitted answers for `round_number` (1-based).
    pub fn has_played(&self, player: &str, round_number: usize) -> bool {
        self.log_of(player).len() >= round_number
    }

    /// Whether both participants have submitted answers for `round_number`.
    pub fn both_played(&self, round_number: usize) -> bool {
        self.players
            .iter()
            .all(|p| self.has_played(p, round_number))
    }

    pub fn is_last_round(&self, round_number: usize) -> bool {
        round_number == self.rounds.len()
    }
}
