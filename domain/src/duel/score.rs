//! Cumulative duel scoring.
//!
//! A round contributes to the score exactly when **both** answer logs
//! contain it. Because `current_round` only advances after both players
//! have answered, this covers every round below the current one, the
//! current round during the brief both-answered window before it advances,
//! and all rounds of a finished duel.

use crate::duel::entities::DuelRecord;

/// Scores from the point of view of one participant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub user: usize,
    pub opponent: usize,
}

impl Scores {
    pub fn is_tie(&self) -> bool {
        self.user == self.opponent
    }
}

/// Compute both players' cumulative scores as seen by `viewer`.
///
/// One point per question where the submitted answer index equals the
/// question's good answer; no partial credit. Rounds only one player has
/// answered are excluded, so a player never sees a provisional lead built
/// on an opponent's unplayed round.
pub fn score(record: &DuelRecord, viewer: &str) -> Scores {
    let Ok(opponent) = record.opponent_of(viewer) else {
        return Scores::default();
    };
    let user_log = record.log_of(viewer);
    let opponent_log = record.log_of(opponent);
    let revealed = user_log.len().min(opponent_log.len());

    let mut scores = Scores::default();
    for (index, round) in record.rounds.iter().take(revealed).enumerate() {
        for (position, question) in round.questions().iter().enumerate() {
            if user_log[index].get(position) == Some(&question.good_answer) {
                scores.user += 1;
            }
            if opponent_log[index].get(position) == Some(&question.good_answer) {
                scores.opponent += 1;
            }
        }
    }
    scores
}
