//! Duel composition rules — use case tunables.
//!
//! [`DuelRules`] groups the static parameters that shape a duel. Production
//! uses the domain defaults (5 rounds of 5 questions drawn from 10 types);
//! tests shrink the pool to exercise exhaustion paths.

use quizduel_domain::{MAX_QUESTION_TYPE, QUESTIONS_PER_ROUND, ROUNDS_PER_DUEL};
use serde::{Deserialize, Serialize};

/// Structural parameters of a duel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DuelRules {
    /// Number of rounds composed per duel.
    pub rounds_per_duel: usize,
    /// Number of questions requested per round.
    pub questions_per_round: usize,
    /// Highest question type; composition shuffles `1..=max_question_type`.
    pub max_question_type: u32,
}

impl Default for DuelRules {
    fn default() -> Self {
        Self {
            rounds_per_duel: ROUNDS_PER_DUEL,
            questions_per_round: QUESTIONS_PER_ROUND,
            max_question_type: MAX_QUESTION_TYPE,
        }
    }
}

impl DuelRules {
    pub fn with_rounds_per_duel(mut self, rounds: usize) -> Self {
        self.rounds_per_duel = rounds;
        self
    }

    pub fn with_questions_per_round(mut self, questions: usize) -> Self {
        self.questions_per_round = questions;
        self
    }

    pub fn with_max_question_type(mut self, max: u32) -> Self {
        self.max_question_type = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_domain_constants() {
        let rules = DuelRules::default();
        assert_eq!(rules.rounds_per_duel, 5);
        assert_eq!(rules.questions_per_round, 5);
        assert_eq!(rules.max_question_type, 10);
    }

    #[test]
    fn test_builder_methods() {
        let rules = DuelRules::default()
            .with_rounds_per_duel(2)
            .with_max_question_type(3);
        assert_eq!(rules.rounds_per_duel, 2);
        assert_eq!(rules.max_question_type, 3);
    }
}
