//! Viewer-specific duel projection.
//!
//! Pure function of the stored record, the viewer, and `current_round`:
//! the record is never mutated to "unlock" a tier. Per round, one of three
//! reveal tiers applies:
//!
//! | Round vs current | Visible |
//! |------------------|---------|
//! | below            | full content, good answer, both answer indices |
//! | equal, viewer played | full content, good answer, own answer; opponent answer once the opponent played too |
//! | equal, viewer pending | question content without good answer or answer indices |
//! | above            | type and title only |

use crate::duel::entities::DuelRecord;
use crate::duel::score::score;
use crate::question::entities::Question;
use serde::{Deserialize, Serialize};

/// One question as a given viewer is allowed to see it.
///
/// Absent fields are omitted from the serialized form, matching the staged
/// wire format consumed by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub question_type: u32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wording: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub good_answer: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opponent_answer: Option<usize>,
}

impl QuestionView {
    /// Tier for rounds not yet started: type and title only.
    fn title_only(question: &Question) -> Self {
        Self {
            question_type: question.question_type,
            title: question.title.clone(),
            subject: None,
            wording: None,
            answers: None,
            good_answer: None,
            user_answer: None,
            opponent_answer: None,
        }
    }

    /// Tier for the current round while the viewer has not submitted:
    /// question content without the good answer or anyone's answers.
    fn content_only(question: &Question) -> Self {
        Self {
            subject: Some(question.subject.clone()),
            wording: Some(question.wording.clone()),
            answers: Some(question.answers.clone()),
            ..Self::title_only(question)
        }
    }

    /// Fully revealed tier; `opponent_answer` stays hidden until the
    /// opponent has submitted as well.
    fn revealed(question: &Question, user_answer: usize, opponent_answer: Option<usize>) -> Self {
        Self {
            good_answer: Some(question.good_answer),
            user_answer: Some(user_answer),
            opponent_answer,
            ..Self::content_only(question)
        }
    }
}

/// A duel as seen by one participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuelView {
    pub id: u64,
    pub opponent: String,
    pub current_round: usize,
    pub in_progress: bool,
    pub user_score: usize,
    pub opponent_score: usize,
    pub rounds: Vec<Vec<QuestionView>>,
}

/// Project a stored duel into `viewer`'s view.
///
/// Returns `None` when `viewer` is not a participant; callers surface that
/// as a not-found rather than leaking the duel's existence.
pub fn project(record: &DuelRecord, viewer: &str) -> Option<DuelView> {
    let opponent = record.opponent_of(viewer).ok()?;
    let user_log = record.log_of(viewer);
    let opponent_log = record.log_of(opponent);

    let rounds = record
        .rounds
        .iter()
        .enumerate()
        .map(|(index, round)| {
            let round_number = index + 1;
            let reveal = |questions: &[Question]| {
                questions
                    .iter()
                    .enumerate()
                    .map(|(position, question)| {
                        QuestionView::revealed(
                            question,
                            user_log[index][position],
                            opponent_log.get(index).map(|set| set[position]),
                        )
                    })
                    .collect()
            };

            if round_number < record.current_round {
                return reveal(round.questions());
            }
            if round_number > record.current_round {
                return round.questions().iter().map(QuestionView::title_only).collect();
            }
            if user_log.len() >= record.current_round {
                reveal(round.questions())
            } else {
                round.questions().iter().map(QuestionView::content_only).collect()
            }
        })
        .collect();

    let scores = score(record, viewer);
    Some(DuelView {
        id: record.id,
        opponent: opponent.to_string(),
        current_round: record.current_round,
        in_progress: record.in_progress,
        user_score: scores.user,
        opponent_score: scores.opponent,
        rounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duel::entities::{DuelRecord, Round, QUESTIONS_PER_ROUND};

    fn round(question_type: u32) -> Round {
        let questions = (0..QUESTIONS_PER_ROUND)
            .map(|position| {
                Question::new(
                    question_type,
                    format!("title-{question_type}"),
                    format!("subject-{position}"),
                    format!("wording-{position}"),
                    vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    position % 4,
                )
            })
            .collect();
        Round::new(question_type, questions).unwrap()
    }

    fn duel() -> DuelRecord {
        DuelRecord::new(42, "alice", "bob", (1..=3).map(round).collect())
    }

    #[test]
    fn test_non_participant_gets_no_view() {
        assert!(project(&duel(), "mallory").is_none());
    }

    #[test]
    fn test_future_round_shows_title_only() {
        let record = duel();
        let view = project(&record, "alice").unwrap();
        let question = &view.rounds[2][0];
        assert_eq!(question.question_type, 3);
        assert_eq!(question.title, "title-3");
        assert!(question.subject.is_none());
        assert!(question.wording.is_none());
        assert!(question.answers.is_none());
        assert!(question.good_answer.is_none());
    }

    #[test]
    fn test_current_round_unplayed_hides_answers() {
        let record = duel();
        let view = project(&record, "alice").unwrap();
        let question = &view.rounds[0][0];
        assert!(question.subject.is_some());
        assert!(question.wording.is_some());
        assert!(question.answers.is_some());
        assert!(question.good_answer.is_none());
        assert!(question.user_answer.is_none());
        assert!(question.opponent_answer.is_none());
    }

    #[test]
    fn test_current_round_played_withholds_opponent_answers() {
        let mut record = duel();
        record
            .answers
            .get_mut("alice")
            .unwrap()
            .push(vec![0, 1, 2, 3, 0]);
        let view = project(&record, "alice").unwrap();
        let question = &view.rounds[0][1];
        assert_eq!(question.good_answer, Some(1));
        assert_eq!(question.user_answer, Some(1));
        assert!(question.opponent_answer.is_none());

        // The opponent has not played: they still only see question content.
        let opponent_view = project(&record, "bob").unwrap();
        assert!(opponent_view.rounds[0][1].good_answer.is_none());
        assert!(opponent_view.rounds[0][1].user_answer.is_none());
    }

    #[test]
    fn test_finished_round_reveals_both_answers() {
        let mut record = duel();
        record
            .answers
            .get_mut("alice")
            .unwrap()
            .push(vec![0, 1, 2, 3, 0]);
        record
            .answers
            .get_mut("bob")
            .unwrap()
            .push(vec![3, 2, 1, 0, 3]);
        record.current_round = 2;

        let view = project(&record, "bob").unwrap();
        let question = &view.rounds[0][0];
        assert_eq!(question.user_answer, Some(3));
        assert_eq!(question.opponent_answer, Some(0));
        assert_eq!(question.good_answer, Some(0));
        assert_eq!(view.opponent, "alice");
        // alice matched the key [0,1,2,3,0] on every position, bob on none
        assert_eq!(view.opponent_score, 5);
        assert_eq!(view.user_score, 0);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let mut record = duel();
        record
            .answers
            .get_mut("alice")
            .unwrap()
            .push(vec![0, 1, 2, 3, 0]);
        let first = project(&record, "alice").unwrap();
        let second = project(&record, "alice").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialized_view_omits_hidden_fields() {
        let record = duel();
        let view = project(&record, "alice").unwrap();
        let json = serde_json::to_value(&view).unwrap();
        let future_question = &json["rounds"][2][0];
        assert!(future_question.get("goodAnswer").is_none());
        assert!(future_question.get("answers").is_none());
        assert_eq!(future_question["questionType"], 3);
        assert_eq!(json["currentRound"], 1);
    }
}
