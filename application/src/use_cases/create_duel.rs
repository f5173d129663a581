//! Create Duel use case.
//!
//! Composes a new duel: a shuffled worklist of question types is consumed
//! one type at a time, each successful type becoming one round. Types whose
//! content runs out are discarded and never retried; the composition only
//! fails once the worklist is exhausted before enough rounds exist.

use crate::config::DuelRules;
use crate::ports::duel_store::{DuelStore, StoreError};
use crate::ports::question_source::{QuestionSource, SourceError, INSUFFICIENT_DATA_CODE};
use futures::future::try_join_all;
use quizduel_domain::{DuelId, Round};
use rand::seq::SliceRandom;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during duel creation.
#[derive(Error, Debug)]
pub enum CreateDuelError {
    #[error("You can't challenge yourself")]
    SelfChallenge,

    #[error("Opponent not found")]
    OpponentNotFound,

    /// Too few question types could produce a full round. Carries the
    /// stable machine code so clients can distinguish it from faults.
    #[error("Not enough data to generate the duel ({INSUFFICIENT_DATA_CODE})")]
    InsufficientData,

    #[error("Question source failure: {0}")]
    Source(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Input for the [`CreateDuelUseCase`].
#[derive(Debug, Clone)]
pub struct CreateDuelInput {
    /// The player issuing the challenge.
    pub challenger: String,
    /// The player being challenged.
    pub opponent: String,
}

impl CreateDuelInput {
    pub fn new(challenger: impl Into<String>, opponent: impl Into<String>) -> Self {
        Self {
            challenger: challenger.into(),
            opponent: opponent.into(),
        }
    }
}

/// Use case for creating a duel.
///
/// Flow:
/// 1. Reject self-challenges and unknown players
/// 2. Compose rounds from a shuffled type worklist (see [`compose_rounds`])
/// 3. Persist the duel and return its id
pub struct CreateDuelUseCase {
    source: Arc<dyn QuestionSource>,
    store: Arc<dyn DuelStore>,
    rules: DuelRules,
}

impl CreateDuelUseCase {
    pub fn new(source: Arc<dyn QuestionSource>, store: Arc<dyn DuelStore>) -> Self {
        Self {
            source,
            store,
            rules: DuelRules::default(),
        }
    }

    /// Override the composition rules (tests shrink the type pool).
    pub fn with_rules(mut self, rules: DuelRules) -> Self {
        self.rules = rules;
        self
    }

    /// Execute the creation and return the new duel's id.
    pub async fn execute(&self, input: CreateDuelInput) -> Result<DuelId, CreateDuelError> {
        if input.challenger == input.opponent {
            return Err(CreateDuelError::SelfChallenge);
        }
        let participants = [input.challenger.as_str(), input.opponent.as_str()];
        if !self.store.players_exist(&participants).await? {
            return Err(CreateDuelError::OpponentNotFound);
        }

        let rounds = self.compose_rounds().await?;
        let id = self
            .store
            .create_duel(&input.challenger, &input.opponent, rounds)
            .await?;

        info!(
            duel_id = id,
            challenger = %input.challenger,
            opponent = %input.opponent,
            "Duel created"
        );
        Ok(id)
    }

    /// Compose the full set of rounds for a new duel.
    ///
    /// The worklist starts as a uniformly shuffled permutation of all
    /// question types, so each type is attempted at most once and no two
    /// rounds can share a type.
    async fn compose_rounds(&self) -> Result<Vec<Round>, CreateDuelError> {
        let mut types: Vec<u32> = (1..=self.rules.max_question_type).collect();
        types.shuffle(&mut rand::thread_rng());

        let mut rounds = Vec::with_capacity(self.rules.rounds_per_duel);
        while rounds.len() < self.rules.rounds_per_duel {
            let Some(question_type) = types.pop() else {
                warn!("Question types exhausted before the duel was complete");
                return Err(CreateDuelError::InsufficientData);
            };
            match self.build_round(question_type).await {
                Ok(round) => rounds.push(round),
                Err(SourceError::InsufficientData) => {
                    debug!(question_type, "Type abandoned: not enough data for a round");
                }
                Err(SourceError::Backend(message)) => {
                    return Err(CreateDuelError::Source(message));
                }
            }
        }
        Ok(rounds)
    }

    /// Build one round of the given type, requesting all questions
    /// concurrently. Any generation failure fails the whole round.
    async fn build_round(&self, question_type: u32) -> Result<Round, SourceError> {
        let questions = try_join_all(
            (0..self.rules.questions_per_round).map(|_| self.source.generate(question_type)),
        )
        .await?;
        // The source answered for this type, so homogeneity can only fail
        // on a misbehaving adapter; surface it as a backend fault.
        Round::new(question_type, questions)
            .map_err(|error| SourceError::Backend(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quizduel_domain::{
        DuelOutcome, DuelRecord, PlayerStats, Question, QUESTIONS_PER_ROUND,
    };
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    /// Source that succeeds for the allowed types and reports
    /// InsufficientData for every other type.
    struct MockSource {
        fertile_types: HashSet<u32>,
        calls: AtomicU64,
    }

    impl MockSource {
        fn new(fertile_types: impl IntoIterator<Item = u32>) -> Self {
            Self {
                fertile_types: fertile_types.into_iter().collect(),
                calls: AtomicU64::new(0),
            }
        }
    }

    #[async_trait]
    impl QuestionSource for MockSource {
        async fn generate(&self, question_type: u32) -> Result<Question, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.fertile_types.contains(&question_type) {
                return Err(SourceError::InsufficientData);
            }
            Ok(Question::new(
                question_type,
                format!("title-{question_type}"),
                "subject",
                "wording",
                vec!["a".into(), "b".into(), "c".into(), "d".into()],
                0,
            ))
        }
    }

    /// Store that records created duels and knows a fixed player set.
    struct RecordingStore {
        players: HashSet<String>,
        created: Mutex<Vec<(String, String, Vec<Round>)>>,
    }

    impl RecordingStore {
        fn new(players: &[&str]) -> Self {
            Self {
                players: players.iter().map(|p| p.to_string()).collect(),
                created: Mutex::new(Vec::new()),
            }
        }

        fn created_rounds(&self) -> Vec<Vec<Round>> {
            self.created
                .lock()
                .unwrap()
                .iter()
                .map(|(_, _, rounds)| rounds.clone())
                .collect()
        }
    }

    #[async_trait]
    impl DuelStore for RecordingStore {
        async fn create_duel(
            &self,
            challenger: &str,
            opponent: &str,
            rounds: Vec<Round>,
        ) -> Result<DuelId, StoreError> {
            let mut created = self.created.lock().unwrap();
            created.push((challenger.to_string(), opponent.to_string(), rounds));
            Ok(created.len() as DuelId)
        }

        async fn get_duel(
            &self,
            _id: DuelId,
            _requester: &str,
        ) -> Result<Option<DuelRecord>, StoreError> {
            Ok(None)
        }

        async fn get_all_duels(&self, _player: &str) -> Result<Vec<DuelRecord>, StoreError> {
            Ok(Vec::new())
        }

        async fn append_answers(
            &self,
            _id: DuelId,
            _player: &str,
            _round_number: usize,
            _answers: Vec<usize>,
        ) -> Result<DuelRecord, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn advance_round(
            &self,
            _id: DuelId,
            _new_round: usize,
        ) -> Result<DuelRecord, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn finish_duel(
            &self,
            _id: DuelId,
            _outcome: Option<DuelOutcome>,
        ) -> Result<DuelRecord, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn players_exist(&self, players: &[&str]) -> Result<bool, StoreError> {
            Ok(players.iter().all(|p| self.players.contains(*p)))
        }

        async fn player_stats(&self, _player: &str) -> Result<PlayerStats, StoreError> {
            Ok(PlayerStats::default())
        }
    }

    fn use_case(source: Arc<MockSource>, store: Arc<RecordingStore>) -> CreateDuelUseCase {
        CreateDuelUseCase::new(source, store)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_composed_duel_has_distinct_full_rounds() {
        let source = Arc::new(MockSource::new(1..=10));
        let store = Arc::new(RecordingStore::new(&["alice", "bob"]));
        let use_case = use_case(source, store.clone());

        let id = use_case
            .execute(CreateDuelInput::new("alice", "bob"))
            .await
            .unwrap();
        assert_eq!(id, 1);

        let created = store.created_rounds();
        assert_eq!(created.len(), 1);
        let rounds = &created[0];
        assert_eq!(rounds.len(), 5);
        for round in rounds {
            assert_eq!(round.questions().len(), QUESTIONS_PER_ROUND);
            assert!(round
                .questions()
                .iter()
                .all(|q| q.question_type == round.question_type()));
        }
        let types: HashSet<u32> = rounds.iter().map(|r| r.question_type()).collect();
        assert_eq!(types.len(), 5, "round types must be pairwise distinct");
    }

    #[tokio::test]
    async fn test_failing_types_are_skipped() {
        // Exactly five fertile types among ten: every barren draw must be
        // skipped and composition must still succeed.
        let source = Arc::new(MockSource::new([2, 4, 6, 8, 10]));
        let store = Arc::new(RecordingStore::new(&["alice", "bob"]));
        let use_case = use_case(source, store.clone());

        use_case
            .execute(CreateDuelInput::new("alice", "bob"))
            .await
            .unwrap();

        let rounds = store.created_rounds().remove(0);
        let types: HashSet<u32> = rounds.iter().map(|r| r.question_type()).collect();
        assert_eq!(types, HashSet::from([2, 4, 6, 8, 10]));
    }

    #[tokio::test]
    async fn test_exhausted_pool_fails_without_persisting() {
        let source = Arc::new(MockSource::new([1, 2, 3, 4]));
        let store = Arc::new(RecordingStore::new(&["alice", "bob"]));
        let use_case = use_case(source, store.clone());

        let result = use_case.execute(CreateDuelInput::new("alice", "bob")).await;
        assert!(matches!(result, Err(CreateDuelError::InsufficientData)));
        assert!(store.created_rounds().is_empty(), "nothing may be persisted");
    }

    #[tokio::test]
    async fn test_small_pool_rules_still_compose() {
        let source = Arc::new(MockSource::new([1, 3]));
        let store = Arc::new(RecordingStore::new(&["alice", "bob"]));
        let rules = DuelRules::default()
            .with_rounds_per_duel(2)
            .with_max_question_type(3);
        let use_case = use_case(source, store.clone()).with_rules(rules);

        use_case
            .execute(CreateDuelInput::new("alice", "bob"))
            .await
            .unwrap();
        assert_eq!(store.created_rounds()[0].len(), 2);
    }

    #[tokio::test]
    async fn test_self_challenge_is_rejected() {
        let source = Arc::new(MockSource::new(1..=10));
        let store = Arc::new(RecordingStore::new(&["alice", "bob"]));
        let use_case = use_case(source.clone(), store);

        let result = use_case
            .execute(CreateDuelInput::new("alice", "alice"))
            .await;
        assert!(matches!(result, Err(CreateDuelError::SelfChallenge)));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_opponent_is_rejected() {
        let source = Arc::new(MockSource::new(1..=10));
        let store = Arc::new(RecordingStore::new(&["alice"]));
        let use_case = use_case(source, store);

        let result = use_case
            .execute(CreateDuelInput::new("alice", "nobody"))
            .await;
        assert!(matches!(result, Err(CreateDuelError::OpponentNotFound)));
    }

    #[tokio::test]
    async fn test_backend_fault_is_not_swallowed() {
        struct FaultySource;

        #[async_trait]
        impl QuestionSource for FaultySource {
            async fn generate(&self, _question_type: u32) -> Result<Question, SourceError> {
                Err(SourceError::Backend("db down".to_string()))
            }
        }

        let store = Arc::new(RecordingStore::new(&["alice", "bob"]));
        let use_case = CreateDuelUseCase::new(Arc::new(FaultySource), store);

        let result = use_case.execute(CreateDuelInput::new("alice", "bob")).await;
        assert!(matches!(result, Err(CreateDuelError::Source(_))));
    }
}
