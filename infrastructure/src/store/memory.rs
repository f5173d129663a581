//! In-memory duel store.
//!
//! Adapter implementing the [`DuelStore`] port without external storage.
//! Every duel sits behind its own mutex, so mutations on one duel are
//! serialized (upholding at-most-once submission and round gating under
//! concurrent play) while unrelated duels proceed in parallel.

use async_trait::async_trait;
use quizduel_application::ports::duel_store::{DuelStore, StoreError};
use quizduel_domain::{DuelId, DuelOutcome, DuelRecord, PlayerStats, Round};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// In-memory [`DuelStore`] implementation.
///
/// Player registration (`with_players`, `register_player`) is local to this
/// adapter; the port only ever asks whether players exist.
#[derive(Default)]
pub struct MemoryDuelStore {
    next_id: AtomicU64,
    duels: RwLock<HashMap<DuelId, Arc<Mutex<DuelRecord>>>>,
    players: RwLock<HashMap<String, PlayerStats>>,
}

impl MemoryDuelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct with a known player set.
    pub async fn with_players(players: impl IntoIterator<Item = &str>) -> Self {
        let store = Self::new();
        for player in players {
            store.register_player(player).await;
        }
        store
    }

    /// Register a player with zeroed win/loss counters.
    pub async fn register_player(&self, player: &str) {
        self.players
            .write()
            .await
            .entry(player.to_string())
            .or_default();
    }

    async fn duel_handle(&self, id: DuelId) -> Result<Arc<Mutex<DuelRecord>>, StoreError> {
        self.duels
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl DuelStore for MemoryDuelStore {
    async fn create_duel(
        &self,
        challenger: &str,
        opponent: &str,
        rounds: Vec<Round>,
    ) -> Result<DuelId, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = DuelRecord::new(id, challenger, opponent, rounds);
        self.duels
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(record)));
        debug!(duel_id = id, challenger, opponent, "Duel stored");
        Ok(id)
    }

    async fn get_duel(
        &self,
        id: DuelId,
        requester: &str,
    ) -> Result<Option<DuelRecord>, StoreError> {
        let Some(handle) = self.duels.read().await.get(&id).cloned() else {
            return Ok(None);
        };
        let duel = handle.lock().await;
        // Non-participants get the same answer as a missing duel.
        Ok(duel.is_participant(requester).then(|| duel.clone()))
    }

    async fn get_all_duels(&self, player: &str) -> Result<Vec<DuelRecord>, StoreError> {
        let handles: Vec<_> = self.duels.read().await.values().cloned().collect();
        let mut records = Vec::new();
        for handle in handles {
            let duel = handle.lock().await;
            if duel.is_participant(player) {
                records.push(duel.clone());
            }
        }
        Ok(records)
    }

    async fn append_answers(
        &self,
        id: DuelId,
        player: &str,
        round_number: usize,
        answers: Vec<usize>,
    ) -> Result<DuelRecord, StoreError> {
        let handle = self.duel_handle(id).await?;
        let mut duel = handle.lock().await;
        let log = duel.answers.get_mut(player).ok_or(StoreError::NotFound)?;
        // Check and append under the duel lock: two submissions by the
        // same player for the same round cannot both pass.
        if log.len() >= round_number {
            return Err(StoreError::Conflict);
        }
        log.push(answers);
        Ok(duel.clone())
    }

    async fn advance_round(&self, id: DuelId, new_round: usize) -> Result<DuelRecord, StoreError> {
        let handle = self.duel_handle(id).await?;
        let mut duel = handle.lock().await;
        duel.current_round = new_round;
        Ok(duel.clone())
    }

    async fn finish_duel(
        &self,
        id: DuelId,
        outcome: Option<DuelOutcome>,
    ) -> Result<DuelRecord, StoreError> {
        let handle = self.duel_handle(id).await?;
        let mut duel = handle.lock().await;
        duel.in_progress = false;
        if let Some(DuelOutcome { winner, loser }) = outcome {
            let mut players = self.players.write().await;
            players.entry(winner).or_default().victories += 1;
            players.entry(loser).or_default().defeats += 1;
        }
        Ok(duel.clone())
    }

    async fn players_exist(&self, players: &[&str]) -> Result<bool, StoreError> {
        let known = self.players.read().await;
        Ok(players.iter().all(|p| known.contains_key(*p)))
    }

    async fn player_stats(&self, player: &str) -> Result<PlayerStats, StoreError> {
        self.players
            .read()
            .await
            .get(player)
            .copied()
            .ok_or(StoreError::NotFound)
    }
}
