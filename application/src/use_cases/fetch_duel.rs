//! Fetch Duel use case.
//!
//! Read-only projections of stored duels. Fetching is pure: without an
//! intervening play action, two fetches yield identical views.

use crate::ports::duel_store::{DuelStore, StoreError};
use quizduel_domain::{project, DuelId, DuelView};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while fetching duels.
#[derive(Error, Debug)]
pub enum FetchDuelError {
    /// The duel does not exist or the requester is not a participant.
    #[error("Duel not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Use case for fetching formatted duel views.
pub struct FetchDuelUseCase {
    store: Arc<dyn DuelStore>,
}

impl FetchDuelUseCase {
    pub fn new(store: Arc<dyn DuelStore>) -> Self {
        Self { store }
    }

    /// Fetch one duel as seen by `player`.
    pub async fn get(&self, duel_id: DuelId, player: &str) -> Result<DuelView, FetchDuelError> {
        let record = self
            .store
            .get_duel(duel_id, player)
            .await?
            .ok_or(FetchDuelError::NotFound)?;
        project(&record, player).ok_or(FetchDuelError::NotFound)
    }

    /// Fetch all duels `player` participates in, ordered by id.
    pub async fn get_all(&self, player: &str) -> Result<Vec<DuelView>, FetchDuelError> {
        let mut records = self.store.get_all_duels(player).await?;
        records.sort_by_key(|record| record.id);
        let views: Vec<DuelView> = records
            .iter()
            .filter_map(|record| project(record, player))
            .collect();
        debug!(player, count = views.len(), "Fetched duels");
        Ok(views)
    }
}
