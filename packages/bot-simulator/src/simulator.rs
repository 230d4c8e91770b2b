//! Runs all-bot matches through the real coordinator on the in-memory store.

use std::sync::Arc;
use std::time::Instant;

use cribbage_backend::domain::{snapshot, MatchId, MatchState, SeatKind};
use cribbage_backend::{AppError, CoordinatorConfig, InMemoryMatchStore, MatchCoordinator};

/// Final state of one simulated match.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub match_id: MatchId,
    pub seed: u64,
    pub bot_moves: u32,
    pub commits: u64,
    pub duration_ms: f64,
    pub state: MatchState,
}

pub struct Simulator {
    store: Arc<InMemoryMatchStore>,
    coordinator: MatchCoordinator,
}

impl Simulator {
    pub fn new(config: CoordinatorConfig) -> Self {
        let store = Arc::new(InMemoryMatchStore::new());
        let coordinator = MatchCoordinator::new(store.clone(), config);
        Self { store, coordinator }
    }

    /// Open a match with every seat a bot; the scheduler plays it to the end.
    pub async fn run_match(
        &self,
        match_id: MatchId,
        seats: Vec<SeatKind>,
        seed: u64,
    ) -> Result<MatchOutcome, AppError> {
        let started = Instant::now();
        let commits_before = self.store.commits();

        let opened = self.coordinator.open_match(match_id, seats, seed).await?;
        if let Some(code) = opened.bot_error {
            return Err(AppError::internal(
                code,
                format!("match {match_id}: bots stopped after {} moves", opened.bot_moves),
            ));
        }

        let stored = self.store.stored(match_id).ok_or_else(|| {
            AppError::state_unavailable(format!("match {match_id} missing after play"))
        })?;
        let state = snapshot::decode(&stored.snapshot, stored.version)?;
        if !state.is_finished() {
            return Err(AppError::state_unavailable(format!(
                "match {match_id} stopped in {:?} at version {}",
                state.stage, state.version
            )));
        }
        self.coordinator.evict(match_id);

        Ok(MatchOutcome {
            match_id,
            seed,
            bot_moves: opened.bot_moves,
            commits: self.store.commits().saturating_sub(commits_before),
            duration_ms: started.elapsed().as_secs_f64() * 1000.0,
            state,
        })
    }
}
