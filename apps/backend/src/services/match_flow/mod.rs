//! Match coordinator - keeps one authoritative in-memory copy per match
//! consistent with the durable store under concurrent writers.
//!
//! Each match id maps to its own `tokio::sync::Mutex` slot. Rule transitions
//! run on a deep copy outside the lock, then commit through a compare-and-swap
//! on the version the copy was taken at. Bot seats are driven after every
//! committed human move.

mod bot_turns;
mod intents;
mod mutation;
mod slots;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::config::coordinator::CoordinatorConfig;
use crate::domain::{MatchId, MatchState, ScoreEvent, Stage};
use crate::errors::ErrorCode;
use crate::repos::match_store::PersistenceGateway;

pub use intents::MatchIntent;

/// Outcome of a committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResult {
    /// Latest committed version, bot moves included.
    pub version: i64,
    /// Scoring events produced by the caller's move.
    pub events: Vec<ScoreEvent>,
    /// Stage after the caller's move and any bot moves that followed.
    pub stage: Stage,
    /// Bot moves committed by the scheduler after the caller's move.
    pub bot_moves: u32,
    /// Why the scheduler stopped early. The caller's move is committed
    /// regardless; pending bot turns can be resumed with `drive_bots`.
    pub bot_error: Option<ErrorCode>,
}

/// Explicitly constructed and shared by reference; there is no global instance.
pub struct MatchCoordinator {
    store: Arc<dyn PersistenceGateway>,
    slots: DashMap<MatchId, Arc<Mutex<MatchState>>>,
    config: CoordinatorConfig,
}

impl MatchCoordinator {
    pub fn new(store: Arc<dyn PersistenceGateway>, config: CoordinatorConfig) -> Self {
        Self {
            store,
            slots: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Number of matches currently held in memory.
    pub fn resident_matches(&self) -> usize {
        self.slots.len()
    }

    pub fn is_resident(&self, match_id: MatchId) -> bool {
        self.slots.contains_key(&match_id)
    }
}
