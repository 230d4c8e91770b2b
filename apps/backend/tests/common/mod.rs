#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;

use cribbage_backend::domain::{Difficulty, MatchId, PlayerView, SeatKind, Stage};
use cribbage_backend::{
    AppError, CoordinatorConfig, InMemoryMatchStore, MatchCoordinator, MatchIntent,
};

pub mod proptest_prelude;

// Logging is auto-installed for every test binary that includes this module
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub fn humans(n: usize) -> Vec<SeatKind> {
    vec![SeatKind::Human; n]
}

pub fn bot(difficulty: Difficulty) -> SeatKind {
    SeatKind::Bot(difficulty)
}

/// Coordinator over a fresh in-memory store, with the store kept for inspection.
pub fn memory_coordinator(config: CoordinatorConfig) -> (Arc<InMemoryMatchStore>, MatchCoordinator) {
    let store = Arc::new(InMemoryMatchStore::new());
    let coordinator = MatchCoordinator::new(store.clone(), config);
    (store, coordinator)
}

/// Coordinator config that keeps finished matches resident.
pub fn keep_finished() -> CoordinatorConfig {
    CoordinatorConfig {
        evict_finished: false,
        ..CoordinatorConfig::default()
    }
}

/// The intent a simple human player would send next: discard the first
/// cards in hand, play the first legal card, or go.
pub fn simple_intent(view: &PlayerView, discard_count: usize) -> Option<MatchIntent> {
    match view.stage {
        Stage::Discard => Some(MatchIntent::Discard {
            cards: view.hand[..discard_count].to_vec(),
        }),
        Stage::Pegging => Some(match view.legal_plays.first() {
            Some(card) => MatchIntent::PlayCard { card: *card },
            None => MatchIntent::Go,
        }),
        Stage::Dealing | Stage::Counting | Stage::Finished => None,
    }
}

/// Invariants checked after every committed move of a played-out match.
#[derive(Debug, Default)]
pub struct PlayLog {
    pub moves: u32,
    pub versions: Vec<i64>,
    pub max_total: u8,
}

/// Drive an all-human match to completion with `simple_intent`, checking the
/// public invariants between moves.
pub async fn play_out_humans(
    coordinator: &MatchCoordinator,
    match_id: MatchId,
    seat_count: usize,
    max_moves: u32,
) -> Result<PlayLog, AppError> {
    let discard_count = if seat_count == 2 { 2 } else { 1 };
    let mut log = PlayLog::default();
    let mut scores = vec![0u16; seat_count];

    loop {
        let table = coordinator.snapshot(match_id, 0).await?;
        for (before, after) in scores.iter().zip(&table.scores) {
            assert!(after >= before, "scores never decrease");
        }
        scores.clone_from(&table.scores);
        assert!(table.pegging_total <= 31);
        log.max_total = log.max_total.max(table.pegging_total);

        let Some(seat) = table.to_act else {
            assert_eq!(table.stage, Stage::Finished);
            return Ok(log);
        };
        assert!(log.moves < max_moves, "match did not finish in {max_moves} moves");

        let view = coordinator.snapshot(match_id, seat).await?;
        let Some(intent) = simple_intent(&view, discard_count) else {
            panic!("seat {seat} to act in {:?}", view.stage);
        };
        let result = coordinator.apply_mutation(match_id, seat, intent).await?;
        assert_eq!(result.version, view.version + 1, "one commit per move");
        log.versions.push(result.version);
        log.moves += 1;
    }
}
