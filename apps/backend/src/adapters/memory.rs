//! In-process `PersistenceGateway` for tests and the bot simulator.
//!
//! Rows live in a `parking_lot::Mutex<HashMap>`; the guard is never held
//! across an await. Test hooks inject conflicts, latency, and raw rows.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{Card, MatchId, Seat};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::match_store::{CasOutcome, PersistenceGateway, StoredMatch};

#[derive(Default)]
pub struct InMemoryMatchStore {
    snapshots: Mutex<HashMap<MatchId, StoredMatch>>,
    seat_hands: Mutex<HashMap<(MatchId, Seat), Vec<Card>>>,
    forced_conflicts: AtomicU32,
    fail_seat_hands: AtomicBool,
    cas_delay_ms: AtomicU64,
    cas_calls: AtomicU64,
    commits: AtomicU64,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `n` compare-and-swap calls report a conflict without writing.
    pub fn force_conflicts(&self, n: u32) {
        self.forced_conflicts.store(n, Ordering::SeqCst);
    }

    /// Make every seat-hand write fail.
    pub fn fail_seat_hand_writes(&self, fail: bool) {
        self.fail_seat_hands.store(fail, Ordering::SeqCst);
    }

    /// Sleep before each compare-and-swap, widening race windows.
    pub fn set_cas_delay(&self, delay: Duration) {
        let ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.cas_delay_ms.store(ms, Ordering::SeqCst);
    }

    /// Store a row verbatim, bypassing the version check.
    pub fn put_raw(&self, match_id: MatchId, snapshot: impl Into<String>, version: i64) {
        self.snapshots.lock().insert(
            match_id,
            StoredMatch {
                snapshot: snapshot.into(),
                version,
            },
        );
    }

    /// Store a seat hand with no accompanying snapshot write.
    pub fn put_seat_hand(&self, match_id: MatchId, seat: Seat, hand: Vec<Card>) {
        self.seat_hands.lock().insert((match_id, seat), hand);
    }

    pub fn stored(&self, match_id: MatchId) -> Option<StoredMatch> {
        self.snapshots.lock().get(&match_id).cloned()
    }

    pub fn seat_hand(&self, match_id: MatchId, seat: Seat) -> Option<Vec<Card>> {
        self.seat_hands.lock().get(&(match_id, seat)).cloned()
    }

    pub fn cas_calls(&self) -> u64 {
        self.cas_calls.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> u64 {
        self.commits.load(Ordering::SeqCst)
    }

    fn take_forced_conflict(&self) -> bool {
        self.forced_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryMatchStore {
    async fn load(&self, match_id: MatchId) -> Result<Option<StoredMatch>, DomainError> {
        Ok(self.snapshots.lock().get(&match_id).cloned())
    }

    async fn compare_and_swap(
        &self,
        match_id: MatchId,
        expected_version: i64,
        snapshot: String,
    ) -> Result<CasOutcome, DomainError> {
        self.cas_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.cas_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let mut rows = self.snapshots.lock();
        if self.take_forced_conflict() {
            let actual = rows.get(&match_id).map(|r| r.version).unwrap_or(0);
            return Ok(CasOutcome::VersionConflict { actual });
        }

        let outcome = match rows.get_mut(&match_id) {
            Some(row) if row.version == expected_version => {
                row.version += 1;
                row.snapshot = snapshot;
                CasOutcome::Committed {
                    version: row.version,
                }
            }
            Some(row) => CasOutcome::VersionConflict {
                actual: row.version,
            },
            None if expected_version == 0 => {
                rows.insert(
                    match_id,
                    StoredMatch {
                        snapshot,
                        version: 1,
                    },
                );
                CasOutcome::Committed { version: 1 }
            }
            None => CasOutcome::NotFound,
        };
        if matches!(outcome, CasOutcome::Committed { .. }) {
            self.commits.fetch_add(1, Ordering::SeqCst);
        }
        Ok(outcome)
    }

    async fn persist_seat_hand_best_effort(
        &self,
        match_id: MatchId,
        seat: Seat,
        hand: &[Card],
    ) -> Result<(), DomainError> {
        if self.fail_seat_hands.load(Ordering::SeqCst) {
            return Err(DomainError::infra(
                InfraErrorKind::DbUnavailable,
                "seat hand store unavailable",
            ));
        }
        self.seat_hands
            .lock()
            .insert((match_id, seat), hand.to_vec());
        Ok(())
    }

    async fn has_seat_hands(&self, match_id: MatchId) -> Result<bool, DomainError> {
        Ok(self.seat_hands.lock().keys().any(|(id, _)| *id == match_id))
    }
}
