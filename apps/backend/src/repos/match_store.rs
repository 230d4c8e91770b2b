//! Durable-store contract the match coordinator depends on.
//!
//! The coordinator never talks to a database directly. It loads a snapshot,
//! computes on a copy, then writes back with a compare-and-swap conditioned
//! on the version it started from.

use async_trait::async_trait;

use crate::domain::{Card, MatchId, Seat};
use crate::errors::domain::DomainError;

/// Snapshot row as stored: encoded `MatchState` plus its external version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMatch {
    pub snapshot: String,
    pub version: i64,
}

/// Result of a conditional write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    /// Write applied; the row now carries `version`.
    Committed { version: i64 },
    /// Row exists but its version is not the expected one.
    VersionConflict { actual: i64 },
    /// No row and the caller expected one (expected version > 0).
    NotFound,
}

#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    async fn load(&self, match_id: MatchId) -> Result<Option<StoredMatch>, DomainError>;

    /// Write `snapshot` only if the stored version equals `expected_version`.
    ///
    /// `expected_version == 0` with no row inserts at version 1.
    async fn compare_and_swap(
        &self,
        match_id: MatchId,
        expected_version: i64,
        snapshot: String,
    ) -> Result<CasOutcome, DomainError>;

    /// Per-seat hand copy for readers outside the coordinator. Failures are
    /// logged by the caller and never roll back the committed snapshot.
    async fn persist_seat_hand_best_effort(
        &self,
        match_id: MatchId,
        seat: Seat,
        hand: &[Card],
    ) -> Result<(), DomainError>;

    /// True when any per-seat hand rows exist for the match.
    async fn has_seat_hands(&self, match_id: MatchId) -> Result<bool, DomainError>;
}
