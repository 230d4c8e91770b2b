//! Per-match slots: lazy load from the store and locked access.
//!
//! No store I/O happens while a slot mutex is held.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};

use super::MatchCoordinator;
use crate::domain::{snapshot, MatchId, MatchState};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};

impl MatchCoordinator {
    /// Read and decode the persisted snapshot.
    ///
    /// `Ok(None)` only when neither a snapshot nor any seat-hand rows exist.
    /// Anything the store holds that cannot be trusted is `StateUnavailable`.
    pub(super) async fn load_from_store(
        &self,
        match_id: MatchId,
    ) -> Result<Option<MatchState>, AppError> {
        let Some(stored) = self.store.load(match_id).await? else {
            if self.store.has_seat_hands(match_id).await? {
                warn!(match_id, "seat hands present without a snapshot");
                return Err(AppError::state_unavailable(format!(
                    "match {match_id} has seat hands but no snapshot"
                )));
            }
            return Ok(None);
        };

        match snapshot::decode(&stored.snapshot, stored.version) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                warn!(match_id, version = stored.version, error = %e, "snapshot rejected");
                Err(AppError::state_unavailable(format!(
                    "match {match_id} snapshot could not be decoded: {e}"
                )))
            }
        }
    }

    /// Install `loaded` unless memory already holds the same or a newer version.
    pub(super) async fn install(&self, match_id: MatchId, loaded: MatchState) {
        let slot = self.slot_or_insert(match_id, &loaded);
        let mut current = slot.lock().await;
        if loaded.version > current.version {
            debug!(
                match_id,
                from = current.version,
                to = loaded.version,
                "installing newer state"
            );
            *current = loaded;
        }
    }

    /// Existing slot, or a new one seeded with `state`.
    ///
    /// The DashMap shard guard is dropped before returning.
    fn slot_or_insert(&self, match_id: MatchId, state: &MatchState) -> Arc<Mutex<MatchState>> {
        self.slots
            .entry(match_id)
            .or_insert_with(|| Arc::new(Mutex::new(state.clone())))
            .value()
            .clone()
    }

    fn existing_slot(&self, match_id: MatchId) -> Option<Arc<Mutex<MatchState>>> {
        self.slots.get(&match_id).map(|e| e.value().clone())
    }

    /// Lock the match, loading it from the store on first access.
    pub(super) async fn get_locked(
        &self,
        match_id: MatchId,
    ) -> Result<OwnedMutexGuard<MatchState>, AppError> {
        if let Some(slot) = self.existing_slot(match_id) {
            return Ok(slot.lock_owned().await);
        }

        let loaded = self.load_existing(match_id).await?;
        Ok(self.install_locked(match_id, loaded).await)
    }

    /// A copy of the match for read-only use.
    ///
    /// A finished match that is not resident is served straight from the
    /// store when finished matches are evicted, so reads never bring it back.
    pub(super) async fn read_state(&self, match_id: MatchId) -> Result<MatchState, AppError> {
        if let Some(slot) = self.existing_slot(match_id) {
            return Ok(slot.lock().await.clone());
        }

        let loaded = self.load_existing(match_id).await?;
        if loaded.is_finished() && self.config.evict_finished {
            debug!(match_id, version = loaded.version, "finished match read from store");
            return Ok(loaded);
        }
        Ok(self.install_locked(match_id, loaded).await.clone())
    }

    async fn load_existing(&self, match_id: MatchId) -> Result<MatchState, AppError> {
        let loaded = self.load_from_store(match_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Match, format!("match {match_id} not found"))
        })?;
        debug!(match_id, version = loaded.version, "loaded match from store");
        Ok(loaded)
    }

    async fn install_locked(
        &self,
        match_id: MatchId,
        loaded: MatchState,
    ) -> OwnedMutexGuard<MatchState> {
        let slot = self.slot_or_insert(match_id, &loaded);
        let mut guard = slot.lock_owned().await;
        // A concurrent loader may have installed an older copy first.
        if loaded.version > guard.version {
            *guard = loaded;
        }
        guard
    }

    /// Lock an existing match, or install the state built by `create` when the
    /// store has nothing for this id. The flag is true when `create` won.
    ///
    /// An installed state is at version 0 until the caller persists it.
    pub(super) async fn get_or_create_locked<F>(
        &self,
        match_id: MatchId,
        create: F,
    ) -> Result<(OwnedMutexGuard<MatchState>, bool), AppError>
    where
        F: FnOnce() -> Result<MatchState, AppError>,
    {
        if let Some(slot) = self.existing_slot(match_id) {
            return Ok((slot.lock_owned().await, false));
        }

        if let Some(loaded) = self.load_from_store(match_id).await? {
            return Ok((self.install_locked(match_id, loaded).await, false));
        }

        let fresh = create()?;
        let (slot, created) = match self.slots.entry(match_id) {
            Entry::Occupied(e) => (e.get().clone(), false),
            Entry::Vacant(e) => {
                let slot = Arc::new(Mutex::new(fresh));
                e.insert(Arc::clone(&slot));
                (slot, true)
            }
        };
        Ok((slot.lock_owned().await, created))
    }

    /// Re-read the store after a conflict and install what it holds.
    pub(super) async fn refresh(&self, match_id: MatchId) -> Result<(), AppError> {
        let loaded = self.load_from_store(match_id).await?.ok_or_else(|| {
            AppError::state_unavailable(format!("match {match_id} vanished from the store"))
        })?;
        self.install(match_id, loaded).await;
        Ok(())
    }

    /// Drop the in-memory slot; the next access reloads from the store.
    pub fn evict(&self, match_id: MatchId) -> bool {
        self.slots.remove(&match_id).is_some()
    }

    /// Drop every slot holding a finished match. Slots currently locked are kept.
    pub fn evict_finished(&self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, slot| match slot.try_lock() {
            Ok(state) => !state.is_finished(),
            Err(_) => true,
        });
        let evicted = before.saturating_sub(self.slots.len());
        if evicted > 0 {
            debug!(evicted, "evicted finished matches");
        }
        evicted
    }
}
