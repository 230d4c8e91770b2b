//! Optimistic mutation protocol.
//!
//! 1. Under the slot lock: read version V and deep-copy the state.
//! 2. Release the lock.
//! 3. Validate and apply the transition on the copy.
//! 4. Compare-and-swap the encoded copy against V.
//! 5. On commit, install the copy if memory is still at V, otherwise reload.
//! 6. On conflict, reload and start over, up to `max_cas_attempts` cycles.
//!
//! Validation failures return immediately: nothing is written and no attempt
//! is consumed.

use tracing::{debug, info, warn};

use super::bot_turns::BotOutcome;
use super::{MatchCoordinator, MatchIntent, MutationResult};
use crate::domain::{snapshot, MatchId, MatchState, PlayerView, ScoreEvent, Seat, SeatKind};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::errors::ErrorCode;
use crate::repos::match_store::CasOutcome;

impl MutationResult {
    /// The caller's committed move plus whatever the scheduler managed after it.
    fn after_bots(events: Vec<ScoreEvent>, outcome: BotOutcome) -> Self {
        Self {
            version: outcome.version,
            events,
            stage: outcome.stage,
            bot_moves: outcome.moves,
            bot_error: outcome.error.map(|e| e.code()),
        }
    }
}

/// A transition that committed.
#[derive(Debug)]
pub(super) struct Committed {
    pub version: i64,
    pub events: Vec<ScoreEvent>,
    pub state: MatchState,
}

impl MatchCoordinator {
    /// Apply a human seat's intent, then let any bot seats take their turns.
    ///
    /// Once the intent commits the result is `Ok`; if the bots stop early the
    /// reason is in `bot_error`.
    pub async fn apply_mutation(
        &self,
        match_id: MatchId,
        actor_seat: Seat,
        intent: MatchIntent,
    ) -> Result<MutationResult, AppError> {
        debug!(match_id, seat = actor_seat, intent = intent.name(), "apply mutation");

        let committed = self
            .commit_transition(match_id, |state| -> Result<_, DomainError> {
                let idx = state.check_seat(actor_seat)?;
                if state.seats[idx].is_bot() {
                    return Err(DomainError::validation(
                        ValidationKind::InvalidSeat,
                        format!("Seat {actor_seat} is played by a bot"),
                    ));
                }
                intent.apply(state, actor_seat)
            })
            .await?;

        let outcome = self.run_bot_turns(match_id, committed.state).await;
        Ok(MutationResult::after_bots(committed.events, outcome))
    }

    /// Create, deal and persist a new match, then run any opening bot moves.
    ///
    /// Opening an id that already exists with the same seat count is a no-op
    /// returning its current version. A different seat count means the caller
    /// and the store disagree about the match: `StateUnavailable`.
    pub async fn open_match(
        &self,
        match_id: MatchId,
        seats: Vec<SeatKind>,
        seed: u64,
    ) -> Result<MutationResult, AppError> {
        let seat_count = seats.len();
        let (guard, created) = self
            .get_or_create_locked(match_id, || {
                let mut state = MatchState::new(seats, seed)?;
                crate::domain::deal(&mut state)?;
                Ok(state)
            })
            .await?;

        if guard.seat_count() != seat_count {
            warn!(
                match_id,
                stored = guard.seat_count(),
                requested = seat_count,
                "seat count mismatch"
            );
            return Err(AppError::state_unavailable(format!(
                "match {match_id} has {} seats, requested {seat_count}",
                guard.seat_count()
            )));
        }

        if !created {
            return Ok(MutationResult {
                version: guard.version,
                events: Vec::new(),
                stage: guard.stage,
                bot_moves: 0,
                bot_error: None,
            });
        }

        let fresh = guard.clone();
        drop(guard);

        let encoded = snapshot::encode(&fresh)?;
        let outcome = match self.store.compare_and_swap(match_id, 0, encoded).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.evict(match_id);
                return Err(e.into());
            }
        };

        match outcome {
            CasOutcome::Committed { version } => {
                let mut state = fresh;
                state.version = version;
                info!(match_id, seats = seat_count, seed, "match opened");
                self.reconcile(match_id, 0, state.clone()).await?;
                self.persist_seat_hands(match_id, None, &state).await;
            }
            CasOutcome::VersionConflict { actual } => {
                debug!(match_id, actual, "match created concurrently");
                self.refresh(match_id).await?;
            }
            CasOutcome::NotFound => {
                self.evict(match_id);
                return Err(AppError::state_unavailable(format!(
                    "store refused to create match {match_id}"
                )));
            }
        }

        let opened = self.get_locked(match_id).await?.clone();
        let outcome = self.run_bot_turns(match_id, opened).await;
        Ok(MutationResult::after_bots(Vec::new(), outcome))
    }

    /// Redacted view of the match for one seat.
    pub async fn snapshot(
        &self,
        match_id: MatchId,
        requesting_seat: Seat,
    ) -> Result<PlayerView, AppError> {
        let state = self.read_state(match_id).await?;
        Ok(PlayerView::for_seat(&state, requesting_seat)?)
    }

    /// Run `transition` through the optimistic protocol.
    pub(super) async fn commit_transition<F, E>(
        &self,
        match_id: MatchId,
        transition: F,
    ) -> Result<Committed, AppError>
    where
        F: Fn(&mut MatchState) -> Result<Vec<ScoreEvent>, E>,
        E: Into<AppError>,
    {
        let max_attempts = self.config.max_cas_attempts.max(1);

        for attempt in 1..=max_attempts {
            let (base_version, before) = {
                let guard = self.get_locked(match_id).await?;
                (guard.version, guard.clone())
            };

            let mut working = before.clone();
            let events = transition(&mut working).map_err(Into::into)?;
            let encoded = snapshot::encode(&working)?;

            match self
                .store
                .compare_and_swap(match_id, base_version, encoded)
                .await?
            {
                CasOutcome::Committed { version } => {
                    working.version = version;
                    debug!(match_id, version, attempt, events = events.len(), "committed");
                    self.reconcile(match_id, base_version, working.clone())
                        .await?;
                    self.persist_seat_hands(match_id, Some(&before), &working)
                        .await;
                    if working.is_finished() && self.config.evict_finished {
                        self.evict(match_id);
                        info!(match_id, winner = ?working.winner, "match finished");
                    }
                    return Ok(Committed {
                        version,
                        events,
                        state: working,
                    });
                }
                CasOutcome::VersionConflict { actual } => {
                    warn!(
                        match_id,
                        expected = base_version,
                        actual,
                        attempt,
                        "version conflict, reloading"
                    );
                    self.refresh(match_id).await?;
                }
                CasOutcome::NotFound => {
                    return Err(AppError::state_unavailable(format!(
                        "match {match_id} is missing from the store"
                    )));
                }
            }
        }

        Err(AppError::conflict(
            ErrorCode::OptimisticLock,
            format!("match {match_id}: gave up after {max_attempts} conflicting attempts"),
        ))
    }

    /// Install a freshly committed state if memory has not moved past
    /// `base_version`; otherwise memory is stale in an unknown way, so reload.
    async fn reconcile(
        &self,
        match_id: MatchId,
        base_version: i64,
        committed: MatchState,
    ) -> Result<(), AppError> {
        if let Some(slot) = self.slots.get(&match_id).map(|e| e.value().clone()) {
            let mut current = slot.lock().await;
            if current.version == base_version {
                *current = committed;
                return Ok(());
            }
            drop(current);
            debug!(match_id, base_version, "memory moved on, reloading");
            return self.refresh(match_id).await;
        }
        self.install(match_id, committed).await;
        Ok(())
    }

    /// Mirror changed hands to the store. Failures are logged and ignored.
    async fn persist_seat_hands(
        &self,
        match_id: MatchId,
        before: Option<&MatchState>,
        after: &MatchState,
    ) {
        for (idx, hand) in after.hands.iter().enumerate() {
            if before.is_some_and(|b| b.hands.get(idx) == Some(hand)) {
                continue;
            }
            let Ok(seat) = Seat::try_from(idx) else {
                continue;
            };
            if let Err(e) = self
                .store
                .persist_seat_hand_best_effort(match_id, seat, hand)
                .await
            {
                warn!(match_id, seat, error = %e, "seat hand not persisted");
            }
        }
    }
}
