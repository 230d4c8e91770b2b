//! Turn scheduler: plays bot seats until a human must act.

use tracing::{debug, warn};

use super::MatchCoordinator;
use crate::ai::{create_bot, PeggingChoice};
use crate::domain::{
    derive_bot_seed, discard, go, play_card, MatchId, MatchState, ScoreEvent, SeatKind, Stage,
};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::errors::ErrorCode;

/// What the scheduler did after a human move.
///
/// Moves committed before a failure stay committed, so a failure is carried
/// alongside the progress instead of replacing it.
#[derive(Debug)]
pub(super) struct BotOutcome {
    pub version: i64,
    pub stage: Stage,
    pub moves: u32,
    pub error: Option<AppError>,
}

/// The bot seat due to act in `state`, if the next actor is a bot.
fn next_bot(state: &MatchState) -> Option<u8> {
    if !matches!(state.stage, Stage::Discard | Stage::Pegging) {
        return None;
    }
    let seat = state.seat_to_act()?;
    state
        .seats
        .get(usize::from(seat))
        .filter(|kind| kind.is_bot())
        .map(|_| seat)
}

/// Decide and apply one bot move on `state`.
///
/// The decision is re-derived from whatever state the protocol hands in, so
/// a retried attempt never replays a move computed against stale state.
fn bot_move(state: &mut MatchState) -> Result<Vec<ScoreEvent>, AppError> {
    let seat = state.seat_to_act().ok_or_else(|| {
        DomainError::validation(ValidationKind::PhaseMismatch, "no seat is due to act")
    })?;
    let idx = usize::from(seat);
    let SeatKind::Bot(difficulty) = state.seats[idx] else {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("seat {seat} is not a bot"),
        )
        .into());
    };

    let bot = create_bot(difficulty, derive_bot_seed(state.seed, state.version, seat));
    let events = match state.stage {
        Stage::Discard => {
            let picks = bot.choose_discard(&state.hands[idx], state.rules.discard_count())?;
            discard(state, seat, &picks)?
        }
        Stage::Pegging => {
            let choice = bot.choose_pegging_play(
                &state.hands[idx],
                state.pegging_total,
                &state.pegging_sequence,
            )?;
            match choice {
                PeggingChoice::Play(card) => play_card(state, seat, card)?,
                PeggingChoice::Go => go(state, seat)?,
            }
        }
        other => {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("bots do not act during {other:?}"),
            )
            .into())
        }
    };
    Ok(events)
}

impl MatchCoordinator {
    /// Run bot moves starting from `latest`, the state after the last commit.
    ///
    /// Stops when the next actor is human, the stage leaves discard/pegging,
    /// or a bot move fails for a reason other than a lost race.
    pub(super) async fn run_bot_turns(
        &self,
        match_id: MatchId,
        latest: MatchState,
    ) -> BotOutcome {
        let cap = self.config.max_bot_iterations;
        let mut current = latest;
        let mut iterations = 0u32;
        let mut moves = 0u32;
        let mut error = None;

        while let Some(seat) = next_bot(&current) {
            if iterations >= cap {
                warn!(match_id, cap, version = current.version, "bot loop cap reached");
                error = Some(AppError::internal(
                    ErrorCode::BotLoopExceeded,
                    format!("match {match_id}: bots still to act after {cap} iterations"),
                ));
                break;
            }
            iterations += 1;

            match self.commit_transition(match_id, bot_move).await {
                Ok(committed) => {
                    debug!(
                        match_id,
                        seat,
                        version = committed.version,
                        events = committed.events.len(),
                        "bot moved"
                    );
                    moves += 1;
                    current = committed.state;
                }
                // Someone else moved first; look again at what is stored now.
                Err(e) if e.is_validation() => {
                    warn!(match_id, seat, error = %e, "bot move rejected, re-reading state");
                    match self.read_state(match_id).await {
                        Ok(state) => current = state,
                        Err(e) => {
                            error = Some(e);
                            break;
                        }
                    }
                }
                Err(e) => {
                    warn!(
                        match_id,
                        seat,
                        code = e.code().as_str(),
                        error = %e,
                        "bot turns stopped"
                    );
                    error = Some(e);
                    break;
                }
            }
        }

        BotOutcome {
            version: current.version,
            stage: current.stage,
            moves,
            error,
        }
    }

    /// Run any pending bot moves for a match, e.g. after a restart.
    pub async fn drive_bots(&self, match_id: MatchId) -> Result<u32, AppError> {
        let latest = self.read_state(match_id).await?;
        let outcome = self.run_bot_turns(match_id, latest).await;
        match outcome.error {
            Some(e) => Err(e),
            None => Ok(outcome.moves),
        }
    }
}
