//! Persisted snapshot format: the full match state as JSON, version kept apart.

use crate::domain::rules::{Rules, PEGGING_LIMIT};
use crate::domain::state::{MatchState, Stage};
use crate::errors::domain::{DomainError, InfraErrorKind};

fn corrupt(detail: impl Into<String>) -> DomainError {
    DomainError::infra(InfraErrorKind::DataCorruption, detail)
}

/// Serialize the state for the store. The version travels separately.
pub fn encode(state: &MatchState) -> Result<String, DomainError> {
    serde_json::to_string(state).map_err(|e| corrupt(format!("encode snapshot: {e}")))
}

/// Decode a stored snapshot and attach the store's version.
///
/// Rejects anything that parses but does not describe a coherent match.
pub fn decode(json: &str, version: i64) -> Result<MatchState, DomainError> {
    let mut state: MatchState =
        serde_json::from_str(json).map_err(|e| corrupt(format!("decode snapshot: {e}")))?;
    state.version = version;
    validate(&state)?;
    Ok(state)
}

/// Structural consistency checks for a decoded state.
pub fn validate(state: &MatchState) -> Result<(), DomainError> {
    let rules = Rules::new(state.rules.seat_count()).map_err(|e| corrupt(e.to_string()))?;
    let n = rules.seat_count() as usize;
    if state.seats.len() != n {
        return Err(corrupt(format!(
            "{} seat kinds for a {n}-seat table",
            state.seats.len()
        )));
    }

    let per_seat = [
        ("hands", state.hands.len()),
        ("kept_hands", state.kept_hands.len()),
        ("passed", state.passed.len()),
        ("discarded", state.discarded.len()),
        ("pegging_points", state.pegging_points.len()),
        ("scores", state.scores.len()),
    ];
    if let Some((field, len)) = per_seat.iter().find(|(_, len)| *len != n) {
        return Err(corrupt(format!("{field} has {len} entries, expected {n}")));
    }

    let seats_in_range = [Some(state.dealer), Some(state.turn), state.last_played, state.winner]
        .into_iter()
        .flatten()
        .all(|s| (s as usize) < n);
    if !seats_in_range {
        return Err(corrupt("seat index out of range"));
    }

    if state.pegging_total > PEGGING_LIMIT {
        return Err(corrupt(format!(
            "pegging total {} exceeds {PEGGING_LIMIT}",
            state.pegging_total
        )));
    }
    let sequence_total: u32 = state
        .pegging_sequence
        .iter()
        .map(|c| u32::from(c.value()))
        .sum();
    if sequence_total != u32::from(state.pegging_total) {
        return Err(corrupt("pegging total does not match the sequence"));
    }

    if state.stage == Stage::Finished && state.winner.is_none() {
        return Err(corrupt("finished match without a winner"));
    }
    if matches!(state.stage, Stage::Pegging | Stage::Counting | Stage::Finished)
        && state.cut.is_none()
    {
        return Err(corrupt("cut card missing after discard"));
    }

    state.check_card_accounting()
}
