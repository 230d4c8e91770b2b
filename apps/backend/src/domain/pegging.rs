//! Pegging stage: alternate plays toward 31.

use crate::domain::counting::maybe_finish_round;
use crate::domain::rules::PEGGING_LIMIT;
use crate::domain::scoring::pegging_score;
use crate::domain::state::{MatchState, ScoreEvent, ScoreReason, Seat, Stage};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Cards from `hand` that keep the running total at or below 31.
pub fn legal_plays(hand: &[Card], total: u8) -> Vec<Card> {
    hand.iter()
        .filter(|c| total + c.value() <= PEGGING_LIMIT)
        .copied()
        .collect()
}

pub fn has_legal_play(state: &MatchState, seat: Seat) -> bool {
    state.hands[seat as usize]
        .iter()
        .any(|c| state.pegging_total + c.value() <= PEGGING_LIMIT)
}

/// Next seat after `from` (checked clockwise, `from` itself last) that has not
/// passed and holds a legal card.
fn next_able_seat(state: &MatchState, from: Seat) -> Option<Seat> {
    (1..=state.seat_count())
        .map(|k| state.seat_after(from, k))
        .find(|&s| !state.passed[s as usize] && has_legal_play(state, s))
}

/// Lead for a fresh sequence: first seat after `after` still holding cards.
fn next_lead(state: &MatchState, after: Seat) -> Option<Seat> {
    (1..=state.seat_count())
        .map(|k| state.seat_after(after, k))
        .find(|&s| !state.hands[s as usize].is_empty())
}

fn require_turn(state: &MatchState, seat: Seat) -> Result<usize, DomainError> {
    state.require_stage(Stage::Pegging, "pegging")?;
    let idx = state.check_seat(seat)?;
    if seat != state.turn {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("Seat {seat} played out of turn; seat {} to act", state.turn),
        ));
    }
    Ok(idx)
}

/// Lay `card` from `seat`'s hand onto the running count.
pub fn play_card(
    state: &mut MatchState,
    seat: Seat,
    card: Card,
) -> Result<Vec<ScoreEvent>, DomainError> {
    let idx = require_turn(state, seat)?;
    if !state.hands[idx].contains(&card) {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("{card} is not in seat {seat}'s hand"),
        ));
    }
    if state.pegging_total + card.value() > PEGGING_LIMIT {
        return Err(DomainError::validation(
            ValidationKind::ExceedsThirtyOne,
            format!(
                "{card} would take the count from {} past {PEGGING_LIMIT}",
                state.pegging_total
            ),
        ));
    }

    let mut events = Vec::new();
    let score = pegging_score(&state.pegging_sequence, card, state.pegging_total);
    state.hands[idx] = state.hands[idx]
        .iter()
        .filter(|c| **c != card)
        .copied()
        .collect();
    state.pegging_sequence.push(card);
    state.pegging_total = score.total;
    state.award(seat, score.points, ScoreReason::Pegging, &mut events);

    if state.pegging_total == PEGGING_LIMIT {
        state.reset_sequence();
        if let Some(lead) = next_lead(state, seat) {
            state.turn = lead;
        }
    } else {
        state.last_played = Some(seat);
        // Falls back to the current seat when nobody can play; it must then go.
        state.turn = next_able_seat(state, seat).unwrap_or(seat);
    }

    maybe_finish_round(state, &mut events)?;
    Ok(events)
}

/// Declare that `seat` cannot play under the current count.
pub fn go(state: &mut MatchState, seat: Seat) -> Result<Vec<ScoreEvent>, DomainError> {
    let idx = require_turn(state, seat)?;
    if has_legal_play(state, seat) {
        return Err(DomainError::validation(
            ValidationKind::GoWithLegalPlay,
            format!("Seat {seat} has a legal play at count {}", state.pegging_total),
        ));
    }

    let mut events = Vec::new();
    state.passed[idx] = true;

    match next_able_seat(state, seat) {
        Some(next) => state.turn = next,
        None => {
            let last = state.last_played;
            let pending = !state.pegging_sequence.is_empty();
            if let (true, Some(last)) = (pending, last) {
                state.award(last, 1, ScoreReason::LastCard, &mut events);
            }
            state.reset_sequence();
            if let Some(lead) = next_lead(state, last.unwrap_or(state.dealer)) {
                state.turn = lead;
            }
        }
    }

    maybe_finish_round(state, &mut events)?;
    Ok(events)
}
