//! Discard stage: seats send cards to the crib, then the cut is revealed.

use crate::domain::dealing::draw;
use crate::domain::state::{MatchState, ScoreEvent, Seat, Stage};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Move `cards` from `seat`'s hand to the crib.
///
/// When the last seat discards, the crib is topped up from the deck (3-seat
/// tables), the cut is revealed, kept hands are frozen and pegging begins left
/// of the dealer.
pub fn discard(
    state: &mut MatchState,
    seat: Seat,
    cards: &[Card],
) -> Result<Vec<ScoreEvent>, DomainError> {
    state.require_stage(Stage::Discard, "discard")?;
    let idx = state.check_seat(seat)?;

    if state.discarded[idx] {
        return Err(DomainError::validation(
            ValidationKind::AlreadyDiscarded,
            format!("Seat {seat} has already discarded"),
        ));
    }
    let expected = state.rules.discard_count();
    if cards.len() != expected {
        return Err(DomainError::validation(
            ValidationKind::WrongDiscardCount,
            format!("Expected {expected} card(s) to discard, got {}", cards.len()),
        ));
    }
    for (i, card) in cards.iter().enumerate() {
        if cards[..i].contains(card) {
            return Err(DomainError::validation(
                ValidationKind::DuplicateCard,
                format!("{card} listed more than once"),
            ));
        }
        if !state.hands[idx].contains(card) {
            return Err(DomainError::validation(
                ValidationKind::CardNotInHand,
                format!("{card} is not in seat {seat}'s hand"),
            ));
        }
    }

    state.hands[idx] = state.hands[idx]
        .iter()
        .filter(|c| !cards.contains(c))
        .copied()
        .collect();
    state.crib.extend_from_slice(cards);
    state.discarded[idx] = true;

    if state.discarded.iter().all(|&d| d) {
        start_pegging(state)?;
    }
    Ok(Vec::new())
}

fn start_pegging(state: &mut MatchState) -> Result<(), DomainError> {
    for _ in 0..state.rules.crib_fill() {
        let extra = draw(&mut state.deck, "crib fill")?;
        state.crib.push(extra);
    }
    state.cut = Some(draw(&mut state.deck, "cut")?);
    state.kept_hands = state.hands.clone();
    state.reset_sequence();
    state.stage = Stage::Pegging;
    state.turn = state.left_of_dealer();
    Ok(())
}
