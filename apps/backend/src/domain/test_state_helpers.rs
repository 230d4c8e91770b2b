//! Test-only match state builders for domain unit tests.

use crate::domain::dealing::{deal, full_deck};
use crate::domain::state::{MatchState, Seat, SeatKind, Stage};
use crate::domain::Card;

/// Parse a space-separated list of card tokens.
pub fn cards(tokens: &str) -> Vec<Card> {
    tokens
        .split_whitespace()
        .map(|t| t.parse().unwrap())
        .collect()
}

pub fn card(token: &str) -> Card {
    token.parse().unwrap()
}

/// A freshly dealt match with all-human seats.
pub fn dealt_match(seat_count: usize, seed: u64) -> MatchState {
    let mut state = MatchState::new(vec![SeatKind::Human; seat_count], seed).unwrap();
    deal(&mut state).unwrap();
    state
}

/// A match mid-pegging with hand-picked cards.
///
/// `hands` become both live and kept hands; `crib` and `cut` are fixed and the
/// deck holds every remaining card, so card accounting stays valid.
pub fn pegging_match(dealer: Seat, hands: Vec<Vec<Card>>, crib: Vec<Card>, cut: Card) -> MatchState {
    let n = hands.len();
    let mut state = MatchState::new(vec![SeatKind::Human; n], 0).unwrap();
    state.round_no = 1;
    state.dealer = dealer;
    state.discarded = vec![true; n];
    state.hands = hands.clone();
    state.kept_hands = hands;
    state.crib = crib;
    state.cut = Some(cut);
    state.deck = full_deck()
        .into_iter()
        .filter(|c| {
            *c != cut
                && !state.crib.contains(c)
                && !state.kept_hands.iter().any(|h| h.contains(c))
        })
        .collect();
    state.stage = Stage::Pegging;
    state.turn = state.left_of_dealer();
    state.check_card_accounting().unwrap();
    state
}
