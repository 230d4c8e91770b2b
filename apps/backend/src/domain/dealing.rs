//! Deterministic card dealing logic.

use crate::domain::rules::{Rules, DECK_SIZE};
use crate::domain::seed_derivation::derive_dealing_seed;
use crate::domain::state::{MatchState, Stage};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

/// Generate a full 52-card deck in standard order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { rank, suit });
        }
    }
    deck
}

/// Simple deterministic RNG for shuffling.
///
/// Uses a SplitMix64-style generator for good statistical properties while
/// remaining fast and deterministic given a seed.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z ^= z >> 30;
        z = z.wrapping_mul(0xBF58476D1CE4E5B9);
        z ^= z >> 27;
        z = z.wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn next_range(&mut self, max: usize) -> usize {
        let m = max as u64;
        // Rejection sampling avoids modulo bias.
        let limit = u64::MAX - (u64::MAX % m);
        loop {
            let x = self.next();
            if x < limit {
                return (x % m) as usize;
            }
        }
    }
}

/// Fisher-Yates shuffle using deterministic RNG.
pub fn shuffle_with_seed(deck: &mut [Card], seed: u64) {
    let mut rng = SplitMix64::new(seed);
    for i in (1..deck.len()).rev() {
        let j = rng.next_range(i + 1);
        deck.swap(i, j);
    }
}

/// Draw the top card of the deck.
///
/// An empty deck is unreachable for valid seat counts, so it is an integrity
/// failure rather than a rule violation.
pub(crate) fn draw(deck: &mut Vec<Card>, ctx: &'static str) -> Result<Card, DomainError> {
    deck.pop().ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Deck exhausted ({ctx})"),
        )
    })
}

/// Start a new round: shuffle, deal round-robin from left of the dealer, and
/// reset every per-round field. Leaves the match in `Discard`.
pub fn deal(state: &mut MatchState) -> Result<(), DomainError> {
    let rules = Rules::new(state.rules.seat_count())?;
    let n = state.seat_count();
    if n != rules.seat_count() as usize {
        return Err(DomainError::validation(
            ValidationKind::InvalidSeatCount,
            format!("{n} seats configured for a {}-seat table", rules.seat_count()),
        ));
    }

    state.round_no = state.round_no.saturating_add(1);
    let mut deck = full_deck();
    shuffle_with_seed(&mut deck, derive_dealing_seed(state.seed, state.round_no));

    let mut hands: Vec<Vec<Card>> = vec![Vec::with_capacity(rules.hand_size()); n];
    for _ in 0..rules.hand_size() {
        for k in 1..=n {
            let seat = state.seat_after(state.dealer, k) as usize;
            hands[seat].push(draw(&mut deck, "deal")?);
        }
    }
    for hand in &mut hands {
        hand.sort();
    }

    state.deck = deck;
    state.hands = hands;
    state.kept_hands = vec![Vec::new(); n];
    state.crib = Vec::with_capacity(rules.crib_size());
    state.cut = None;
    state.reset_sequence();
    state.discarded = vec![false; n];
    state.pegging_points = vec![0; n];
    state.stage = Stage::Discard;
    state.turn = state.left_of_dealer();
    Ok(())
}
