// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::dealing::full_deck;
use crate::domain::Card;

/// A vector of `count` distinct cards.
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(full_deck())
        .prop_shuffle()
        .prop_map(move |deck| deck.into_iter().take(count).collect())
}

/// Seat count 2..=4.
pub fn seat_count() -> impl Strategy<Value = usize> {
    2usize..=4
}

/// Any match seed.
pub fn seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Shared proptest configuration; `PROPTEST_CASES` overrides the case count.
pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(64);
    ProptestConfig::with_cases(cases)
}
