//! Domain layer: pure cribbage rules, scoring, and state transitions.

pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod counting;
pub mod dealing;
pub mod discard;
pub mod pegging;
pub mod player_view;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_pegging;
#[cfg(test)]
mod tests_props_dealing;
#[cfg(test)]
mod tests_round_completion;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_snapshot;

// Re-exports for ergonomics
pub use cards_parsing::try_parse_cards;
pub use cards_types::{Card, Rank, Suit};
pub use counting::maybe_finish_round;
pub use dealing::deal;
pub use discard::discard;
pub use pegging::{go, legal_plays, play_card};
pub use player_view::PlayerView;
pub use rules::Rules;
pub use scoring::{pegging_score, score_hand, HandScore, PeggingScore};
pub use seed_derivation::{derive_bot_seed, derive_dealing_seed};
pub use state::{
    Difficulty, MatchId, MatchState, RoundRecord, ScoreEvent, ScoreReason, Seat, SeatKind, Stage,
};
