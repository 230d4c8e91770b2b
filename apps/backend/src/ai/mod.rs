//! Bot player module - automated discard and pegging decisions.
//!
//! This module provides:
//! - `BotPlayer` trait for the difficulty tiers
//! - `RandomBot` (easy) and `HeuristicBot` (medium, hard)
//! - Free helpers the turn scheduler calls per decision

mod heuristic;
mod random;
mod trait_def;

pub use heuristic::HeuristicBot;
pub use random::RandomBot;
pub use trait_def::{BotError, BotPlayer, PeggingChoice};

pub use crate::domain::Difficulty;
use crate::domain::Card;

/// Create the bot for a difficulty tier. `seed` only matters for the easy tier.
pub fn create_bot(difficulty: Difficulty, seed: u64) -> Box<dyn BotPlayer> {
    match difficulty {
        Difficulty::Easy => Box::new(RandomBot::new(seed)),
        Difficulty::Medium => Box::new(HeuristicBot::medium()),
        Difficulty::Hard => Box::new(HeuristicBot::hard()),
    }
}

pub fn choose_discard(
    hand: &[Card],
    count: usize,
    difficulty: Difficulty,
    seed: u64,
) -> Result<Vec<Card>, BotError> {
    create_bot(difficulty, seed).choose_discard(hand, count)
}

pub fn choose_pegging_play(
    hand: &[Card],
    total: u8,
    sequence: &[Card],
    difficulty: Difficulty,
    seed: u64,
) -> Result<PeggingChoice, BotError> {
    create_bot(difficulty, seed).choose_pegging_play(hand, total, sequence)
}
