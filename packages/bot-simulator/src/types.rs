//! Shared types for the simulator.

use clap::ValueEnum;
use cribbage_backend::domain::{Difficulty, SeatKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BotTier {
    Easy,
    Medium,
    Hard,
}

impl BotTier {
    pub fn seat_kind(self) -> SeatKind {
        SeatKind::Bot(match self {
            BotTier::Easy => Difficulty::Easy,
            BotTier::Medium => Difficulty::Medium,
            BotTier::Hard => Difficulty::Hard,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            BotTier::Easy => "easy",
            BotTier::Medium => "medium",
            BotTier::Hard => "hard",
        }
    }
}
