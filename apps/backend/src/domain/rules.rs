use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

pub const MIN_SEATS: u8 = 2;
pub const MAX_SEATS: u8 = 4;
pub const DECK_SIZE: usize = 52;
pub const CRIB_SIZE: usize = 4;
pub const KEPT_HAND_SIZE: usize = 4;
pub const WINNING_SCORE: u16 = 121;
pub const PEGGING_LIMIT: u8 = 31;
pub const FIFTEEN: u8 = 15;

/// Per-match table rules, fixed once the match is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    seat_count: u8,
}

impl Rules {
    pub fn new(seat_count: u8) -> Result<Self, DomainError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&seat_count) {
            return Err(DomainError::validation(
                ValidationKind::InvalidSeatCount,
                format!("Seat count must be {MIN_SEATS}..={MAX_SEATS}, got {seat_count}"),
            ));
        }
        Ok(Self { seat_count })
    }

    pub const fn seat_count(&self) -> u8 {
        self.seat_count
    }

    /// Cards dealt to each seat: 6 heads-up, 5 otherwise.
    pub const fn hand_size(&self) -> usize {
        if self.seat_count == 2 {
            6
        } else {
            5
        }
    }

    /// Cards each seat sends to the crib.
    pub const fn discard_count(&self) -> usize {
        if self.seat_count == 2 {
            2
        } else {
            1
        }
    }

    /// Face-down deck cards needed to fill the crib after discards (3 seats only).
    pub const fn crib_fill(&self) -> usize {
        CRIB_SIZE - self.discard_count() * self.seat_count as usize
    }

    pub const fn crib_size(&self) -> usize {
        CRIB_SIZE
    }
}
