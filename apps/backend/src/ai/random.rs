//! Random bot - the easy tier.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{BotError, BotPlayer, PeggingChoice};
use crate::domain::legal_plays;
use crate::domain::Card;

/// Bot that picks uniformly among legal options.
///
/// Seeded, so a given match seed reproduces the same choices.
pub struct RandomBot {
    /// `BotPlayer` methods take `&self`; the RNG needs mutable access.
    rng: Mutex<StdRng>,
}

impl RandomBot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl BotPlayer for RandomBot {
    fn choose_discard(&self, hand: &[Card], count: usize) -> Result<Vec<Card>, BotError> {
        if hand.len() < count {
            return Err(BotError::InvalidMove(format!(
                "cannot discard {count} from {} cards",
                hand.len()
            )));
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| BotError::Internal(format!("RNG lock poisoned: {e}")))?;
        Ok(hand.choose_multiple(&mut *rng, count).copied().collect())
    }

    fn choose_pegging_play(
        &self,
        hand: &[Card],
        total: u8,
        _sequence: &[Card],
    ) -> Result<PeggingChoice, BotError> {
        let legal = legal_plays(hand, total);
        if legal.is_empty() {
            return Ok(PeggingChoice::Go);
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| BotError::Internal(format!("RNG lock poisoned: {e}")))?;
        legal
            .choose(&mut *rng)
            .copied()
            .map(PeggingChoice::Play)
            .ok_or_else(|| BotError::Internal("failed to choose a random card".into()))
    }
}
