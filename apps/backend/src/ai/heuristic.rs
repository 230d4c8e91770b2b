//! Heuristic bots - the medium and hard tiers.
//!
//! Both discard their lowest-value cards. During pegging, medium takes the
//! play worth the most points right now; hard also avoids leaving a count an
//! opponent can turn into 15 or 31 with a single card.

use super::trait_def::{BotError, BotPlayer, PeggingChoice};
use crate::domain::rules::{FIFTEEN, PEGGING_LIMIT};
use crate::domain::{legal_plays, pegging_score, Card};

/// Pegging heuristic with an optional look-ahead penalty.
pub struct HeuristicBot {
    avoid_setups: bool,
}

impl HeuristicBot {
    pub const fn medium() -> Self {
        Self {
            avoid_setups: false,
        }
    }

    pub const fn hard() -> Self {
        Self { avoid_setups: true }
    }

    /// True when one more card (value 1..=10) could bring `total` to 15 or 31.
    fn leaves_setup(total: u8) -> bool {
        [FIFTEEN, PEGGING_LIMIT]
            .iter()
            .any(|&target| target > total && target - total <= 10)
    }

    /// Play rating in half points so the half-point penalty stays integral.
    fn rate(&self, sequence: &[Card], card: Card, total: u8) -> i32 {
        let score = pegging_score(sequence, card, total);
        let mut rating = i32::from(score.points) * 2;
        if self.avoid_setups && Self::leaves_setup(score.total) {
            rating -= 1;
        }
        rating
    }
}

impl BotPlayer for HeuristicBot {
    fn choose_discard(&self, hand: &[Card], count: usize) -> Result<Vec<Card>, BotError> {
        if hand.len() < count {
            return Err(BotError::InvalidMove(format!(
                "cannot discard {count} from {} cards",
                hand.len()
            )));
        }
        let mut sorted = hand.to_vec();
        // Card ordering already breaks ties by rank then suit.
        sorted.sort_by_key(|c| (c.value(), *c));
        sorted.truncate(count);
        Ok(sorted)
    }

    fn choose_pegging_play(
        &self,
        hand: &[Card],
        total: u8,
        sequence: &[Card],
    ) -> Result<PeggingChoice, BotError> {
        let best = legal_plays(hand, total)
            .into_iter()
            .map(|card| (self.rate(sequence, card, total), card))
            // Highest rating, then the lowest card.
            .max_by(|(ra, a), (rb, b)| {
                ra.cmp(rb)
                    .then_with(|| (b.value(), *b).cmp(&(a.value(), *a)))
            });
        Ok(match best {
            Some((_, card)) => PeggingChoice::Play(card),
            None => PeggingChoice::Go,
        })
    }
}
