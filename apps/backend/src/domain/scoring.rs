//! Pure scoring functions for counted hands and pegging plays.

use serde::{Deserialize, Serialize};

use crate::domain::rules::{FIFTEEN, PEGGING_LIMIT};
use crate::domain::{Card, Rank};

/// Longest run that can fit under a pegging count of 31 (A through 7).
const MAX_PEGGING_RUN: usize = 7;

/// Component breakdown of a counted hand or crib.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandScore {
    pub fifteens: u16,
    pub pairs: u16,
    pub runs: u16,
    pub flush: u16,
    pub nobs: u16,
}

impl HandScore {
    pub fn total(&self) -> u16 {
        self.fifteens + self.pairs + self.runs + self.flush + self.nobs
    }
}

/// Result of a single pegging play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeggingScore {
    pub total: u8,
    pub points: u16,
}

/// Score four hand cards plus the cut.
pub fn score_hand(hand: &[Card; 4], cut: Card, is_crib: bool) -> HandScore {
    let all = [hand[0], hand[1], hand[2], hand[3], cut];
    let counts = rank_counts(&all);
    HandScore {
        fifteens: fifteens(&all),
        pairs: pairs(&counts),
        runs: runs(&counts),
        flush: flush(hand, cut, is_crib),
        nobs: nobs(hand, cut),
    }
}

/// Multiplicity per rank ordinal; index 0 unused.
fn rank_counts(cards: &[Card]) -> [u16; 14] {
    let mut counts = [0u16; 14];
    for c in cards {
        counts[c.rank.ordinal() as usize] += 1;
    }
    counts
}

fn fifteens(cards: &[Card; 5]) -> u16 {
    let mut points = 0;
    for mask in 1u8..(1 << cards.len()) {
        let sum: u8 = cards
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, c)| c.value())
            .sum();
        if sum == FIFTEEN {
            points += 2;
        }
    }
    points
}

fn pairs(counts: &[u16; 14]) -> u16 {
    counts.iter().map(|&n| n * n.saturating_sub(1)).sum()
}

fn runs(counts: &[u16; 14]) -> u16 {
    // Maximal stretches of consecutive present ranks: (length, multiplicity product).
    let mut stretches: Vec<(u16, u16)> = Vec::new();
    let mut len = 0u16;
    let mut product = 1u16;
    for &n in &counts[1..] {
        if n > 0 {
            len += 1;
            product *= n;
        } else {
            if len > 0 {
                stretches.push((len, product));
            }
            len = 0;
            product = 1;
        }
    }
    if len > 0 {
        stretches.push((len, product));
    }

    let Some(longest) = stretches.iter().map(|&(l, _)| l).max() else {
        return 0;
    };
    if longest < 3 {
        return 0;
    }
    stretches
        .iter()
        .filter(|&&(l, _)| l == longest)
        .map(|&(l, p)| l * p)
        .sum()
}

fn flush(hand: &[Card; 4], cut: Card, is_crib: bool) -> u16 {
    let suit = hand[0].suit;
    if hand.iter().any(|c| c.suit != suit) {
        return 0;
    }
    match (cut.suit == suit, is_crib) {
        (true, _) => 5,
        (false, false) => 4,
        (false, true) => 0,
    }
}

fn nobs(hand: &[Card; 4], cut: Card) -> u16 {
    u16::from(
        hand.iter()
            .any(|c| c.rank == Rank::Jack && c.suit == cut.suit),
    )
}

/// Points for laying `card` on the current sequence.
///
/// The caller has already checked `total + card.value() <= 31`.
pub fn pegging_score(sequence: &[Card], card: Card, total: u8) -> PeggingScore {
    let new_total = total + card.value();
    let mut points = 0u16;

    if new_total == FIFTEEN {
        points += 2;
    }
    if new_total == PEGGING_LIMIT {
        points += 2;
    }

    let same_rank = 1 + sequence
        .iter()
        .rev()
        .take_while(|c| c.rank == card.rank)
        .count();
    points += match same_rank {
        2 => 2,
        3 => 6,
        4 => 12,
        _ => 0,
    };

    let mut played: Vec<Card> = sequence.to_vec();
    played.push(card);
    let longest = played.len().min(MAX_PEGGING_RUN);
    for len in (3..=longest).rev() {
        if is_run(&played[played.len() - len..]) {
            points += len as u16;
            break;
        }
    }

    PeggingScore {
        total: new_total,
        points,
    }
}

/// True when the cards' ranks are distinct and consecutive in any order.
fn is_run(cards: &[Card]) -> bool {
    let mut ordinals: Vec<u8> = cards.iter().map(|c| c.rank.ordinal()).collect();
    ordinals.sort_unstable();
    ordinals.windows(2).all(|w| w[1] == w[0] + 1)
}
