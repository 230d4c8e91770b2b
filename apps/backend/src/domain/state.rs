use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::rules::{Rules, DECK_SIZE, WINNING_SCORE};
use crate::domain::scoring::HandScore;
use crate::domain::Card;
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

pub type Seat = u8; // 0..seat_count
pub type MatchId = i64;

/// Match progression stages, strictly ordered within a round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Dealing,
    Discard,
    Pegging,
    /// Transient: only observable inside round completion or on a finished match.
    Counting,
    Finished,
}

/// Bot strength tier.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Who occupies a seat. Persisted with the match so the scheduler survives restarts.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "difficulty", rename_all = "lowercase")]
pub enum SeatKind {
    Human,
    Bot(Difficulty),
}

impl SeatKind {
    pub const fn is_bot(self) -> bool {
        matches!(self, SeatKind::Bot(_))
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreReason {
    Pegging,
    LastCard,
    Hand,
    Crib,
}

/// A single addition to a seat's score.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub seat: Seat,
    pub points: u16,
    pub reason: ScoreReason,
}

/// Archived summary of a completed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round_no: u32,
    pub dealer: Seat,
    pub cut: Option<Card>,
    /// Pegging points per seat, last-card points included.
    pub pegging: Vec<u16>,
    /// Counted hand per seat; `None` when counting stopped before that seat.
    pub hands: Vec<Option<HandScore>>,
    pub crib: Option<HandScore>,
    pub kept_hands: Vec<Vec<Card>>,
    pub crib_cards: Vec<Card>,
    pub winner: Option<Seat>,
}

/// Full authoritative state of one match.
///
/// `Clone` is a deep copy; the coordinator relies on that to mutate a working
/// copy that never aliases the installed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub rules: Rules,
    pub seats: Vec<SeatKind>,
    pub seed: u64,
    /// 1-based once the first deal has happened.
    pub round_no: u32,
    pub dealer: Seat,
    pub turn: Seat,
    /// Last seat to play a card in the current pegging sequence.
    pub last_played: Option<Seat>,
    pub deck: Vec<Card>,
    pub cut: Option<Card>,
    pub hands: Vec<Vec<Card>>,
    /// Four-card hands frozen when discarding completes.
    pub kept_hands: Vec<Vec<Card>>,
    pub crib: Vec<Card>,
    pub pegging_total: u8,
    pub pegging_sequence: Vec<Card>,
    pub passed: Vec<bool>,
    pub discarded: Vec<bool>,
    pub pegging_points: Vec<u16>,
    pub scores: Vec<u16>,
    pub winner: Option<Seat>,
    pub stage: Stage,
    pub round_history: Vec<RoundRecord>,
    /// Tracked by the store, not part of the persisted JSON.
    #[serde(skip)]
    pub version: i64,
}

impl MatchState {
    /// New match in `Dealing`; call [`crate::domain::dealing::deal`] to start round 1.
    ///
    /// The first dealer is derived from the seed.
    pub fn new(seats: Vec<SeatKind>, seed: u64) -> Result<Self, DomainError> {
        let seat_count = u8::try_from(seats.len()).unwrap_or(u8::MAX);
        let rules = Rules::new(seat_count)?;
        let n = seats.len();
        Ok(Self {
            rules,
            seats,
            seed,
            round_no: 0,
            dealer: (seed % n as u64) as Seat,
            turn: 0,
            last_played: None,
            deck: Vec::new(),
            cut: None,
            hands: vec![Vec::new(); n],
            kept_hands: vec![Vec::new(); n],
            crib: Vec::new(),
            pegging_total: 0,
            pegging_sequence: Vec::new(),
            passed: vec![false; n],
            discarded: vec![false; n],
            pegging_points: vec![0; n],
            scores: vec![0; n],
            winner: None,
            stage: Stage::Dealing,
            round_history: Vec::new(),
            version: 0,
        })
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Seat `steps` places clockwise from `seat`.
    pub fn seat_after(&self, seat: Seat, steps: usize) -> Seat {
        ((seat as usize + steps) % self.seat_count()) as Seat
    }

    pub fn left_of_dealer(&self) -> Seat {
        self.seat_after(self.dealer, 1)
    }

    /// Validates a seat index and returns it as a vector index.
    pub fn check_seat(&self, seat: Seat) -> Result<usize, DomainError> {
        let idx = seat as usize;
        if idx >= self.seat_count() {
            return Err(DomainError::validation(
                ValidationKind::InvalidSeat,
                format!("Seat {seat} is not at this table"),
            ));
        }
        Ok(idx)
    }

    pub fn require_stage(&self, expected: Stage, ctx: &'static str) -> Result<(), DomainError> {
        if self.stage != expected {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("{ctx} requires stage {expected:?}, match is in {:?}", self.stage),
            ));
        }
        Ok(())
    }

    /// The seat expected to act next, if any.
    ///
    /// During discard every seat may act; the first seat from left of the
    /// dealer that has not yet discarded is reported.
    pub fn seat_to_act(&self) -> Option<Seat> {
        match self.stage {
            Stage::Discard => (1..=self.seat_count())
                .map(|k| self.seat_after(self.dealer, k))
                .find(|&s| !self.discarded[s as usize]),
            Stage::Pegging => Some(self.turn),
            Stage::Dealing | Stage::Counting | Stage::Finished => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Finished
    }

    /// Add points to a seat; the first seat to reach the winning score is recorded.
    pub(crate) fn award(
        &mut self,
        seat: Seat,
        points: u16,
        reason: ScoreReason,
        events: &mut Vec<ScoreEvent>,
    ) {
        if points == 0 {
            return;
        }
        let idx = seat as usize;
        self.scores[idx] = self.scores[idx].saturating_add(points);
        if matches!(reason, ScoreReason::Pegging | ScoreReason::LastCard) {
            self.pegging_points[idx] = self.pegging_points[idx].saturating_add(points);
        }
        if self.winner.is_none() && self.scores[idx] >= WINNING_SCORE {
            self.winner = Some(seat);
        }
        events.push(ScoreEvent {
            seat,
            points,
            reason,
        });
    }

    /// Clears the running pegging count for a fresh sequence.
    pub(crate) fn reset_sequence(&mut self) {
        self.pegging_total = 0;
        self.pegging_sequence.clear();
        self.passed.iter_mut().for_each(|p| *p = false);
        self.last_played = None;
    }

    /// Checks that every card of the deck is accounted for exactly once.
    ///
    /// Before pegging: hands, crib, deck. From pegging on: kept hands, crib,
    /// deck and cut, with live hands and the running sequence drawn from the
    /// kept hands.
    pub fn check_card_accounting(&self) -> Result<(), DomainError> {
        let corrupt = |detail: String| DomainError::infra(InfraErrorKind::DataCorruption, detail);

        let pool: Vec<Card> = match self.stage {
            Stage::Dealing => return Ok(()),
            Stage::Discard => self
                .hands
                .iter()
                .flatten()
                .chain(self.crib.iter())
                .chain(self.deck.iter())
                .copied()
                .collect(),
            Stage::Pegging | Stage::Counting | Stage::Finished => {
                let kept: HashSet<Card> = self.kept_hands.iter().flatten().copied().collect();
                let stray = self
                    .hands
                    .iter()
                    .flatten()
                    .chain(self.pegging_sequence.iter())
                    .find(|c| !kept.contains(c));
                if let Some(card) = stray {
                    return Err(corrupt(format!("{card} is not part of any kept hand")));
                }
                self.kept_hands
                    .iter()
                    .flatten()
                    .chain(self.crib.iter())
                    .chain(self.deck.iter())
                    .chain(self.cut.iter())
                    .copied()
                    .collect()
            }
        };

        let unique: HashSet<Card> = pool.iter().copied().collect();
        if pool.len() != DECK_SIZE || unique.len() != DECK_SIZE {
            return Err(corrupt(format!(
                "card accounting broken: {} cards, {} unique",
                pool.len(),
                unique.len()
            )));
        }
        Ok(())
    }
}
