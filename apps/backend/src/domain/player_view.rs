//! What a single seat is allowed to see of a match.
//!
//! Opponent hands are reduced to counts. Kept hands and crib contents stay
//! hidden until the match reaches counting or finished; completed rounds are
//! public through [`RoundRecord`].

use serde::{Deserialize, Serialize};

use crate::domain::pegging::legal_plays;
use crate::domain::state::{MatchState, RoundRecord, Seat, SeatKind, Stage};
use crate::domain::Card;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub seat: Seat,
    pub stage: Stage,
    pub round_no: u32,
    pub dealer: Seat,
    pub to_act: Option<Seat>,
    pub seats: Vec<SeatKind>,
    /// The requesting seat's own cards.
    pub hand: Vec<Card>,
    /// Card count per seat, own seat included.
    pub hand_counts: Vec<usize>,
    pub discarded: Vec<bool>,
    pub crib_count: usize,
    pub cut: Option<Card>,
    pub pegging_total: u8,
    pub pegging_sequence: Vec<Card>,
    pub scores: Vec<u16>,
    pub winner: Option<Seat>,
    /// Cards this seat may play right now; empty unless it is their pegging turn.
    pub legal_plays: Vec<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kept_hands: Option<Vec<Vec<Card>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crib: Option<Vec<Card>>,
    pub last_round: Option<RoundRecord>,
    pub version: i64,
}

impl PlayerView {
    pub fn for_seat(state: &MatchState, seat: Seat) -> Result<Self, DomainError> {
        let idx = state.check_seat(seat)?;
        let revealed = matches!(state.stage, Stage::Counting | Stage::Finished);
        let my_turn = state.stage == Stage::Pegging && state.turn == seat;

        Ok(Self {
            seat,
            stage: state.stage,
            round_no: state.round_no,
            dealer: state.dealer,
            to_act: state.seat_to_act(),
            seats: state.seats.clone(),
            hand: state.hands[idx].clone(),
            hand_counts: state.hands.iter().map(Vec::len).collect(),
            discarded: state.discarded.clone(),
            crib_count: state.crib.len(),
            cut: state.cut,
            pegging_total: state.pegging_total,
            pegging_sequence: state.pegging_sequence.clone(),
            scores: state.scores.clone(),
            winner: state.winner,
            legal_plays: if my_turn {
                legal_plays(&state.hands[idx], state.pegging_total)
            } else {
                Vec::new()
            },
            kept_hands: revealed.then(|| state.kept_hands.clone()),
            crib: revealed.then(|| state.crib.clone()),
            last_round: state.round_history.last().cloned(),
            version: state.version,
        })
    }
}
