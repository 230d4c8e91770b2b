//! Round completion: last card, counting order, and the next deal.

use crate::domain::dealing::deal;
use crate::domain::scoring::{score_hand, HandScore};
use crate::domain::state::{MatchState, RoundRecord, ScoreEvent, ScoreReason, Stage};
use crate::domain::Card;
use crate::errors::domain::{DomainError, InfraErrorKind};

fn four_cards(cards: &[Card], what: &str) -> Result<[Card; 4], DomainError> {
    <[Card; 4]>::try_from(cards).map_err(|_| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("{what} has {} cards, expected 4", cards.len()),
        )
    })
}

/// Close the round once every hand is empty.
///
/// Counting runs non-dealers from left of the dealer, then the dealer's hand,
/// then the crib, and stops the moment a seat reaches the winning score. A
/// seat that pegged out earlier in the round has already won, so nothing is
/// counted. Without a winner the dealer rotates and the next round is dealt.
pub fn maybe_finish_round(
    state: &mut MatchState,
    events: &mut Vec<ScoreEvent>,
) -> Result<(), DomainError> {
    if state.stage != Stage::Pegging {
        return Ok(());
    }
    if state.hands.iter().any(|h| !h.is_empty()) {
        return Ok(());
    }

    state.stage = Stage::Counting;
    if !state.pegging_sequence.is_empty() {
        if let Some(last) = state.last_played {
            state.award(last, 1, ScoreReason::LastCard, events);
        }
    }
    state.reset_sequence();

    let n = state.seat_count();
    let mut hand_scores: Vec<Option<HandScore>> = vec![None; n];
    let mut crib_score = None;

    if state.winner.is_none() {
        let cut = state.cut.ok_or_else(|| {
            DomainError::infra(InfraErrorKind::DataCorruption, "cut card missing at count")
        })?;
        // Non-dealers in order, the dealer last.
        for k in 1..=n {
            let seat = state.seat_after(state.dealer, k);
            let hand = four_cards(&state.kept_hands[seat as usize], "kept hand")?;
            let score = score_hand(&hand, cut, false);
            hand_scores[seat as usize] = Some(score);
            state.award(seat, score.total(), ScoreReason::Hand, events);
            if state.winner.is_some() {
                break;
            }
        }
        if state.winner.is_none() {
            let crib = four_cards(&state.crib, "crib")?;
            let score = score_hand(&crib, cut, true);
            crib_score = Some(score);
            state.award(state.dealer, score.total(), ScoreReason::Crib, events);
        }
    }

    state.round_history.push(RoundRecord {
        round_no: state.round_no,
        dealer: state.dealer,
        cut: state.cut,
        pegging: state.pegging_points.clone(),
        hands: hand_scores,
        crib: crib_score,
        kept_hands: state.kept_hands.clone(),
        crib_cards: state.crib.clone(),
        winner: state.winner,
    });

    if state.winner.is_some() {
        state.stage = Stage::Finished;
        return Ok(());
    }

    state.dealer = state.seat_after(state.dealer, 1);
    state.stage = Stage::Dealing;
    deal(state)
}
