//! Property tests for dealing and whole-match play (pure domain, no DB).
//!
//! Properties tested:
//! - After a deal, hands + deck + empty crib partition the 52-card deck
//! - Playing a match out never breaks card accounting, never takes the count
//!   past 31, and never lowers a score

use std::collections::HashSet;

use proptest::prelude::*;

use crate::domain::pegging::legal_plays;
use crate::domain::rules::{DECK_SIZE, PEGGING_LIMIT};
use crate::domain::state::{MatchState, Stage};
use crate::domain::test_gens;
use crate::domain::test_state_helpers::dealt_match;
use crate::domain::{discard, go, play_card};

/// Apply one canonical move for whoever is to act: the first cards in hand
/// for a discard, the first legal card (or go) while pegging.
fn step(state: &mut MatchState) {
    let seat = state.seat_to_act().expect("someone must be able to act");
    let hand = state.hands[seat as usize].clone();
    match state.stage {
        Stage::Discard => {
            let n = state.rules.discard_count();
            discard(state, seat, &hand[..n]).unwrap();
        }
        Stage::Pegging => match legal_plays(&hand, state.pegging_total).first() {
            Some(&card) => {
                play_card(state, seat, card).unwrap();
            }
            None => {
                go(state, seat).unwrap();
            }
        },
        other => panic!("no actor expected in {other:?}"),
    }
}

proptest! {
    #![proptest_config(test_gens::proptest_config())]

    /// Property: a fresh deal partitions the deck for 2, 3 and 4 seats.
    #[test]
    fn prop_deal_partitions_deck(n in test_gens::seat_count(), seed in test_gens::seed()) {
        let state = dealt_match(n, seed);
        let hand_size = state.rules.hand_size();

        prop_assert!(state.hands.iter().all(|h| h.len() == hand_size));
        prop_assert!(state.crib.is_empty());

        let all: Vec<_> = state
            .hands
            .iter()
            .flatten()
            .chain(state.deck.iter())
            .copied()
            .collect();
        let unique: HashSet<_> = all.iter().copied().collect();
        prop_assert_eq!(all.len(), DECK_SIZE);
        prop_assert_eq!(unique.len(), DECK_SIZE);
    }

    /// Property: a match played to the end keeps every invariant at every step.
    #[test]
    fn prop_match_plays_out_cleanly(n in test_gens::seat_count(), seed in test_gens::seed()) {
        let mut state = dealt_match(n, seed);
        let mut steps = 0;

        while !state.is_finished() {
            let scores_before = state.scores.clone();
            let round_before = state.round_no;
            let stage_before = state.stage;

            step(&mut state);
            steps += 1;
            prop_assert!(steps < 10_000, "match did not finish");

            prop_assert!(state.pegging_total <= PEGGING_LIMIT);
            prop_assert!(
                state.scores.iter().zip(&scores_before).all(|(after, before)| after >= before)
            );
            state.check_card_accounting().unwrap();

            if state.stage == Stage::Pegging {
                prop_assert!(state.cut.is_some());
                prop_assert_eq!(state.crib.len(), 4);
            }
            // A new round only ever starts from pegging.
            if state.round_no != round_before {
                prop_assert_eq!(stage_before, Stage::Pegging);
                prop_assert_eq!(state.stage, Stage::Discard);
            }
        }

        let winner = state.winner.unwrap() as usize;
        prop_assert!(state.scores[winner] >= 121);
        prop_assert!(state.hands.iter().all(Vec::is_empty), "a match only finishes with every hand played");
        prop_assert_eq!(state.round_history.len() as u32, state.round_no);
    }
}
