use crate::domain::pegging::{go, legal_plays, play_card};
use crate::domain::state::{ScoreEvent, ScoreReason, Stage};
use crate::domain::test_state_helpers::{card, cards, pegging_match};
use crate::domain::MatchState;
use crate::errors::domain::ValidationKind;

/// Dealer 0, seat 1 leads.
fn two_seat_match(seat0: &str, seat1: &str) -> MatchState {
    pegging_match(
        0,
        vec![cards(seat0), cards(seat1)],
        cards("8C 8D 4H 4S"),
        card("7C"),
    )
}

#[test]
fn thirty_one_scores_two_and_resets() {
    let mut state = two_seat_match("KH 5C 2D 3S", "QD 6H AC 9S");
    assert_eq!(state.turn, 1);

    play_card(&mut state, 1, card("QD")).unwrap();
    play_card(&mut state, 0, card("KH")).unwrap();
    play_card(&mut state, 1, card("6H")).unwrap();
    let events = play_card(&mut state, 0, card("5C")).unwrap();

    assert_eq!(
        events,
        vec![ScoreEvent {
            seat: 0,
            points: 2,
            reason: ScoreReason::Pegging,
        }]
    );
    assert_eq!(state.pegging_total, 0);
    assert!(state.pegging_sequence.is_empty());
    assert_eq!(state.last_played, None);
    assert_eq!(state.turn, 1, "seat after the 31 leads");
    assert_eq!(state.scores, vec![2, 0]);

    // Next card starts a fresh count.
    play_card(&mut state, 1, card("AC")).unwrap();
    assert_eq!(state.pegging_total, 1);
}

#[test]
fn out_of_turn_is_rejected_without_side_effects() {
    let mut state = two_seat_match("KH 5C 2D 3S", "QD 6H AC 9S");
    let before = state.clone();
    let err = play_card(&mut state, 0, card("KH")).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));
    assert_eq!(state, before);
}

#[test]
fn card_must_be_in_hand() {
    let mut state = two_seat_match("KH 5C 2D 3S", "QD 6H AC 9S");
    let err = play_card(&mut state, 1, card("KH")).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::CardNotInHand));
}

#[test]
fn cannot_exceed_thirty_one() {
    let mut state = two_seat_match("KH 5C 2D 3S", "QD 6H AC 9S");
    play_card(&mut state, 1, card("QD")).unwrap();
    play_card(&mut state, 0, card("KH")).unwrap();
    play_card(&mut state, 1, card("9S")).unwrap();
    // 29 on the count; only the deuce fits.
    assert_eq!(legal_plays(&state.hands[0], 29), cards("2D"));
    let err = play_card(&mut state, 0, card("5C")).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::ExceedsThirtyOne));
}

#[test]
fn go_with_a_legal_play_is_rejected() {
    let mut state = two_seat_match("KH 5C 2D 3S", "QD 6H AC 9S");
    let err = go(&mut state, 1).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::GoWithLegalPlay));
}

#[test]
fn stuck_table_falls_back_to_current_seat_which_must_go() {
    let mut state = two_seat_match("KH JC 9H 5D", "KS QD 9S 8H");
    play_card(&mut state, 1, card("KS")).unwrap();
    play_card(&mut state, 0, card("KH")).unwrap();
    play_card(&mut state, 1, card("9S")).unwrap();

    // Count is 29 and nobody can play: the turn stays with seat 1.
    assert_eq!(state.pegging_total, 29);
    assert_eq!(state.turn, 1);

    let err = go(&mut state, 0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));

    let events = go(&mut state, 1).unwrap();
    assert_eq!(
        events,
        vec![ScoreEvent {
            seat: 1,
            points: 1,
            reason: ScoreReason::LastCard,
        }]
    );
    assert_eq!(state.scores, vec![2, 1]);
    assert_eq!(state.pegging_total, 0);
    assert_eq!(state.turn, 0, "seat after the last player leads");
    assert!(state.passed.iter().all(|p| !p));
}

#[test]
fn seats_without_a_play_are_skipped() {
    let mut state = two_seat_match("KH JC 9H 5D", "KS QD AC 8H");
    play_card(&mut state, 1, card("KS")).unwrap();
    play_card(&mut state, 0, card("KH")).unwrap();
    play_card(&mut state, 1, card("8H")).unwrap();

    // 28: seat 0 holds nothing under 4, seat 1 still has the ace.
    assert_eq!(state.turn, 1);
    let events = play_card(&mut state, 1, card("AC")).unwrap();
    assert!(events.is_empty());
    assert_eq!(state.pegging_total, 29);
}

#[test]
fn pegging_requires_pegging_stage() {
    let mut state = two_seat_match("KH 5C 2D 3S", "QD 6H AC 9S");
    state.stage = Stage::Discard;
    let err = play_card(&mut state, 1, card("QD")).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PhaseMismatch));
    let err = go(&mut state, 1).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PhaseMismatch));
}

#[test]
fn three_seat_rotation_skips_stuck_seat() {
    // Dealer 2: seat 0 leads, then 1, then 2.
    let mut state = pegging_match(
        2,
        vec![cards("KH QH JH 10H"), cards("9C 9D 9H 9S"), cards("AC 2C 3C 4C")],
        cards("5C 5D 5H 5S"),
        card("KC"),
    );
    assert_eq!(state.turn, 0);
    play_card(&mut state, 0, card("KH")).unwrap();
    play_card(&mut state, 1, card("9C")).unwrap();
    play_card(&mut state, 2, card("AC")).unwrap();
    // 20: seat 0 can play a ten.
    play_card(&mut state, 0, card("QH")).unwrap();
    // 30: seat 1 holds nines, seat 2's lowest card is a deuce, seat 0 holds tens.
    assert_eq!(state.pegging_total, 30);
    assert_eq!(state.turn, 0);
    go(&mut state, 0).unwrap();
    assert_eq!(state.scores[0], 1);
    assert_eq!(state.turn, 1);
}
