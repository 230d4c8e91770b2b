use crate::domain::counting::maybe_finish_round;
use crate::domain::pegging::play_card;
use crate::domain::state::{ScoreReason, Stage};
use crate::domain::test_state_helpers::{card, cards, pegging_match};
use crate::domain::MatchState;

/// Pegging state with every card already played, ready to count.
fn ready_to_count(seat0: &str, seat1: &str, crib: &str, cut: &str) -> MatchState {
    let mut state = pegging_match(0, vec![cards(seat0), cards(seat1)], cards(crib), card(cut));
    state.hands = vec![Vec::new(), Vec::new()];
    state
}

#[test]
fn counting_stops_once_non_dealer_reaches_121() {
    let mut state = ready_to_count("4H 4S 6C 6D", "5H 5C 5S JD", "2C 3C 9D KC", "5D");
    state.scores = vec![120, 100];
    let mut events = Vec::new();

    maybe_finish_round(&mut state, &mut events).unwrap();

    assert_eq!(state.stage, Stage::Finished);
    assert_eq!(state.winner, Some(1));
    assert_eq!(state.scores, vec![120, 129]);
    assert_eq!(events.len(), 1);

    let record = state.round_history.last().unwrap();
    assert_eq!(record.hands[1].map(|h| h.total()), Some(29));
    assert_eq!(record.hands[0], None, "dealer's hand is never counted");
    assert_eq!(record.crib, None, "crib is never counted");
    assert_eq!(record.winner, Some(1));
}

#[test]
fn dealer_hand_win_skips_crib() {
    let mut state = ready_to_count("5H 5C 5S JD", "2C 4D 9H KS", "3D 3H 8S QH", "7C");
    state.scores = vec![119, 0];
    let mut events = Vec::new();

    maybe_finish_round(&mut state, &mut events).unwrap();

    assert_eq!(state.scores, vec![133, 2]);
    assert_eq!(state.winner, Some(0));
    let reasons: Vec<ScoreReason> = events.iter().map(|e| e.reason).collect();
    assert_eq!(reasons, vec![ScoreReason::Hand, ScoreReason::Hand]);
    assert_eq!(state.round_history.last().unwrap().crib, None);
}

#[test]
fn does_nothing_while_cards_remain() {
    let mut state = pegging_match(
        0,
        vec![cards("4H 4S 6C 6D"), cards("5H 5C 5S JD")],
        cards("2C 3C 9D KC"),
        card("5D"),
    );
    let before = state.clone();
    let mut events = Vec::new();
    maybe_finish_round(&mut state, &mut events).unwrap();
    assert_eq!(state, before);
    assert!(events.is_empty());
}

#[test]
fn full_round_counts_and_deals_next() {
    let mut state = pegging_match(
        0,
        vec![cards("KH 5C 2D 3S"), cards("QD 6H AC 9S")],
        cards("8C 8D 4H 4S"),
        card("7C"),
    );

    let plays = [
        (1, "QD"),
        (0, "KH"),
        (1, "6H"),
        (0, "5C"), // 31
        (1, "AC"),
        (0, "2D"),
        (1, "9S"),
        (0, "3S"), // 15, then last card
    ];
    let mut events = Vec::new();
    for (seat, token) in plays {
        assert_eq!(state.turn, seat, "turn before {token}");
        events.extend(play_card(&mut state, seat, card(token)).unwrap());
    }

    let last_card: Vec<_> = events
        .iter()
        .filter(|e| e.reason == ScoreReason::LastCard)
        .collect();
    assert_eq!(last_card.len(), 1);
    assert_eq!(last_card[0].seat, 0);

    let record = &state.round_history[0];
    assert_eq!(record.pegging, vec![5, 0]);
    assert_eq!(record.hands[0].map(|h| h.total()), Some(6));
    assert_eq!(record.hands[1].map(|h| h.total()), Some(2));
    assert_eq!(record.crib.map(|h| h.total()), Some(10));
    assert_eq!(record.winner, None);

    assert_eq!(state.scores, vec![21, 2]);
    assert_eq!(state.dealer, 1);
    assert_eq!(state.round_no, 2);
    assert_eq!(state.stage, Stage::Discard);
    assert_eq!(state.turn, 0);
    assert!(state.hands.iter().all(|h| h.len() == 6));
    state.check_card_accounting().unwrap();
}

#[test]
fn pegging_out_plays_the_round_to_the_last_card() {
    let mut state = pegging_match(
        0,
        vec![cards("KH 5C 2D 3S"), cards("QD 6H AC 9S")],
        cards("8C 8D 4H 4S"),
        card("7C"),
    );
    state.scores = vec![119, 0];

    play_card(&mut state, 1, card("QD")).unwrap();
    play_card(&mut state, 0, card("KH")).unwrap();
    play_card(&mut state, 1, card("6H")).unwrap();
    play_card(&mut state, 0, card("5C")).unwrap(); // 31 takes seat 0 to 121

    assert_eq!(state.winner, Some(0));
    assert_eq!(state.stage, Stage::Pegging, "cards are still in hand");
    assert_eq!(state.scores, vec![121, 0]);
    assert_eq!(state.hands.iter().map(Vec::len).sum::<usize>(), 4);
    assert!(state.round_history.is_empty());

    let mut events = Vec::new();
    for (seat, token) in [(1, "AC"), (0, "2D"), (1, "9S"), (0, "3S")] {
        assert_eq!(state.turn, seat, "turn before {token}");
        events.extend(play_card(&mut state, seat, card(token)).unwrap());
    }

    assert_eq!(state.stage, Stage::Finished);
    assert_eq!(state.winner, Some(0));
    assert!(state.hands.iter().all(Vec::is_empty));
    // 15 and last card still peg; no hand or crib is counted.
    assert_eq!(state.scores, vec![124, 0]);
    assert!(events
        .iter()
        .all(|e| matches!(e.reason, ScoreReason::Pegging | ScoreReason::LastCard)));

    let record = state.round_history.last().unwrap();
    assert_eq!(record.pegging, vec![5, 0]);
    assert!(record.hands.iter().all(Option::is_none));
    assert_eq!(record.crib, None);
    assert_eq!(record.winner, Some(0));
    state.check_card_accounting().unwrap();
}
