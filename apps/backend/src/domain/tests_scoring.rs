use crate::domain::scoring::{pegging_score, score_hand, HandScore};
use crate::domain::test_state_helpers::{card, cards};
use crate::domain::Card;

fn hand(tokens: &str) -> [Card; 4] {
    <[Card; 4]>::try_from(cards(tokens)).unwrap()
}

#[test]
fn canonical_twenty_nine() {
    let score = score_hand(&hand("5H 5C 5S JD"), card("5D"), false);
    assert_eq!(
        score,
        HandScore {
            fifteens: 16,
            pairs: 12,
            runs: 0,
            flush: 0,
            nobs: 1,
        }
    );
    assert_eq!(score.total(), 29);
}

#[test]
fn single_fifteen_scores_two() {
    let score = score_hand(&hand("2C 4D 9H KS"), card("7C"), false);
    assert_eq!(score.fifteens, 2);
    assert_eq!(score.total(), 2);
}

#[test]
fn double_run_of_three() {
    let score = score_hand(&hand("3H 3S 4D 5C"), card("9H"), false);
    assert_eq!(score.runs, 6);
    assert_eq!(score.pairs, 2);
    assert_eq!(score.fifteens, 4);
    assert_eq!(score.total(), 12);
}

#[test]
fn double_run_of_four() {
    let score = score_hand(&hand("6C 7D 8H 8S"), card("9C"), false);
    assert_eq!(score.runs, 8);
    assert_eq!(score.total(), 16);
}

#[test]
fn triple_run_in_crib() {
    let score = score_hand(&hand("3C 3D 3H 4S"), card("5D"), true);
    assert_eq!(score.runs, 9);
    assert_eq!(score.pairs, 6);
    assert_eq!(score.fifteens, 6);
    assert_eq!(score.total(), 21);
}

#[test]
fn run_of_five_counts_once() {
    let score = score_hand(&hand("9C 10D JH QS"), card("KC"), false);
    assert_eq!(score.runs, 5);
}

#[test]
fn hand_flush_rules() {
    let flush_hand = hand("2H 4H 6H 8H");
    assert_eq!(score_hand(&flush_hand, card("KC"), false).flush, 4);
    assert_eq!(score_hand(&flush_hand, card("QH"), false).flush, 5);
    assert_eq!(score_hand(&flush_hand, card("KC"), false).total(), 4);
}

#[test]
fn crib_flush_needs_matching_cut() {
    let crib = hand("2H 4H 6H 8H");
    assert_eq!(score_hand(&crib, card("KC"), true).flush, 0);
    assert_eq!(score_hand(&crib, card("QH"), true).flush, 5);
}

#[test]
fn flush_ignores_cut_only_match() {
    // Three hearts plus a heart cut is not a flush.
    assert_eq!(score_hand(&hand("2H 4H 6H 8C"), card("QH"), false).flush, 0);
}

#[test]
fn nobs_needs_jack_of_cut_suit() {
    let h = hand("JH 2C 4D 6S");
    assert_eq!(score_hand(&h, card("9H"), false).nobs, 1);
    assert_eq!(score_hand(&h, card("9C"), false).nobs, 0);
    // The cut itself being a jack is not nobs.
    assert_eq!(score_hand(&hand("2C 4D 6S 8H"), card("JH"), false).nobs, 0);
}

#[test]
fn zero_hand() {
    let score = score_hand(&hand("2C 4D 6S 8H"), card("KS"), false);
    assert_eq!(score.total(), 0);
}

#[test]
fn pegging_fifteen() {
    let s = pegging_score(&cards("7H"), card("8C"), 7);
    assert_eq!((s.total, s.points), (15, 2));
}

#[test]
fn pegging_pairs_by_trailing_run_of_ranks() {
    assert_eq!(pegging_score(&cards("5H"), card("5C"), 5).points, 2);
    // Triple on fifteen: 6 + 2.
    assert_eq!(pegging_score(&cards("5H 5C"), card("5S"), 10).points, 8);
    assert_eq!(pegging_score(&cards("4H 4C 4S"), card("4D"), 12).points, 12);
    // An interrupted pair does not count.
    assert_eq!(pegging_score(&cards("4H 9C"), card("4D"), 13).points, 0);
}

#[test]
fn pegging_runs_any_order() {
    let s = pegging_score(&cards("4H 6C"), card("5D"), 10);
    assert_eq!(s.total, 15);
    assert_eq!(s.points, 5);
}

#[test]
fn pegging_run_broken_by_pair() {
    assert_eq!(pegging_score(&cards("4H 6C 6D"), card("5S"), 16).points, 0);
}

#[test]
fn pegging_longest_run_wins() {
    assert_eq!(pegging_score(&cards("AH 2C 3D"), card("4S"), 6).points, 4);
    // Only the suffix matters: 10, A, 2, 3 is a run of three.
    assert_eq!(pegging_score(&cards("10H AH 2C"), card("3S"), 13).points, 3);
}

#[test]
fn pegging_thirty_one() {
    let s = pegging_score(&cards("KH QC 5D"), card("6S"), 25);
    assert_eq!((s.total, s.points), (31, 2));
}
