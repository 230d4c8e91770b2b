//! Per-match metrics and the run summary.

use serde::Serialize;

use crate::simulator::MatchOutcome;

/// One JSON line per match.
#[derive(Debug, Serialize)]
pub struct MatchMetrics {
    pub match_id: i64,
    pub seed: u64,
    pub seats: Vec<&'static str>,
    pub winner: Option<u8>,
    pub scores: Vec<u16>,
    pub rounds: u32,
    pub bot_moves: u32,
    pub commits: u64,
    pub duration_ms: f64,
    /// Points per seat by source, summed over all rounds.
    pub pegging_points: Vec<u32>,
    pub hand_points: Vec<u32>,
    pub crib_points: Vec<u32>,
    pub best_hand: u16,
}

pub fn build_match_metrics(outcome: &MatchOutcome, tiers: &[&'static str]) -> MatchMetrics {
    let state = &outcome.state;
    let n = state.seat_count();
    let mut pegging_points = vec![0u32; n];
    let mut hand_points = vec![0u32; n];
    let mut crib_points = vec![0u32; n];
    let mut best_hand = 0u16;

    for round in &state.round_history {
        for (seat, points) in round.pegging.iter().enumerate() {
            pegging_points[seat] += u32::from(*points);
        }
        for (seat, hand) in round.hands.iter().enumerate() {
            if let Some(score) = hand {
                hand_points[seat] += u32::from(score.total());
                best_hand = best_hand.max(score.total());
            }
        }
        if let Some(crib) = &round.crib {
            crib_points[usize::from(round.dealer)] += u32::from(crib.total());
            best_hand = best_hand.max(crib.total());
        }
    }

    MatchMetrics {
        match_id: outcome.match_id,
        seed: outcome.seed,
        seats: tiers.to_vec(),
        winner: state.winner,
        scores: state.scores.clone(),
        rounds: state.round_no,
        bot_moves: outcome.bot_moves,
        commits: outcome.commits,
        duration_ms: outcome.duration_ms,
        pegging_points,
        hand_points,
        crib_points,
        best_hand,
    }
}

/// Aggregate over every completed match.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub matches: u32,
    pub completed: usize,
    pub errors: u32,
    pub seats: Vec<&'static str>,
    pub wins: Vec<u32>,
    pub avg_score: Vec<f64>,
    pub avg_rounds: f64,
    pub avg_bot_moves: f64,
    pub elapsed_ms: f64,
}

pub fn summarize(
    metrics: &[MatchMetrics],
    tiers: &[&'static str],
    requested: u32,
    errors: u32,
    elapsed_ms: f64,
) -> RunSummary {
    let n = tiers.len();
    let mut wins = vec![0u32; n];
    let mut score_sums = vec![0f64; n];
    let mut rounds = 0f64;
    let mut moves = 0f64;

    for m in metrics {
        if let Some(w) = m.winner {
            wins[usize::from(w)] += 1;
        }
        for (seat, score) in m.scores.iter().enumerate() {
            score_sums[seat] += f64::from(*score);
        }
        rounds += f64::from(m.rounds);
        moves += f64::from(m.bot_moves);
    }

    let completed = metrics.len();
    let denom = completed.max(1) as f64;
    RunSummary {
        matches: requested,
        completed,
        errors,
        seats: tiers.to_vec(),
        wins,
        avg_score: score_sums.into_iter().map(|s| s / denom).collect(),
        avg_rounds: rounds / denom,
        avg_bot_moves: moves / denom,
        elapsed_ms,
    }
}
