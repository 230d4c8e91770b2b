//! RNG seed derivation utilities for deterministic match behavior.
//!
//! Every random decision (shuffles, easy-bot picks) is derived from the
//! match seed so a match can be replayed from its opening parameters.

/// Derive a seed for dealing cards in a round.
///
/// Unique per (match, round) combination.
pub fn derive_dealing_seed(match_seed: u64, round_no: u32) -> u64 {
    match_seed
        .wrapping_add((round_no as u64).wrapping_mul(1_000_000))
        .wrapping_add(2)
}

/// Derive a seed for a bot decision.
///
/// The state version is part of the key, so a bot re-deriving its move after a
/// conflict uses fresh randomness instead of replaying a stale choice.
pub fn derive_bot_seed(match_seed: u64, version: i64, seat: u8) -> u64 {
    match_seed
        .wrapping_add((version as u64).wrapping_mul(10_000))
        .wrapping_add((seat as u64).wrapping_mul(100))
        .wrapping_add(1)
}
