//! Services layer - coordinates domain transitions with persistence.

pub mod match_flow;

pub use match_flow::{MatchCoordinator, MatchIntent, MutationResult};
