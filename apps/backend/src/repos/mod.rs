//! Repository contracts for the coordinator.

pub mod match_store;

pub use match_store::{CasOutcome, PersistenceGateway, StoredMatch};
