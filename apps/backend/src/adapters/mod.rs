//! Persistence adapters implementing the match store contract.

pub mod match_snapshots_sea;
pub mod memory;

pub use match_snapshots_sea::SeaMatchStore;
pub use memory::InMemoryMatchStore;
