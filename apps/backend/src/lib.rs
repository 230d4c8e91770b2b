#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod ai;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use adapters::{InMemoryMatchStore, SeaMatchStore};
pub use config::coordinator::CoordinatorConfig;
pub use config::db::db_url;
pub use error::AppError;
pub use errors::ErrorCode;
pub use infra::db::connect_db;
pub use repos::match_store::{CasOutcome, PersistenceGateway, StoredMatch};
pub use services::match_flow::{MatchCoordinator, MatchIntent, MutationResult};

// Prelude for test convenience
pub mod prelude {
    pub use super::config::coordinator::*;
    pub use super::domain::*;
    pub use super::error::*;
    pub use super::repos::match_store::*;
    pub use super::services::match_flow::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
