//! Tunables for the match coordinator.

use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Coordinator limits. Construct with `Default` or `from_env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Full load-compute-CAS cycles per mutation before giving up with a conflict.
    pub max_cas_attempts: u32,
    /// Bot moves the scheduler may run after a single human mutation.
    pub max_bot_iterations: u32,
    /// Drop the in-memory slot once a match finishes.
    pub evict_finished: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            max_cas_attempts: 3,
            max_bot_iterations: 2000,
            evict_finished: true,
        }
    }
}

impl CoordinatorConfig {
    /// Defaults overridden by `CRIBBAGE_MAX_CAS_ATTEMPTS`,
    /// `CRIBBAGE_MAX_BOT_ITERATIONS` and `CRIBBAGE_EVICT_FINISHED`.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let config = Self {
            max_cas_attempts: parse_var("CRIBBAGE_MAX_CAS_ATTEMPTS")?
                .unwrap_or(defaults.max_cas_attempts),
            max_bot_iterations: parse_var("CRIBBAGE_MAX_BOT_ITERATIONS")?
                .unwrap_or(defaults.max_bot_iterations),
            evict_finished: parse_var("CRIBBAGE_EVICT_FINISHED")?
                .unwrap_or(defaults.evict_finished),
        };

        if config.max_cas_attempts == 0 {
            return Err(AppError::config(
                "CRIBBAGE_MAX_CAS_ATTEMPTS must be at least 1",
            ));
        }
        Ok(config)
    }
}

/// Parse an optional environment variable; unset means `None`.
fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            AppError::config(format!(
                "Environment variable '{name}' has invalid value '{raw}'"
            ))
        }),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
