use std::env;

use crate::error::AppError;

/// In-memory SQLite, used when `DATABASE_URL` is unset.
pub const DEFAULT_DB_URL: &str = "sqlite::memory:";

/// Database URL from `DATABASE_URL`, defaulting to in-memory SQLite.
///
/// A set-but-blank value is a configuration error rather than a silent default.
pub fn db_url() -> Result<String, AppError> {
    match env::var("DATABASE_URL") {
        Ok(url) if url.trim().is_empty() => Err(AppError::config(
            "Environment variable 'DATABASE_URL' is set but empty",
        )),
        Ok(url) => Ok(url),
        Err(env::VarError::NotPresent) => Ok(DEFAULT_DB_URL.to_string()),
        Err(e) => Err(e.into()),
    }
}
