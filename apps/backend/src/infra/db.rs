use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::db_url;
use crate::error::AppError;

/// Connect to `url` and bring the schema up to date.
///
/// In-memory SQLite gives every pooled connection its own database, so the
/// pool is pinned to a single connection for that case.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(url.to_owned());
    if url.starts_with("sqlite::memory:") {
        options.max_connections(1).min_connections(1);
    }
    options.sqlx_logging(false);

    let conn = Database::connect(options).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(backend = ?conn.get_database_backend(), "database ready");
    Ok(conn)
}

/// `connect_db` against the URL from the environment.
pub async fn connect_from_env() -> Result<DatabaseConnection, AppError> {
    let url = db_url()?;
    connect_db(&url).await
}
