//! Embedded schema migrations.

use diesel::connection::SimpleConnection;
use diesel::{Connection, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations compiled into the binary from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while migrating the database.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The database file could not be opened.
    #[error("failed to open database {path}: {message}")]
    Connect {
        /// Database path.
        path: String,
        /// Underlying failure.
        message: String,
    },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply {
        /// Underlying failure.
        message: String,
    },
    /// The blocking migration task panicked or was cancelled.
    #[error("migration task failed: {message}")]
    Task {
        /// Underlying failure.
        message: String,
    },
}

/// Switch the database to WAL mode and apply pending migrations.
///
/// Runs on tokio's blocking pool because the migration harness is
/// synchronous.
///
/// # Errors
///
/// Returns [`MigrationError`] if the file cannot be opened or a migration
/// fails.
pub async fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let path = database_url.to_owned();
    tokio::task::spawn_blocking(move || migrate_blocking(&path))
        .await
        .map_err(|err| MigrationError::Task {
            message: err.to_string(),
        })?
}

fn migrate_blocking(path: &str) -> Result<(), MigrationError> {
    let mut conn = SqliteConnection::establish(path).map_err(|err| MigrationError::Connect {
        path: path.to_owned(),
        message: err.to_string(),
    })?;
    conn.batch_execute("PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;")
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    info!(path, applied = applied.len(), "database migrated");
    Ok(())
}
