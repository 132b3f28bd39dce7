//! Test utilities shared by unit and integration tests.
//!
//! Compiled with the `test-support` feature, which the crate's own
//! dev-dependency entry enables.

use std::path::Path;

use tempfile::TempDir;
use thiserror::Error;

use crate::outbound::persistence::{DbPool, MigrationError, PoolConfig, PoolError, run_migrations};

/// Failure to provision a throwaway database.
#[derive(Debug, Error)]
pub enum TestDatabaseError {
    /// The temporary directory could not be created.
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[from] std::io::Error),
    /// Migrations failed.
    #[error(transparent)]
    Migration(#[from] MigrationError),
    /// The pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Migrated SQLite database in a temporary directory.
///
/// The directory, and with it the database file, is removed on drop.
pub struct TestDatabase {
    dir: TempDir,
    url: String,
    pool: DbPool,
}

impl TestDatabase {
    /// Create, migrate and pool a fresh database.
    ///
    /// # Errors
    ///
    /// Returns [`TestDatabaseError`] when any provisioning step fails.
    pub async fn new() -> Result<Self, TestDatabaseError> {
        let dir = tempfile::tempdir()?;
        let url = dir.path().join("ledger.db").to_string_lossy().into_owned();
        run_migrations(&url).await?;
        let pool = DbPool::new(PoolConfig::new(url.as_str()).with_max_size(4)).await?;
        Ok(Self { dir, url, pool })
    }

    /// Shared pool over the database.
    #[must_use]
    pub const fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Database file path.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Directory holding the database file.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}
