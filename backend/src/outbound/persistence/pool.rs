//! Async connection pool over SQLite.
//!
//! `diesel-async` drives the blocking `SqliteConnection` through its
//! `SyncConnectionWrapper`, which moves each query onto tokio's blocking
//! pool, while `bb8` manages checkout limits and timeouts.
//!
//! Every checkout applies the per-connection pragmas: a busy timeout so
//! writers queue behind each other and enforced foreign keys.

use std::time::Duration;

use diesel::SqliteConnection;
use diesel_async::SimpleAsyncConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;

/// Async SQLite connection type used by the repositories.
pub type SqliteConn = SyncConnectionWrapper<SqliteConnection>;

/// Pragmas applied on every checkout.
pub(crate) const CONNECTION_PRAGMAS: &str =
    "PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;";

/// Errors raised while building the pool or checking out a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection could be checked out or prepared.
    #[error("failed to get connection from pool: {message}")]
    Checkout {
        /// Underlying failure.
        message: String,
    },
    /// The pool could not be built.
    #[error("failed to build connection pool: {message}")]
    Build {
        /// Underlying failure.
        message: String,
    },
}

impl PoolError {
    /// Build a checkout error.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Build a construction error.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Pool configuration.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use bitslow::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("bitslow.db")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.database_url(), "bitslow.db");
/// assert_eq!(config.max_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Configuration for the SQLite file at `database_url`.
    ///
    /// Defaults: eight connections, one kept idle, 30 second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 8,
            min_idle: Some(1),
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Set the maximum number of pooled connections.
    #[must_use]
    pub const fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the number of idle connections to keep.
    #[must_use]
    pub const fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Set the checkout timeout.
    #[must_use]
    pub const fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Database path.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Maximum number of pooled connections.
    pub const fn max_size(&self) -> u32 {
        self.max_size
    }
}

/// Shared SQLite connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<SqliteConn>,
}

impl DbPool {
    /// Build a pool for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] if the initial connections cannot be
    /// opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<SqliteConn>::new(config.database_url);
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Check out a connection with the session pragmas applied.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] on timeout or if the pragmas fail.
    pub async fn get(&self) -> Result<PooledConnection<'_, SqliteConn>, PoolError> {
        let mut conn = self
            .inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))?;
        conn.batch_execute(CONNECTION_PRAGMAS)
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))?;
        Ok(conn)
    }
}
