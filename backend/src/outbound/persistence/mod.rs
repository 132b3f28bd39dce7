//! SQLite persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain's driven ports, backed by an
//! embedded SQLite file through `diesel-async`'s synchronous connection
//! wrapper and a `bb8` pool.
//!
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module; repositories convert them to domain values.
//! - Every checked-out connection enables foreign keys and a busy timeout.
//! - Diesel failures are classified once (`diesel_error_mapping.rs`) and
//!   surfaced as the port's own error type. A locked database maps to a
//!   connection error so callers can report it as temporarily unavailable.
//!
//! # Example
//!
//! ```ignore
//! use bitslow::outbound::persistence::{DbPool, DieselLedgerRepository, PoolConfig};
//!
//! run_migrations("ledger.db").await?;
//! let pool = DbPool::new(PoolConfig::new("ledger.db")).await?;
//! let ledger = DieselLedgerRepository::new(pool);
//! ```

mod diesel_client_repository;
mod diesel_error_mapping;
mod diesel_example_data_seed_repository;
mod diesel_ledger_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_client_repository::DieselClientRepository;
pub use diesel_example_data_seed_repository::DieselExampleDataSeedRepository;
pub use diesel_ledger_repository::DieselLedgerRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError, SqliteConn};
