//! Driven port for persisting generated example ledgers.
//!
//! Adapters record the seed run and insert the ledger atomically, so a seed
//! is either fully applied or not at all.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{BitTriple, CoinValue, NewClient};

use super::define_port_error;

define_port_error! {
    /// Errors raised by example data seed repository adapters.
    pub enum ExampleDataSeedRepositoryError {
        /// No connection could be checked out.
        Connection { message: String } => "example data seeding connection failed: {message}",
        /// A query failed during execution.
        Query { message: String } => "example data seeding query failed: {message}",
        /// A generated row referenced a client or coin outside the request.
        DanglingReference { message: String } => "example data references a missing row: {message}",
    }
}

/// Outcome of recording a seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    /// The run was recorded and the ledger inserted.
    Applied,
    /// The seed key was already recorded; nothing was written.
    AlreadySeeded,
}

/// Generated coin; `owner` indexes into [`ExampleDataSeedRequest::clients`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleDataSeedCoin {
    /// Coin value.
    pub value: CoinValue,
    /// Unique components.
    pub bits: BitTriple,
    /// Final owner after replaying the transactions.
    pub owner: Option<usize>,
}

/// Generated transaction; indexes refer to the request's clients and coins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleDataSeedTransaction {
    /// Traded coin.
    pub coin: usize,
    /// Previous owner, `None` for a first sale.
    pub seller: Option<usize>,
    /// New owner.
    pub buyer: usize,
    /// Price paid.
    pub amount: i64,
    /// Sale timestamp.
    pub transaction_date: DateTime<Utc>,
}

/// Everything needed to apply one seed run.
#[derive(Debug, Clone)]
pub struct ExampleDataSeedRequest {
    /// Seed name recorded in the run table.
    pub seed_key: String,
    /// RNG seed used for generation.
    pub seed: i64,
    /// Time the run is recorded at.
    pub applied_at: DateTime<Utc>,
    /// Clients to insert, in generation order.
    pub clients: Vec<NewClient>,
    /// Coins to insert, in generation order.
    pub coins: Vec<ExampleDataSeedCoin>,
    /// Transactions to append, oldest first.
    pub transactions: Vec<ExampleDataSeedTransaction>,
}

/// Applies seed runs in a single database transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExampleDataSeedRepository: Send + Sync {
    /// Record the run and insert its ledger unless the key already exists.
    async fn seed_example_data(
        &self,
        request: ExampleDataSeedRequest,
    ) -> Result<SeedingResult, ExampleDataSeedRepositoryError>;
}
