//! Driven port for coins and the transaction ledger.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use crate::domain::{
    BitTriple, ClientId, Coin, CoinId, CoinListing, CoinValue, HistoryEntry, LedgerEntry,
    ProfileSummary, TransactionFilter, TransactionRecord,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ledger repository adapters.
    pub enum LedgerPersistenceError {
        /// No connection could be checked out or the database was busy.
        Connection { message: String } => "ledger repository connection failed: {message}",
        /// A query failed during execution.
        Query { message: String } => "ledger repository query failed: {message}",
        /// The component triple is already taken.
        DuplicateTriple => "coin components already in use",
        /// The coin does not exist.
        CoinNotFound { coin_id: i64 } => "coin {coin_id} not found",
        /// The buyer does not exist.
        BuyerNotFound { buyer_id: i64 } => "client {buyer_id} not found",
        /// The buyer already owns the coin.
        AlreadyOwned { coin_id: i64 } => "coin {coin_id} already owned by buyer",
    }
}

/// Persistence for coins and transactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Page through transactions matching `filter`, newest first.
    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> Result<Page<LedgerEntry>, LedgerPersistenceError>;

    /// Page through coins by ascending identifier with their ledger owners.
    async fn list_coins(&self, page: PageRequest)
    -> Result<Page<CoinListing>, LedgerPersistenceError>;

    /// Transfer a coin to `buyer` and append the matching transaction.
    ///
    /// Existence checks, the ownership update and the insert run atomically.
    async fn purchase(
        &self,
        coin_id: CoinId,
        buyer: ClientId,
        at: DateTime<Utc>,
    ) -> Result<TransactionRecord, LedgerPersistenceError>;

    /// Insert an unowned coin.
    ///
    /// Fails with [`LedgerPersistenceError::DuplicateTriple`] when the unique
    /// component index rejects the row.
    async fn insert_coin(
        &self,
        value: CoinValue,
        bits: BitTriple,
    ) -> Result<Coin, LedgerPersistenceError>;

    /// Transactions for a coin, oldest first; `None` when the coin is unknown.
    async fn coin_history(
        &self,
        coin_id: CoinId,
    ) -> Result<Option<Vec<HistoryEntry>>, LedgerPersistenceError>;

    /// Activity summary for a client; `None` when the client is unknown.
    async fn profile_summary(
        &self,
        client_id: ClientId,
    ) -> Result<Option<ProfileSummary>, LedgerPersistenceError>;
}
