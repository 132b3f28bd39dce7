//! Driving port for ledger reads.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{
    ClientId, CoinId, CoinListing, Error, HistoryEntry, LedgerEntry, ProfileSummary,
    TransactionFilter,
};

/// Read-only ledger use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    /// Filtered, paginated transaction listing.
    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> Result<Page<LedgerEntry>, Error>;

    /// Paginated coin listing.
    async fn list_coins(&self, page: PageRequest) -> Result<Page<CoinListing>, Error>;

    /// Ownership history of a coin.
    async fn coin_history(&self, coin_id: CoinId) -> Result<Vec<HistoryEntry>, Error>;

    /// Activity summary of a client.
    async fn profile_summary(&self, client_id: ClientId) -> Result<ProfileSummary, Error>;
}
