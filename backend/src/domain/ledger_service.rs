//! Coin purchase, coin generation and ledger reads.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::{debug, info, warn};

use crate::domain::ports::{
    BitTripleSource, LedgerCommand, LedgerPersistenceError, LedgerQuery, LedgerRepository,
};
use crate::domain::{
    ClientId, Coin, CoinId, CoinListing, CoinValue, Error, HistoryEntry, LedgerEntry,
    ProfileSummary, TransactionFilter, TransactionRecord,
};

/// Insert attempts before coin generation gives up.
pub const MAX_GENERATION_ATTEMPTS: u32 = 10_000;

/// Ledger service implementing [`LedgerCommand`] and [`LedgerQuery`].
#[derive(Clone)]
pub struct LedgerService<R, S> {
    repository: Arc<R>,
    triples: Arc<S>,
    clock: Arc<dyn Clock>,
    max_attempts: u32,
}

impl<R, S> LedgerService<R, S> {
    /// Create a service over a ledger repository, triple source and clock.
    pub fn new(repository: Arc<R>, triples: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            triples,
            clock,
            max_attempts: MAX_GENERATION_ATTEMPTS,
        }
    }

    /// Override the generation attempt budget.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

fn map_persistence_error(error: LedgerPersistenceError) -> Error {
    match error {
        LedgerPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("ledger repository unavailable: {message}"))
        }
        LedgerPersistenceError::Query { message } => {
            Error::internal(format!("ledger repository error: {message}"))
        }
        LedgerPersistenceError::DuplicateTriple => {
            Error::internal("unexpected coin component conflict")
        }
        LedgerPersistenceError::CoinNotFound { .. } => Error::not_found("coin not found"),
        LedgerPersistenceError::BuyerNotFound { .. } => Error::not_found("buyer not found"),
        LedgerPersistenceError::AlreadyOwned { .. } => Error::conflict("you already own this coin"),
    }
}

#[async_trait]
impl<R, S> LedgerCommand for LedgerService<R, S>
where
    R: LedgerRepository,
    S: BitTripleSource,
{
    async fn buy_coin(
        &self,
        coin_id: CoinId,
        buyer: ClientId,
    ) -> Result<TransactionRecord, Error> {
        let record = self
            .repository
            .purchase(coin_id, buyer, self.clock.utc())
            .await
            .map_err(map_persistence_error)?;
        info!(
            coin_id = coin_id.get(),
            buyer_id = buyer.get(),
            seller_id = record.seller_id.map(ClientId::get),
            amount = record.amount,
            "coin purchased"
        );
        Ok(record)
    }

    async fn generate_coin(&self, value: CoinValue) -> Result<Coin, Error> {
        for attempt in 1..=self.max_attempts {
            let bits = self.triples.draw();
            match self.repository.insert_coin(value, bits).await {
                Ok(coin) => {
                    info!(coin_id = coin.id.get(), value = value.get(), attempt, "coin generated");
                    return Ok(coin);
                }
                Err(LedgerPersistenceError::DuplicateTriple) => {
                    debug!(attempt, "coin components taken, drawing again");
                }
                Err(other) => return Err(map_persistence_error(other)),
            }
        }
        warn!(attempts = self.max_attempts, "coin generation exhausted its attempts");
        Err(Error::conflict("no unique combination remaining"))
    }
}

#[async_trait]
impl<R, S> LedgerQuery for LedgerService<R, S>
where
    R: LedgerRepository,
    S: BitTripleSource,
{
    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> Result<Page<LedgerEntry>, Error> {
        self.repository
            .list_transactions(filter, page)
            .await
            .map_err(map_persistence_error)
    }

    async fn list_coins(&self, page: PageRequest) -> Result<Page<CoinListing>, Error> {
        self.repository
            .list_coins(page)
            .await
            .map_err(map_persistence_error)
    }

    async fn coin_history(&self, coin_id: CoinId) -> Result<Vec<HistoryEntry>, Error> {
        self.repository
            .coin_history(coin_id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found("coin not found"))
    }

    async fn profile_summary(&self, client_id: ClientId) -> Result<ProfileSummary, Error> {
        self.repository
            .profile_summary(client_id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }
}

#[cfg(test)]
#[path = "ledger_service_tests.rs"]
mod tests;
