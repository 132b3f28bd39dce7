//! Driving port for ledger mutations.

use async_trait::async_trait;

use crate::domain::{ClientId, Coin, CoinId, CoinValue, Error, TransactionRecord};

/// Use-cases that change coin ownership or mint coins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerCommand: Send + Sync {
    /// Buy a coin on behalf of `buyer`.
    async fn buy_coin(&self, coin_id: CoinId, buyer: ClientId)
    -> Result<TransactionRecord, Error>;

    /// Mint an unowned coin with unique components.
    async fn generate_coin(&self, value: CoinValue) -> Result<Coin, Error>;
}
