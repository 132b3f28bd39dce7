//! Response items shared by the ledger endpoints.
//!
//! Item fields are snake_case to match the stored column names; the
//! envelopes around them use camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Coin, CoinListing, HistoryEntry, LedgerEntry, TransactionRecord};

/// Transaction joined with party names and coin attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransactionItem {
    /// Transaction identifier.
    pub id: i64,
    /// Traded coin.
    pub coin_id: i64,
    /// Price paid.
    pub amount: i64,
    /// Sale timestamp (UTC).
    pub transaction_date: DateTime<Utc>,
    /// Previous owner; null for the original issuer.
    pub seller_id: Option<i64>,
    /// Previous owner's name; null for the original issuer.
    pub seller_name: Option<String>,
    /// New owner.
    pub buyer_id: i64,
    /// New owner's name.
    pub buyer_name: String,
    /// First component.
    pub bit1: u8,
    /// Second component.
    pub bit2: u8,
    /// Third component.
    pub bit3: u8,
    /// Coin value.
    pub value: i64,
    /// Derived display identifier.
    #[schema(example = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08")]
    pub bit_slow: String,
}

impl From<LedgerEntry> for TransactionItem {
    fn from(entry: LedgerEntry) -> Self {
        let bit_slow = entry.bit_slow();
        Self {
            id: entry.id.get(),
            coin_id: entry.coin_id.get(),
            amount: entry.amount,
            transaction_date: entry.transaction_date,
            seller_id: entry.seller.as_ref().map(|party| party.id.get()),
            seller_name: entry.seller.map(|party| party.name),
            buyer_id: entry.buyer.id.get(),
            buyer_name: entry.buyer.name,
            bit1: entry.bits.bit1(),
            bit2: entry.bits.bit2(),
            bit3: entry.bits.bit3(),
            value: entry.value.get(),
            bit_slow,
        }
    }
}

/// Coin with its current owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CoinItem {
    /// Coin identifier.
    pub coin_id: i64,
    /// Coin value.
    pub value: i64,
    /// First component.
    pub bit1: u8,
    /// Second component.
    pub bit2: u8,
    /// Third component.
    pub bit3: u8,
    /// Derived display identifier.
    pub bit_slow: String,
    /// Current owner; null while unsold.
    pub owner_id: Option<i64>,
    /// Current owner's name.
    pub owner_name: Option<String>,
}

impl CoinItem {
    fn from_coin(coin: &Coin, owner_id: Option<i64>, owner_name: Option<String>) -> Self {
        Self {
            coin_id: coin.id.get(),
            value: coin.value.get(),
            bit1: coin.bits.bit1(),
            bit2: coin.bits.bit2(),
            bit3: coin.bits.bit3(),
            bit_slow: coin.bit_slow(),
            owner_id,
            owner_name,
        }
    }
}

impl From<CoinListing> for CoinItem {
    fn from(listing: CoinListing) -> Self {
        let owner_id = listing.owner.as_ref().map(|party| party.id.get());
        let owner_name = listing.owner.map(|party| party.name);
        Self::from_coin(&listing.coin, owner_id, owner_name)
    }
}

impl From<Coin> for CoinItem {
    fn from(coin: Coin) -> Self {
        Self::from_coin(&coin, coin.owner_id.map(|id| id.get()), None)
    }
}

/// One step of a coin's ownership history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HistoryItem {
    /// Transaction identifier.
    pub id: i64,
    /// Price paid.
    pub amount: i64,
    /// Sale timestamp (UTC).
    pub transaction_date: DateTime<Utc>,
    /// Previous owner; null for the original issuer.
    pub seller_id: Option<i64>,
    /// Previous owner's name, or "Original Issuer".
    #[schema(example = "Original Issuer")]
    pub seller_name: String,
    /// New owner.
    pub buyer_id: i64,
    /// New owner's name.
    pub buyer_name: String,
}

impl From<HistoryEntry> for HistoryItem {
    fn from(entry: HistoryEntry) -> Self {
        let seller_name = entry.seller_name().to_owned();
        Self {
            id: entry.id.get(),
            amount: entry.amount,
            transaction_date: entry.transaction_date,
            seller_id: entry.seller.map(|party| party.id.get()),
            seller_name,
            buyer_id: entry.buyer.id.get(),
            buyer_name: entry.buyer.name,
        }
    }
}

/// Transaction appended by a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PurchaseItem {
    /// Transaction identifier.
    pub id: i64,
    /// Purchased coin.
    pub coin_id: i64,
    /// Price paid.
    pub amount: i64,
    /// Sale timestamp (UTC).
    pub transaction_date: DateTime<Utc>,
    /// Previous owner; null for the original issuer.
    pub seller_id: Option<i64>,
    /// New owner.
    pub buyer_id: i64,
}

impl From<TransactionRecord> for PurchaseItem {
    fn from(record: TransactionRecord) -> Self {
        Self {
            id: record.id.get(),
            coin_id: record.coin_id.get(),
            amount: record.amount,
            transaction_date: record.transaction_date,
            seller_id: record.seller_id.map(|id| id.get()),
            buyer_id: record.buyer_id.get(),
        }
    }
}
