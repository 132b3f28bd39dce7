//! Ledger transactions, listing filters and per-client summaries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BitTriple, ClientId, CoinId, CoinValue, Party, encode_bitslow};

/// Seller name reported for a coin's first sale.
pub const ORIGINAL_ISSUER: &str = "Original Issuer";

/// Database identifier of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(i64);

impl TransactionId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Transaction as appended by a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Identifier.
    pub id: TransactionId,
    /// Coin that changed hands.
    pub coin_id: CoinId,
    /// Price paid, equal to the coin value at sale time.
    pub amount: i64,
    /// Sale timestamp.
    pub transaction_date: DateTime<Utc>,
    /// Previous owner; `None` for the original issuer.
    pub seller_id: Option<ClientId>,
    /// New owner.
    pub buyer_id: ClientId,
}

/// Transaction joined with party names and coin attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Identifier.
    pub id: TransactionId,
    /// Coin that changed hands.
    pub coin_id: CoinId,
    /// Price paid.
    pub amount: i64,
    /// Sale timestamp.
    pub transaction_date: DateTime<Utc>,
    /// Previous owner; `None` for the original issuer.
    pub seller: Option<Party>,
    /// New owner.
    pub buyer: Party,
    /// Coin components.
    pub bits: BitTriple,
    /// Current coin value.
    pub value: CoinValue,
}

impl LedgerEntry {
    /// Derived BitSlow identifier of the traded coin.
    pub fn bit_slow(&self) -> String {
        encode_bitslow(
            self.bits.bit1(),
            self.bits.bit2(),
            self.bits.bit3(),
            self.value.get(),
        )
    }
}

/// One step of a coin's ownership history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Identifier.
    pub id: TransactionId,
    /// Price paid.
    pub amount: i64,
    /// Sale timestamp.
    pub transaction_date: DateTime<Utc>,
    /// Previous owner; `None` for the original issuer.
    pub seller: Option<Party>,
    /// New owner.
    pub buyer: Party,
}

impl HistoryEntry {
    /// Seller name, or [`ORIGINAL_ISSUER`] for a first sale.
    pub fn seller_name(&self) -> &str {
        self.seller
            .as_ref()
            .map_or(ORIGINAL_ISSUER, |party| party.name.as_str())
    }
}

/// Upper end of a transaction date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangeEnd {
    /// Up to and including the instant.
    Through(DateTime<Utc>),
    /// Strictly before the instant; a whole calendar day ends at the next
    /// midnight.
    Before(DateTime<Utc>),
}

/// Conjunctive filters for the transaction listing.
///
/// The start bound is inclusive. Name filters are case-insensitive substring matches;
/// a seller filter never matches first sales.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Earliest transaction date.
    pub start: Option<DateTime<Utc>>,
    /// Latest transaction date.
    pub end: Option<DateRangeEnd>,
    /// Smallest coin value.
    pub min_value: Option<i64>,
    /// Largest coin value.
    pub max_value: Option<i64>,
    /// Buyer name fragment.
    pub buyer_name: Option<String>,
    /// Seller name fragment.
    pub seller_name: Option<String>,
}

impl TransactionFilter {
    /// Whether no filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Aggregate activity of one client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileSummary {
    /// Transactions where the client bought or sold.
    pub total_transactions: u64,
    /// Coins whose latest buyer is the client.
    pub coins_owned: u64,
    /// Sum of the values of owned coins.
    pub total_value: i64,
}
