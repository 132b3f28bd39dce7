//! Generated ledger types.
//!
//! Records reference each other by position: `owner`, `seller` and `buyer`
//! index into [`ExampleLedger::clients`] and `coin` indexes into
//! [`ExampleLedger::coins`]. The backend maps positions to database
//! identifiers when it persists a ledger.

use serde::{Deserialize, Serialize};

/// A generated client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSeed {
    /// Display name.
    pub name: String,
    /// Unique, lower-case e-mail address derived from the name.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
}

/// A generated coin.
///
/// # Example
///
/// ```
/// use example_data::CoinSeed;
///
/// let coin = CoinSeed { value: 500, bits: (3, 77, 42), owner: None };
/// assert!(coin.owner.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinSeed {
    /// Coin value, always positive.
    pub value: u32,
    /// The `(bit1, bit2, bit3)` triple, unique within a ledger.
    pub bits: (u8, u8, u8),
    /// Index of the owning client after every generated purchase.
    pub owner: Option<usize>,
}

/// A generated purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSeed {
    /// Index of the traded coin.
    pub coin: usize,
    /// Index of the previous owner; `None` for the first sale.
    pub seller: Option<usize>,
    /// Index of the new owner.
    pub buyer: usize,
    /// Sale price, equal to the coin value.
    pub amount: u32,
    /// Minutes after the start of the ledger; strictly increasing.
    pub minutes_offset: u32,
}

/// A complete generated ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleLedger {
    /// Generated clients.
    pub clients: Vec<ClientSeed>,
    /// Generated coins.
    pub coins: Vec<CoinSeed>,
    /// Generated purchases in chronological order.
    pub transactions: Vec<TransactionSeed>,
}

impl ExampleLedger {
    /// Minutes between the first and last generated purchase.
    ///
    /// Callers anchoring the ledger in time subtract this from "now" so every
    /// purchase lands in the past.
    #[must_use]
    pub fn span_minutes(&self) -> u32 {
        self.transactions
            .last()
            .map_or(0, |transaction| transaction.minutes_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ledger_spans_no_time() {
        assert_eq!(ExampleLedger::default().span_minutes(), 0);
    }

    #[test]
    fn ledger_serializes_to_camel_case() {
        let ledger = ExampleLedger {
            clients: Vec::new(),
            coins: Vec::new(),
            transactions: vec![TransactionSeed {
                coin: 0,
                seller: None,
                buyer: 1,
                amount: 10,
                minutes_offset: 5,
            }],
        };
        let json = serde_json::to_string(&ledger).expect("serialize");
        assert!(json.contains("minutesOffset"));
        assert!(json.contains("\"seller\":null"));
    }
}
