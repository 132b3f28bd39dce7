//! Coins, their components and values.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ClientId, encode_bitslow};

/// Smallest coin component.
pub const BIT_MIN: u8 = 1;
/// Largest coin component.
pub const BIT_MAX: u8 = 100;

/// Largest coin value. One owner holding every possible coin at this value
/// still sums within `i64`.
pub const MAX_COIN_VALUE: i64 = i64::MAX / BitTriple::capacity() as i64;

/// Validation errors raised while building coin values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoinValidationError {
    /// A component fell outside `BIT_MIN..=BIT_MAX`.
    #[error("coin component {value} must lie between {BIT_MIN} and {BIT_MAX}")]
    BitOutOfRange {
        /// Offending component.
        value: i64,
    },
    /// The coin value was zero or negative.
    #[error("coin value must be a positive integer, got {value}")]
    NonPositiveValue {
        /// Offending value.
        value: i64,
    },
    /// The coin value exceeded [`MAX_COIN_VALUE`].
    #[error("coin value must not exceed {MAX_COIN_VALUE}, got {value}")]
    ValueTooLarge {
        /// Offending value.
        value: i64,
    },
}

/// Database identifier of a coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoinId(i64);

impl CoinId {
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

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Positive coin value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CoinValue(i64);

impl CoinValue {
    /// Validate a raw value.
    ///
    /// # Examples
    /// ```
    /// use bitslow::domain::CoinValue;
    ///
    /// assert_eq!(CoinValue::new(500).map(CoinValue::get), Ok(500));
    /// assert!(CoinValue::new(0).is_err());
    /// assert!(CoinValue::new(i64::MAX).is_err());
    /// ```
    pub const fn new(raw: i64) -> Result<Self, CoinValidationError> {
        if raw <= 0 {
            return Err(CoinValidationError::NonPositiveValue { value: raw });
        }
        if raw > MAX_COIN_VALUE {
            return Err(CoinValidationError::ValueTooLarge { value: raw });
        }
        Ok(Self(raw))
    }

    /// Raw value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// The three components that make a coin unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitTriple {
    bit1: u8,
    bit2: u8,
    bit3: u8,
}

impl BitTriple {
    /// Validate three components.
    pub fn new(bit1: i64, bit2: i64, bit3: i64) -> Result<Self, CoinValidationError> {
        Ok(Self {
            bit1: component(bit1)?,
            bit2: component(bit2)?,
            bit3: component(bit3)?,
        })
    }

    /// Build a triple, clamping each component into range.
    #[must_use]
    pub fn clamped(bit1: u8, bit2: u8, bit3: u8) -> Self {
        Self {
            bit1: bit1.clamp(BIT_MIN, BIT_MAX),
            bit2: bit2.clamp(BIT_MIN, BIT_MAX),
            bit3: bit3.clamp(BIT_MIN, BIT_MAX),
        }
    }

    /// First component.
    pub const fn bit1(self) -> u8 {
        self.bit1
    }

    /// Second component.
    pub const fn bit2(self) -> u8 {
        self.bit2
    }

    /// Third component.
    pub const fn bit3(self) -> u8 {
        self.bit3
    }

    /// Number of distinct triples.
    pub const fn capacity() -> u32 {
        let span = (BIT_MAX - BIT_MIN + 1) as u32;
        span * span * span
    }
}

fn component(raw: i64) -> Result<u8, CoinValidationError> {
    u8::try_from(raw)
        .ok()
        .filter(|bit| (BIT_MIN..=BIT_MAX).contains(bit))
        .ok_or(CoinValidationError::BitOutOfRange { value: raw })
}

/// Stored coin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coin {
    /// Identifier.
    pub id: CoinId,
    /// Value.
    pub value: CoinValue,
    /// Components.
    pub bits: BitTriple,
    /// Current owner, if the coin has been sold.
    pub owner_id: Option<ClientId>,
}

impl Coin {
    /// Derived BitSlow identifier.
    pub fn bit_slow(&self) -> String {
        encode_bitslow(
            self.bits.bit1(),
            self.bits.bit2(),
            self.bits.bit3(),
            self.value.get(),
        )
    }
}

/// Client reference paired with a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    /// Client identifier.
    pub id: ClientId,
    /// Client name at read time.
    pub name: String,
}

/// Coin row for the marketplace listing.
///
/// The owner is the buyer of the coin's most recent transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinListing {
    /// The coin.
    pub coin: Coin,
    /// Owner derived from the ledger.
    pub owner: Option<Party>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, 1, 1)]
    #[case(100, 50, 1)]
    fn accepts_components_in_range(#[case] b1: i64, #[case] b2: i64, #[case] b3: i64) {
        let triple = BitTriple::new(b1, b2, b3).expect("valid triple");
        assert_eq!(
            (i64::from(triple.bit1()), i64::from(triple.bit2()), i64::from(triple.bit3())),
            (b1, b2, b3)
        );
    }

    #[rstest]
    #[case(0, 1, 1, 0)]
    #[case(1, 101, 1, 101)]
    #[case(1, 1, -4, -4)]
    #[case(1, 1, 300, 300)]
    fn rejects_components_out_of_range(
        #[case] b1: i64,
        #[case] b2: i64,
        #[case] b3: i64,
        #[case] bad: i64,
    ) {
        assert_eq!(
            BitTriple::new(b1, b2, b3),
            Err(CoinValidationError::BitOutOfRange { value: bad })
        );
    }

    #[rstest]
    fn clamped_pulls_components_into_range() {
        let triple = BitTriple::clamped(0, 42, 255);
        assert_eq!((triple.bit1(), triple.bit2(), triple.bit3()), (1, 42, 100));
    }

    #[test]
    fn capacity_covers_every_combination() {
        assert_eq!(BitTriple::capacity(), 1_000_000);
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i64::MIN)]
    fn rejects_non_positive_values(#[case] raw: i64) {
        assert_eq!(
            CoinValue::new(raw),
            Err(CoinValidationError::NonPositiveValue { value: raw })
        );
    }

    #[rstest]
    #[case(MAX_COIN_VALUE + 1)]
    #[case(i64::MAX)]
    fn rejects_values_above_the_cap(#[case] raw: i64) {
        assert_eq!(
            CoinValue::new(raw),
            Err(CoinValidationError::ValueTooLarge { value: raw })
        );
    }

    #[test]
    fn cap_keeps_a_full_coin_space_summable() {
        assert_eq!(CoinValue::new(MAX_COIN_VALUE).map(CoinValue::get), Ok(MAX_COIN_VALUE));
        let capacity = i64::from(BitTriple::capacity());
        assert!(MAX_COIN_VALUE.checked_mul(capacity).is_some());
    }

    #[test]
    fn bit_slow_uses_components_and_value() {
        let coin = Coin {
            id: CoinId::new(9),
            value: CoinValue::new(500).expect("positive"),
            bits: BitTriple::new(3, 77, 42).expect("in range"),
            owner_id: None,
        };
        assert_eq!(coin.bit_slow(), encode_bitslow(3, 77, 42, 500));
    }
}
