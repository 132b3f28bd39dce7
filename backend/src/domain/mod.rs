//! Domain primitives, ports and services.
//!
//! Purpose: model the marketplace ledger independently of HTTP and storage.
//! Types validate on construction; services depend only on the ports.
//!
//! Public surface:
//! - Error (alias to `error::DomainError`): transport-agnostic failure.
//! - Client, Coin, LedgerEntry and friends: ledger entities.
//! - AccountService, LedgerService: driving port implementations.

mod account_service;
mod auth;
mod bitslow;
mod client;
mod coin;
pub mod error;
#[cfg(feature = "example-data")]
pub mod example_data;
mod ledger;
mod ledger_service;
pub mod ports;
mod trace_id;

pub use self::account_service::AccountService;
pub use self::auth::{LoginCredentials, NewClient, Password, Registration, RegistrationParts};
pub use self::bitslow::encode_bitslow;
pub use self::client::{
    CLIENT_NAME_MAX_CHARS, Client, ClientCredentials, ClientId, ClientName,
    ClientValidationError, EmailAddress,
};
pub use self::coin::{
    BIT_MAX, BIT_MIN, BitTriple, Coin, CoinId, CoinListing, CoinValidationError, CoinValue,
    MAX_COIN_VALUE, Party,
};
pub use self::error::{DomainError, Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ledger::{
    DateRangeEnd, HistoryEntry, LedgerEntry, ORIGINAL_ISSUER, ProfileSummary, TransactionFilter,
    TransactionId, TransactionRecord,
};
pub use self::ledger_service::{LedgerService, MAX_GENERATION_ATTEMPTS};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use bitslow::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("login required"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
