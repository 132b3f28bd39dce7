//! HTTP inbound adapter exposing the marketplace REST endpoints.

pub mod accounts;
pub mod coins;
pub mod error;
pub mod health;
pub mod ledger_dto;
pub mod profile;
pub mod router;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod transactions;
pub mod validation;

pub use error::ApiResult;
