//! Driving port for client lookups.

use async_trait::async_trait;

use crate::domain::{Client, ClientId, Error};

/// Read-only account use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Fetch a client, failing with `not_found` when absent.
    async fn find_client(&self, id: ClientId) -> Result<Client, Error>;
}
