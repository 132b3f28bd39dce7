//! Driving port for registration and login.

use async_trait::async_trait;

use crate::domain::{Client, Error, LoginCredentials, Registration};

/// Account use-cases that create or authenticate clients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a new client.
    async fn register(&self, registration: &Registration) -> Result<Client, Error>;

    /// Authenticate a client by e-mail and password.
    async fn login(&self, credentials: &LoginCredentials) -> Result<Client, Error>;
}
