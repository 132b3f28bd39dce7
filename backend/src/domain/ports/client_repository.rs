//! Driven port for client persistence.

use async_trait::async_trait;

use crate::domain::{Client, ClientCredentials, ClientId, EmailAddress, NewClient};

use super::define_port_error;

define_port_error! {
    /// Errors raised by client repository adapters.
    pub enum ClientPersistenceError {
        /// No connection could be checked out.
        Connection { message: String } => "client repository connection failed: {message}",
        /// A query failed during execution.
        Query { message: String } => "client repository query failed: {message}",
        /// The e-mail address is already registered.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Persistence for registered clients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Insert a client and return it with its assigned identifier.
    ///
    /// Fails with [`ClientPersistenceError::DuplicateEmail`] when the unique
    /// e-mail index rejects the row.
    async fn create(&self, client: &NewClient) -> Result<Client, ClientPersistenceError>;

    /// Look up a client and its password hash by e-mail.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<ClientCredentials>, ClientPersistenceError>;

    /// Look up a client by identifier.
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, ClientPersistenceError>;
}
