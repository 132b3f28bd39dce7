//! Registration, login and client lookup.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountCommand, AccountQuery, ClientPersistenceError, ClientRepository, PasswordHashError,
    PasswordHasher,
};
use crate::domain::{Client, ClientId, Error, LoginCredentials, NewClient, Registration};

/// Account service implementing [`AccountCommand`] and [`AccountQuery`].
#[derive(Clone)]
pub struct AccountService<R, H> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AccountService<R, H> {
    /// Create a service over a client repository and password hasher.
    pub const fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }
}

fn map_persistence_error(error: ClientPersistenceError) -> Error {
    match error {
        ClientPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("client repository unavailable: {message}"))
        }
        ClientPersistenceError::Query { message } => {
            Error::internal(format!("client repository error: {message}"))
        }
        ClientPersistenceError::DuplicateEmail { .. } => Error::conflict("email already registered"),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<R, H> AccountCommand for AccountService<R, H>
where
    R: ClientRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: &Registration) -> Result<Client, Error> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .map_err(map_hash_error)?;
        let new_client = NewClient {
            name: registration.name().clone(),
            email: registration.email().clone(),
            password_hash,
            phone: registration.phone().map(str::to_owned),
            address: registration.address().map(str::to_owned),
        };

        let client = self
            .repository
            .create(&new_client)
            .await
            .map_err(map_persistence_error)?;
        info!(client_id = client.id().get(), "client registered");
        Ok(client)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<Client, Error> {
        let Some(record) = self
            .repository
            .find_by_email(credentials.email())
            .await
            .map_err(map_persistence_error)?
        else {
            return Err(Error::not_found("no account registered for this email"));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &record.password_hash)
            .map_err(map_hash_error)?;
        if !verified {
            debug!(client_id = record.client.id().get(), "password mismatch");
            return Err(Error::unauthorized("invalid password"));
        }
        Ok(record.client)
    }
}

#[async_trait]
impl<R, H> AccountQuery for AccountService<R, H>
where
    R: ClientRepository,
    H: PasswordHasher,
{
    async fn find_client(&self, id: ClientId) -> Result<Client, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("client {id} not found")))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
