//! SQLite-backed `ClientRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ClientPersistenceError, ClientRepository};
use crate::domain::{Client, ClientCredentials, ClientId, EmailAddress, NewClient};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{ClientRow, NewClientRow};
use super::pool::{DbPool, PoolError};
use super::schema::clients;

/// Diesel-backed client repository.
#[derive(Clone)]
pub struct DieselClientRepository {
    pool: DbPool,
}

impl DieselClientRepository {
    /// Create a repository over `pool`.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ClientPersistenceError {
    ClientPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> ClientPersistenceError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Unavailable(message) => ClientPersistenceError::connection(message),
        DieselFailure::UniqueViolation(message) | DieselFailure::Query(message) => {
            ClientPersistenceError::query(message)
        }
    }
}

fn row_to_client(row: ClientRow) -> Result<Client, ClientPersistenceError> {
    let id = row.id;
    row.into_client().map_err(|err| {
        ClientPersistenceError::query(format!("stored client {id} is invalid: {err}"))
    })
}

#[async_trait]
impl ClientRepository for DieselClientRepository {
    async fn create(&self, client: &NewClient) -> Result<Client, ClientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewClientRow {
            name: client.name.as_ref(),
            email: client.email.as_ref(),
            password: &client.password_hash,
            phone: client.phone.as_deref(),
            address: client.address.as_deref(),
        };

        let inserted = diesel::insert_into(clients::table)
            .values(&row)
            .returning(ClientRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match classify_diesel_error(err, "insert client") {
                DieselFailure::UniqueViolation(_) => {
                    ClientPersistenceError::duplicate_email(client.email.as_ref())
                }
                DieselFailure::Unavailable(message) => ClientPersistenceError::connection(message),
                DieselFailure::Query(message) => ClientPersistenceError::query(message),
            })?;
        row_to_client(inserted)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<ClientCredentials>, ClientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = clients::table
            .filter(clients::email.eq(email.as_ref()))
            .select(ClientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find client by email"))?;

        row.map(|row| {
            let password_hash = row.password.clone();
            row_to_client(row).map(|client| ClientCredentials {
                client,
                password_hash,
            })
        })
        .transpose()
    }

    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, ClientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        clients::table
            .find(id.get())
            .select(ClientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find client by id"))?
            .map(row_to_client)
            .transpose()
    }
}
