//! SQLite-backed example data seeding adapter.
//!
//! The run row is written first with `INSERT OR IGNORE`; when it already
//! exists the transaction commits without touching the ledger. Otherwise
//! clients, coins and transactions are inserted in generation order and the
//! generated indexes are resolved to the assigned row ids.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{
    ExampleDataSeedRepository, ExampleDataSeedRepositoryError, ExampleDataSeedRequest,
    SeedingResult,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewClientRow, NewCoinRow, NewExampleDataRunRow, NewTransactionRow};
use super::pool::{DbPool, PoolError, SqliteConn};
use super::schema::{clients, coins, example_data_runs, transactions};

/// Diesel-backed implementation of the example data seeding repository.
#[derive(Clone)]
pub struct DieselExampleDataSeedRepository {
    pool: DbPool,
}

impl DieselExampleDataSeedRepository {
    /// Create a new seeding repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ExampleDataSeedRepositoryError {
    ExampleDataSeedRepositoryError::connection(pool_error_message(error))
}

/// Failure inside the seeding transaction.
enum SeedFailure {
    Database(diesel::result::Error),
    Rejected(ExampleDataSeedRepositoryError),
}

impl From<diesel::result::Error> for SeedFailure {
    fn from(error: diesel::result::Error) -> Self {
        Self::Database(error)
    }
}

impl From<ExampleDataSeedRepositoryError> for SeedFailure {
    fn from(error: ExampleDataSeedRepositoryError) -> Self {
        Self::Rejected(error)
    }
}

fn count(len: usize, what: &str) -> Result<i32, ExampleDataSeedRepositoryError> {
    i32::try_from(len)
        .map_err(|_| ExampleDataSeedRepositoryError::query(format!("too many {what} to record")))
}

fn resolve(ids: &[i64], index: usize, what: &str) -> Result<i64, ExampleDataSeedRepositoryError> {
    ids.get(index).copied().ok_or_else(|| {
        ExampleDataSeedRepositoryError::dangling_reference(format!("{what} index {index}"))
    })
}

async fn apply_seed(
    conn: &mut SqliteConn,
    request: &ExampleDataSeedRequest,
) -> Result<SeedingResult, SeedFailure> {
    let run = NewExampleDataRunRow {
        seed_key: &request.seed_key,
        seed: request.seed,
        client_count: count(request.clients.len(), "clients")?,
        coin_count: count(request.coins.len(), "coins")?,
        transaction_count: count(request.transactions.len(), "transactions")?,
        applied_at: request.applied_at.naive_utc(),
    };
    let recorded = diesel::insert_or_ignore_into(example_data_runs::table)
        .values(&run)
        .execute(conn)
        .await?;
    if recorded == 0 {
        return Ok(SeedingResult::AlreadySeeded);
    }

    let mut client_ids = Vec::with_capacity(request.clients.len());
    for client in &request.clients {
        let id = diesel::insert_into(clients::table)
            .values(&NewClientRow {
                name: client.name.as_ref(),
                email: client.email.as_ref(),
                password: &client.password_hash,
                phone: client.phone.as_deref(),
                address: client.address.as_deref(),
            })
            .returning(clients::id)
            .get_result::<i64>(conn)
            .await?;
        client_ids.push(id);
    }

    let mut coin_ids = Vec::with_capacity(request.coins.len());
    for coin in &request.coins {
        let owner = coin
            .owner
            .map(|index| resolve(&client_ids, index, "coin owner"))
            .transpose()?;
        let id = diesel::insert_into(coins::table)
            .values(&NewCoinRow::new(coin.value, coin.bits, owner))
            .returning(coins::coin_id)
            .get_result::<i64>(conn)
            .await?;
        coin_ids.push(id);
    }

    for transaction in &request.transactions {
        let row = NewTransactionRow {
            coin_id: resolve(&coin_ids, transaction.coin, "coin")?,
            amount: transaction.amount,
            transaction_date: transaction.transaction_date.naive_utc(),
            seller_id: transaction
                .seller
                .map(|index| resolve(&client_ids, index, "seller"))
                .transpose()?,
            buyer_id: resolve(&client_ids, transaction.buyer, "buyer")?,
        };
        diesel::insert_into(transactions::table)
            .values(&row)
            .execute(conn)
            .await?;
    }

    debug!(
        seed_key = %request.seed_key,
        clients = client_ids.len(),
        coins = coin_ids.len(),
        transactions = request.transactions.len(),
        "example ledger inserted"
    );
    Ok(SeedingResult::Applied)
}

#[async_trait]
impl ExampleDataSeedRepository for DieselExampleDataSeedRepository {
    async fn seed_example_data(
        &self,
        request: ExampleDataSeedRequest,
    ) -> Result<SeedingResult, ExampleDataSeedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, SeedFailure, _>(|conn| {
            async move { apply_seed(conn, &request).await }.scope_boxed()
        })
        .await
        .map_err(|failure| match failure {
            SeedFailure::Rejected(err) => err,
            SeedFailure::Database(err) => match classify_diesel_error(err, "seed example data") {
                DieselFailure::Unavailable(message) => {
                    ExampleDataSeedRepositoryError::connection(message)
                }
                DieselFailure::UniqueViolation(message) | DieselFailure::Query(message) => {
                    ExampleDataSeedRepositoryError::query(message)
                }
            },
        })
    }
}
