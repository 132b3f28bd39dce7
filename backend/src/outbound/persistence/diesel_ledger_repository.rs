//! SQLite-backed `LedgerRepository` implementation.
//!
//! Ownership shown in listings is derived from the latest transaction per
//! coin, ordered by `(transaction_date, id)`, rather than from the cached
//! `coins.client_id` column.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::sqlite::Sqlite;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::{Page, PageRequest};

use crate::domain::ports::{LedgerPersistenceError, LedgerRepository};
use crate::domain::{
    BitTriple, ClientId, Coin, CoinId, CoinListing, CoinValue, DateRangeEnd, HistoryEntry,
    LedgerEntry, Party, ProfileSummary, TransactionFilter, TransactionId, TransactionRecord,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{
    CoinListingRow, CoinRow, NewCoinRow, NewTransactionRow, ProfileSummaryRow, TransactionRow,
};
use super::pool::{DbPool, PoolError, SqliteConn};
use super::schema::{clients, coins, transactions};

const COIN_LISTING_SQL: &str = "\
SELECT c.coin_id, c.value, c.bit1, c.bit2, c.bit3, c.client_id, \
       owner.id AS owner_id, owner.name AS owner_name \
FROM coins c \
LEFT JOIN clients owner ON owner.id = ( \
    SELECT t.buyer_id FROM transactions t \
    WHERE t.coin_id = c.coin_id \
    ORDER BY t.transaction_date DESC, t.id DESC \
    LIMIT 1) \
ORDER BY c.coin_id ASC \
LIMIT ? OFFSET ?";

const PROFILE_SUMMARY_SQL: &str = "\
SELECT \
    (SELECT COUNT(*) FROM transactions t \
     WHERE t.buyer_id = ? OR t.seller_id = ?) AS total_transactions, \
    COUNT(c.coin_id) AS coins_owned, \
    COALESCE(SUM(c.value), 0) AS total_value \
FROM coins c \
WHERE ( \
    SELECT t.buyer_id FROM transactions t \
    WHERE t.coin_id = c.coin_id \
    ORDER BY t.transaction_date DESC, t.id DESC \
    LIMIT 1) = ?";

/// Diesel-backed ledger repository.
#[derive(Clone)]
pub struct DieselLedgerRepository {
    pool: DbPool,
}

impl DieselLedgerRepository {
    /// Create a repository over `pool`.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LedgerPersistenceError {
    LedgerPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> LedgerPersistenceError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Unavailable(message) => LedgerPersistenceError::connection(message),
        DieselFailure::UniqueViolation(message) | DieselFailure::Query(message) => {
            LedgerPersistenceError::query(message)
        }
    }
}

fn invalid_row(error: impl std::fmt::Display) -> LedgerPersistenceError {
    LedgerPersistenceError::query(format!("stored row is invalid: {error}"))
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

/// Escape `%`, `_` and the escape character itself for a `LIKE` pattern.
fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Transactions matching `filter`; called once for the count and once for
/// the page so both see identical predicates.
fn filtered_transactions(filter: &TransactionFilter) -> transactions::BoxedQuery<'static, Sqlite> {
    let mut query = transactions::table.into_boxed();

    if let Some(start) = filter.start {
        query = query.filter(transactions::transaction_date.ge(start.naive_utc()));
    }
    match filter.end {
        Some(DateRangeEnd::Through(end)) => {
            query = query.filter(transactions::transaction_date.le(end.naive_utc()));
        }
        Some(DateRangeEnd::Before(end)) => {
            query = query.filter(transactions::transaction_date.lt(end.naive_utc()));
        }
        None => {}
    }
    if filter.min_value.is_some() || filter.max_value.is_some() {
        let low = filter.min_value.unwrap_or(i64::MIN);
        let high = filter.max_value.unwrap_or(i64::MAX);
        query = query.filter(
            transactions::coin_id.eq_any(
                coins::table
                    .filter(coins::value.between(low, high))
                    .select(coins::coin_id),
            ),
        );
    }
    if let Some(buyer) = filter.buyer_name.as_deref() {
        query = query.filter(
            transactions::buyer_id.eq_any(
                clients::table
                    .filter(clients::name.like(contains_pattern(buyer)).escape('\\'))
                    .select(clients::id),
            ),
        );
    }
    if let Some(seller) = filter.seller_name.as_deref() {
        query = query.filter(
            transactions::seller_id.eq_any(
                clients::table
                    .filter(clients::name.like(contains_pattern(seller)).escape('\\'))
                    .select(clients::id.nullable()),
            ),
        );
    }
    query
}

async fn load_names(
    conn: &mut SqliteConn,
    ids: BTreeSet<i64>,
) -> Result<HashMap<i64, String>, LedgerPersistenceError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(i64, String)> = clients::table
        .filter(clients::id.eq_any(ids))
        .select((clients::id, clients::name))
        .load(conn)
        .await
        .map_err(|err| map_diesel_error(err, "load client names"))?;
    Ok(rows.into_iter().collect())
}

fn party(names: &HashMap<i64, String>, id: i64) -> Result<Party, LedgerPersistenceError> {
    names
        .get(&id)
        .map(|name| Party {
            id: ClientId::new(id),
            name: name.clone(),
        })
        .ok_or_else(|| LedgerPersistenceError::query(format!("client {id} referenced but missing")))
}

fn party_ids(rows: &[TransactionRow]) -> BTreeSet<i64> {
    rows.iter()
        .flat_map(|row| std::iter::once(row.buyer_id).chain(row.seller_id))
        .collect()
}

/// Failure inside the purchase transaction.
enum PurchaseFailure {
    Database(diesel::result::Error),
    Rejected(LedgerPersistenceError),
}

impl From<diesel::result::Error> for PurchaseFailure {
    fn from(error: diesel::result::Error) -> Self {
        Self::Database(error)
    }
}

async fn purchase_in_transaction(
    conn: &mut SqliteConn,
    coin_id: i64,
    buyer_id: i64,
    at: DateTime<Utc>,
) -> Result<TransactionRow, PurchaseFailure> {
    let coin = coins::table
        .find(coin_id)
        .select(CoinRow::as_select())
        .first(conn)
        .await
        .optional()?
        .ok_or(PurchaseFailure::Rejected(LedgerPersistenceError::coin_not_found(
            coin_id,
        )))?;

    let buyer_exists = clients::table
        .find(buyer_id)
        .select(clients::id)
        .first::<i64>(conn)
        .await
        .optional()?
        .is_some();
    if !buyer_exists {
        return Err(PurchaseFailure::Rejected(
            LedgerPersistenceError::buyer_not_found(buyer_id),
        ));
    }
    if coin.client_id == Some(buyer_id) {
        return Err(PurchaseFailure::Rejected(
            LedgerPersistenceError::already_owned(coin_id),
        ));
    }

    diesel::update(coins::table.find(coin_id))
        .set(coins::client_id.eq(Some(buyer_id)))
        .execute(conn)
        .await?;

    let row = diesel::insert_into(transactions::table)
        .values(&NewTransactionRow {
            coin_id,
            amount: coin.value,
            transaction_date: at.naive_utc(),
            seller_id: coin.client_id,
            buyer_id,
        })
        .returning(TransactionRow::as_returning())
        .get_result(conn)
        .await?;
    Ok(row)
}

#[async_trait]
impl LedgerRepository for DieselLedgerRepository {
    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> Result<Page<LedgerEntry>, LedgerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = filtered_transactions(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count transactions"))?;

        let rows: Vec<TransactionRow> = filtered_transactions(filter)
            .order((transactions::transaction_date.desc(), transactions::id.desc()))
            .limit(i64::from(page.limit()))
            .offset(to_i64(page.offset()))
            .select(TransactionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list transactions"))?;

        let coin_ids: BTreeSet<i64> = rows.iter().map(|row| row.coin_id).collect();
        let coin_rows: Vec<CoinRow> = if coin_ids.is_empty() {
            Vec::new()
        } else {
            coins::table
                .filter(coins::coin_id.eq_any(coin_ids))
                .select(CoinRow::as_select())
                .load(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "load traded coins"))?
        };
        let coins_by_id = coin_rows
            .into_iter()
            .map(|row| row.into_coin().map(|coin| (coin.id.get(), coin)))
            .collect::<Result<HashMap<_, _>, _>>()
            .map_err(invalid_row)?;
        let names = load_names(&mut conn, party_ids(&rows)).await?;

        let entries = rows
            .into_iter()
            .map(|row| {
                let coin = coins_by_id.get(&row.coin_id).ok_or_else(|| {
                    LedgerPersistenceError::query(format!("coin {} referenced but missing", row.coin_id))
                })?;
                Ok(LedgerEntry {
                    id: TransactionId::new(row.id),
                    coin_id: CoinId::new(row.coin_id),
                    amount: row.amount,
                    transaction_date: row.transaction_date.and_utc(),
                    seller: row.seller_id.map(|id| party(&names, id)).transpose()?,
                    buyer: party(&names, row.buyer_id)?,
                    bits: coin.bits,
                    value: coin.value,
                })
            })
            .collect::<Result<Vec<_>, LedgerPersistenceError>>()?;

        Ok(Page::new(entries, to_u64(total), page))
    }

    async fn list_coins(
        &self,
        page: PageRequest,
    ) -> Result<Page<CoinListing>, LedgerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = coins::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count coins"))?;

        let rows: Vec<CoinListingRow> = diesel::sql_query(COIN_LISTING_SQL)
            .bind::<BigInt, _>(i64::from(page.limit()))
            .bind::<BigInt, _>(to_i64(page.offset()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list coins"))?;

        let listings = rows
            .into_iter()
            .map(|row| {
                let owner = row.owner_id.zip(row.owner_name).map(|(id, name)| Party {
                    id: ClientId::new(id),
                    name,
                });
                let coin = CoinRow {
                    coin_id: row.coin_id,
                    value: row.value,
                    bit1: row.bit1,
                    bit2: row.bit2,
                    bit3: row.bit3,
                    client_id: row.client_id,
                }
                .into_coin()
                .map_err(invalid_row)?;
                Ok(CoinListing { coin, owner })
            })
            .collect::<Result<Vec<_>, LedgerPersistenceError>>()?;

        Ok(Page::new(listings, to_u64(total), page))
    }

    async fn purchase(
        &self,
        coin_id: CoinId,
        buyer: ClientId,
        at: DateTime<Utc>,
    ) -> Result<TransactionRecord, LedgerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (coin_id, buyer_id) = (coin_id.get(), buyer.get());

        let row = conn
            .transaction::<_, PurchaseFailure, _>(|conn| {
                async move { purchase_in_transaction(conn, coin_id, buyer_id, at).await }
                    .scope_boxed()
            })
            .await
            .map_err(|failure| match failure {
                PurchaseFailure::Database(err) => map_diesel_error(err, "purchase coin"),
                PurchaseFailure::Rejected(err) => err,
            })?;
        Ok(row.into())
    }

    async fn insert_coin(
        &self,
        value: CoinValue,
        bits: BitTriple,
    ) -> Result<Coin, LedgerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(coins::table)
            .values(&NewCoinRow::new(value, bits, None))
            .returning(CoinRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match classify_diesel_error(err, "insert coin") {
                DieselFailure::UniqueViolation(_) => LedgerPersistenceError::duplicate_triple(),
                DieselFailure::Unavailable(message) => LedgerPersistenceError::connection(message),
                DieselFailure::Query(message) => LedgerPersistenceError::query(message),
            })?;
        row.into_coin().map_err(invalid_row)
    }

    async fn coin_history(
        &self,
        coin_id: CoinId,
    ) -> Result<Option<Vec<HistoryEntry>>, LedgerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let exists = coins::table
            .find(coin_id.get())
            .select(coins::coin_id)
            .first::<i64>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find coin"))?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let rows: Vec<TransactionRow> = transactions::table
            .filter(transactions::coin_id.eq(coin_id.get()))
            .order((transactions::transaction_date.asc(), transactions::id.asc()))
            .select(TransactionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "load coin history"))?;
        let names = load_names(&mut conn, party_ids(&rows)).await?;

        rows.into_iter()
            .map(|row| {
                Ok(HistoryEntry {
                    id: TransactionId::new(row.id),
                    amount: row.amount,
                    transaction_date: row.transaction_date.and_utc(),
                    seller: row.seller_id.map(|id| party(&names, id)).transpose()?,
                    buyer: party(&names, row.buyer_id)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    async fn profile_summary(
        &self,
        client_id: ClientId,
    ) -> Result<Option<ProfileSummary>, LedgerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = client_id.get();

        let exists = clients::table
            .find(id)
            .select(clients::id)
            .first::<i64>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find client"))?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let row: ProfileSummaryRow = diesel::sql_query(PROFILE_SUMMARY_SQL)
            .bind::<BigInt, _>(id)
            .bind::<BigInt, _>(id)
            .bind::<BigInt, _>(id)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "summarise profile"))?;

        Ok(Some(ProfileSummary {
            total_transactions: to_u64(row.total_transactions),
            coins_owned: to_u64(row.coins_owned),
            total_value: row.total_value,
        }))
    }
}
