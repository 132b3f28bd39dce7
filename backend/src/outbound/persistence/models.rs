//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain values, re-validating anything the domain constrains.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Nullable, Text};

use crate::domain::{
    BitTriple, Client, ClientId, ClientName, ClientValidationError, Coin, CoinId,
    CoinValidationError, CoinValue, EmailAddress, TransactionId, TransactionRecord,
};

use super::schema::{clients, coins, example_data_runs, transactions};

/// Row read from `clients`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = clients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct ClientRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ClientRow {
    pub(crate) fn into_client(self) -> Result<Client, ClientValidationError> {
        Ok(Client::new(
            ClientId::new(self.id),
            ClientName::parse(&self.name)?,
            EmailAddress::parse(&self.email)?,
        )
        .with_contact(self.phone, self.address))
    }
}

/// Insertable client.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = clients)]
#[diesel(treat_none_as_default_value = false)]
pub(crate) struct NewClientRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
}

/// Row read from `coins`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = coins)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct CoinRow {
    pub coin_id: i64,
    pub value: i64,
    pub bit1: i32,
    pub bit2: i32,
    pub bit3: i32,
    pub client_id: Option<i64>,
}

impl CoinRow {
    pub(crate) fn into_coin(self) -> Result<Coin, CoinValidationError> {
        Ok(Coin {
            id: CoinId::new(self.coin_id),
            value: CoinValue::new(self.value)?,
            bits: BitTriple::new(self.bit1.into(), self.bit2.into(), self.bit3.into())?,
            owner_id: self.client_id.map(ClientId::new),
        })
    }
}

/// Insertable coin.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = coins)]
#[diesel(treat_none_as_default_value = false)]
pub(crate) struct NewCoinRow {
    pub value: i64,
    pub bit1: i32,
    pub bit2: i32,
    pub bit3: i32,
    pub client_id: Option<i64>,
}

impl NewCoinRow {
    pub(crate) fn new(value: CoinValue, bits: BitTriple, owner: Option<i64>) -> Self {
        Self {
            value: value.get(),
            bit1: bits.bit1().into(),
            bit2: bits.bit2().into(),
            bit3: bits.bit3().into(),
            client_id: owner,
        }
    }
}

/// Row read from `transactions`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct TransactionRow {
    pub id: i64,
    pub coin_id: i64,
    pub amount: i64,
    pub transaction_date: NaiveDateTime,
    pub seller_id: Option<i64>,
    pub buyer_id: i64,
}

impl From<TransactionRow> for TransactionRecord {
    fn from(row: TransactionRow) -> Self {
        Self {
            id: TransactionId::new(row.id),
            coin_id: CoinId::new(row.coin_id),
            amount: row.amount,
            transaction_date: row.transaction_date.and_utc(),
            seller_id: row.seller_id.map(ClientId::new),
            buyer_id: ClientId::new(row.buyer_id),
        }
    }
}

/// Insertable transaction.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = transactions)]
#[diesel(treat_none_as_default_value = false)]
pub(crate) struct NewTransactionRow {
    pub coin_id: i64,
    pub amount: i64,
    pub transaction_date: NaiveDateTime,
    pub seller_id: Option<i64>,
    pub buyer_id: i64,
}

/// Insertable seed run.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = example_data_runs)]
pub(crate) struct NewExampleDataRunRow<'a> {
    pub seed_key: &'a str,
    pub seed: i64,
    pub client_count: i32,
    pub coin_count: i32,
    pub transaction_count: i32,
    pub applied_at: NaiveDateTime,
}

/// Coin listing row produced by raw SQL.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct CoinListingRow {
    #[diesel(sql_type = BigInt)]
    pub coin_id: i64,
    #[diesel(sql_type = BigInt)]
    pub value: i64,
    #[diesel(sql_type = Integer)]
    pub bit1: i32,
    #[diesel(sql_type = Integer)]
    pub bit2: i32,
    #[diesel(sql_type = Integer)]
    pub bit3: i32,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub client_id: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub owner_id: Option<i64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub owner_name: Option<String>,
}

/// Profile aggregate produced by raw SQL.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub(crate) struct ProfileSummaryRow {
    #[diesel(sql_type = BigInt)]
    pub total_transactions: i64,
    #[diesel(sql_type = BigInt)]
    pub coins_owned: i64,
    #[diesel(sql_type = BigInt)]
    pub total_value: i64,
}
