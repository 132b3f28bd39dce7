//! Shared helpers for the SQLite-backed integration suites.

use std::sync::Arc;

use bitslow::domain::ports::{ClientRepository, LedgerRepository};
use bitslow::domain::{BitTriple, Client, ClientName, Coin, CoinValue, EmailAddress, NewClient};
use bitslow::outbound::persistence::{DieselClientRepository, DieselLedgerRepository};
use bitslow::test_support::TestDatabase;

/// Database plus repositories sharing its pool.
pub struct Ledger {
    pub db: TestDatabase,
    pub clients: Arc<DieselClientRepository>,
    pub ledger: Arc<DieselLedgerRepository>,
}

/// Provision a migrated database with both repositories.
pub async fn ledger() -> Ledger {
    let db = TestDatabase::new().await.expect("test database");
    let clients = Arc::new(DieselClientRepository::new(db.pool().clone()));
    let ledger = Arc::new(DieselLedgerRepository::new(db.pool().clone()));
    Ledger {
        db,
        clients,
        ledger,
    }
}

/// Client row with a placeholder hash.
pub fn new_client(name: &str, email: &str) -> NewClient {
    NewClient {
        name: ClientName::parse(name).expect("valid name"),
        email: EmailAddress::parse(email).expect("valid email"),
        password_hash: "argon2d$00$00".to_owned(),
        phone: None,
        address: None,
    }
}

/// Insert a client.
pub async fn insert_client(repo: &DieselClientRepository, name: &str, email: &str) -> Client {
    repo.create(&new_client(name, email))
        .await
        .expect("client inserted")
}

/// Insert an unowned coin.
pub async fn insert_coin(repo: &DieselLedgerRepository, value: i64, bits: (i64, i64, i64)) -> Coin {
    let (bit1, bit2, bit3) = bits;
    repo.insert_coin(
        CoinValue::new(value).expect("valid value"),
        BitTriple::new(bit1, bit2, bit3).expect("valid bits"),
    )
    .await
    .expect("coin inserted")
}
