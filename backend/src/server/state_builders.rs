//! Builders for HTTP state ports backed by the SQLite repositories.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use bitslow::domain::{AccountService, LedgerService};
use bitslow::inbound::http::state::{HttpState, HttpStatePorts};
use bitslow::outbound::persistence::{DbPool, DieselClientRepository, DieselLedgerRepository};
use bitslow::outbound::random_triples::ThreadRngTripleSource;
use bitslow::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

/// Account service over the SQLite client repository.
type Accounts = AccountService<DieselClientRepository, Argon2PasswordHasher>;
/// Ledger service over the SQLite ledger repository.
type Ledger = LedgerService<DieselLedgerRepository, ThreadRngTripleSource>;

fn account_service(pool: &DbPool) -> Arc<Accounts> {
    Arc::new(AccountService::new(
        Arc::new(DieselClientRepository::new(pool.clone())),
        Arc::new(Argon2PasswordHasher::new()),
    ))
}

fn ledger_service(pool: &DbPool) -> Arc<Ledger> {
    Arc::new(LedgerService::new(
        Arc::new(DieselLedgerRepository::new(pool.clone())),
        Arc::new(ThreadRngTripleSource::new()),
        Arc::new(DefaultClock),
    ))
}

/// Build the shared HTTP state from the configured database pool.
///
/// One service instance backs both the command and the query port of each
/// pair so the handlers share repositories.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let accounts = account_service(&config.db_pool);
    let ledger = ledger_service(&config.db_pool);
    web::Data::new(HttpState::new(HttpStatePorts {
        accounts: accounts.clone(),
        account_query: accounts,
        ledger: ledger.clone(),
        ledger_query: ledger,
    }))
}
