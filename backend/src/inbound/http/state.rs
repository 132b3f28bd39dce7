//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, AccountQuery, LedgerCommand, LedgerQuery};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Registration and login.
    pub accounts: Arc<dyn AccountCommand>,
    /// Client lookup.
    pub account_query: Arc<dyn AccountQuery>,
    /// Purchases and coin generation.
    pub ledger: Arc<dyn LedgerCommand>,
    /// Listings, history and profiles.
    pub ledger_query: Arc<dyn LedgerQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and login.
    pub accounts: Arc<dyn AccountCommand>,
    /// Client lookup.
    pub account_query: Arc<dyn AccountQuery>,
    /// Purchases and coin generation.
    pub ledger: Arc<dyn LedgerCommand>,
    /// Listings, history and profiles.
    pub ledger_query: Arc<dyn LedgerQuery>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    #[must_use]
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            accounts,
            account_query,
            ledger,
            ledger_query,
        } = ports;
        Self {
            accounts,
            account_query,
            ledger,
            ledger_query,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
