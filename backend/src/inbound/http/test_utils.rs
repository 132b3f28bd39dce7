//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::ports::{
    MockAccountCommand, MockAccountQuery, MockLedgerCommand, MockLedgerQuery,
};

use super::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// Uses a fresh key per invocation, names the cookie `session` and disables
/// the `Secure` flag for plain HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Mock ports for handler tests; unset expectations panic when called.
#[derive(Default)]
pub struct MockPorts {
    /// Registration and login.
    pub accounts: MockAccountCommand,
    /// Client lookup.
    pub account_query: MockAccountQuery,
    /// Purchases and coin generation.
    pub ledger: MockLedgerCommand,
    /// Listings, history and profiles.
    pub ledger_query: MockLedgerQuery,
}

impl MockPorts {
    /// Move the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            accounts: Arc::new(self.accounts),
            account_query: Arc::new(self.account_query),
            ledger: Arc::new(self.ledger),
            ledger_query: Arc::new(self.ledger_query),
        })
    }
}
