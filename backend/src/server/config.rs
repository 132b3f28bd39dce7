//! HTTP server configuration object and helpers.

use actix_web::cookie::{Key, SameSite};
use bitslow::outbound::persistence::DbPool;
use std::net::SocketAddr;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    /// Construct a server configuration over an open database pool.
    #[must_use]
    pub fn new(key: Key, bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            key,
            cookie_secure: true,
            same_site: SameSite::Lax,
            bind_addr,
            db_pool,
        }
    }

    /// Toggle the `Secure` attribute on the session cookie.
    #[must_use]
    pub fn with_cookie_secure(mut self, cookie_secure: bool) -> Self {
        self.cookie_secure = cookie_secure;
        self
    }

    /// Override the `SameSite` policy of the session cookie.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(
            dead_code,
            reason = "Exercised by integration tests; retained for fixture access"
        )
    )]
    #[must_use]
    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
