//! Cookie session configuration shared by the server and its tests.

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Key, SameSite};

/// Name of the encrypted session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Sessions expire two hours after they were last written.
const SESSION_TTL_HOURS: i64 = 2;

/// Build the private (encrypted) cookie session middleware.
///
/// `cookie_secure` should only be disabled for plain-HTTP development.
pub fn session_middleware(
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(Duration::hours(SESSION_TTL_HOURS)),
        )
        .build()
}
