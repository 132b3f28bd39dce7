//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers only persist, read or purge
//! the authenticated client id.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{ClientId, Error};

pub(crate) const CLIENT_ID_KEY: &str = "client_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated client's id, renewing the session key.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the session cannot be serialised.
    pub fn persist_user(&self, client_id: ClientId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(CLIENT_ID_KEY, client_id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current client id from the session, if present.
    ///
    /// A value that does not decode is treated as no session.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` mirrors the other accessors.
    pub fn user_id(&self) -> Result<Option<ClientId>, Error> {
        match self.0.get::<i64>(CLIENT_ID_KEY) {
            Ok(id) => Ok(id.map(ClientId::new)),
            Err(error) => {
                tracing::warn!(%error, "invalid client id in session cookie");
                Ok(None)
            }
        }
    }

    /// Require an authenticated client id or return `401 Unauthorized`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::Unauthorized`] without a session.
    pub fn require_user_id(&self) -> Result<ClientId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every session value and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Self::new) })
    }
}
