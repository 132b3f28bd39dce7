//! Account API handlers.
//!
//! ```text
//! POST /api/register {"name":"Ada","email":"ada@example.com","password":"pw"}
//! POST /api/login {"email":"ada@example.com","password":"pw"}
//! POST /api/logout
//! GET /api/session
//! ```

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Client, Error, ErrorCode, LoginCredentials, Registration, RegistrationParts};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::client_validation_error;

/// Registration request body for `POST /api/register`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    /// Display name.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Login e-mail; stored trimmed and lower-cased.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
}

/// Login request body for `POST /api/login`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    /// Login e-mail.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Identity of the authenticated client.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Client identifier.
    pub user_id: i64,
    /// Client name.
    pub user_name: String,
}

impl From<&Client> for AccountResponse {
    fn from(client: &Client) -> Self {
        Self {
            user_id: client.id().get(),
            user_name: client.name().as_ref().to_owned(),
        }
    }
}

/// Response body for a successful registration.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// Confirmation message.
    pub message: String,
    /// Assigned client identifier.
    pub user_id: i64,
    /// Registered name.
    pub user_name: String,
}

/// Register a new client.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Client registered", body = RegisterResponse),
        (status = 400, description = "Invalid request or e-mail already registered", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let registration = Registration::try_from_parts(RegistrationParts {
        name: &request.name,
        email: &request.email,
        password: &request.password,
        phone: request.phone.as_deref(),
        address: request.address.as_deref(),
    })
    .map_err(|err| client_validation_error(&err))?;

    let client = state.accounts.register(&registration).await?;
    info!(client_id = %client.id(), "client registered");
    let account = AccountResponse::from(&client);
    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully".to_owned(),
        user_id: account.user_id,
        user_name: account.user_name,
    }))
}

/// Authenticate a client and establish a session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AccountResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Wrong password", body = Error),
        (status = 404, description = "Unknown e-mail", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AccountResponse>> {
    let request = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&request.email, &request.password)
        .map_err(|err| client_validation_error(&err))?;

    let client = state.accounts.login(&credentials).await?;
    session.persist_user(client.id())?;
    Ok(web::Json(AccountResponse::from(&client)))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["accounts"],
    operation_id = "logout"
)]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Identity of the client owning the session cookie.
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Active session", body = AccountResponse),
        (status = 401, description = "No session", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "currentSession"
)]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AccountResponse>> {
    let client_id = session.require_user_id()?;
    let client = state
        .account_query
        .find_client(client_id)
        .await
        .map_err(|err| {
            if err.code() == ErrorCode::NotFound {
                session.purge();
                Error::unauthorized("login required")
            } else {
                err
            }
        })?;
    Ok(web::Json(AccountResponse::from(&client)))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
