//! Profile summary handler.
//!
//! ```text
//! GET /api/profile?userId=7
//! ```

use actix_web::web;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ClientId, Error, ProfileSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_optional_i64};

/// Query parameters for `GET /api/profile`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ProfileQuery {
    /// Client to summarise; defaults to the session's client.
    pub user_id: Option<String>,
}

/// Activity summary of a client.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// Transactions where the client bought or sold.
    pub total_transactions: u64,
    /// Coins currently owned.
    pub total_bit_slow: u64,
    /// Summed value of the coins currently owned.
    pub total_value: i64,
}

impl From<ProfileSummary> for ProfileResponse {
    fn from(summary: ProfileSummary) -> Self {
        Self {
            total_transactions: summary.total_transactions,
            total_bit_slow: summary.coins_owned,
            total_value: summary.total_value,
        }
    }
}

/// Summarise a client's activity and holdings.
#[utoipa::path(
    get,
    path = "/api/profile",
    params(ProfileQuery),
    responses(
        (status = 200, description = "Profile summary", body = ProfileResponse),
        (status = 400, description = "Missing or malformed user id", body = Error),
        (status = 404, description = "Unknown client", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["ledger"],
    operation_id = "profile"
)]
pub async fn profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ProfileQuery>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let field = FieldName::new("userId");
    let client_id = match parse_optional_i64(query.into_inner().user_id, field)? {
        Some(raw) => ClientId::new(raw),
        None => session
            .user_id()?
            .ok_or_else(|| missing_field_error(field))?,
    };
    let summary = state.ledger_query.profile_summary(client_id).await?;
    Ok(web::Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::inbound::http::test_utils::{MockPorts, test_session_middleware};

    async fn get(ports: MockPorts, uri: &str) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .wrap(test_session_middleware())
                .configure(crate::inbound::http::router::configure),
        )
        .await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        let status = response.status();
        (status, actix_test::read_body_json(response).await)
    }

    #[rstest]
    #[actix_web::test]
    async fn summarises_the_requested_client() {
        let mut ports = MockPorts::default();
        ports
            .ledger_query
            .expect_profile_summary()
            .withf(|id| *id == ClientId::new(7))
            .returning(|_| {
                Ok(ProfileSummary {
                    total_transactions: 4,
                    coins_owned: 2,
                    total_value: 750,
                })
            });

        let (status, body) = get(ports, "/api/profile?userId=7").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"totalTransactions": 4, "totalBitSlow": 2, "totalValue": 750})
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn requires_a_user_without_session() {
        let (status, body) = get(MockPorts::default(), "/api/profile").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.pointer("/details/field"), Some(&json!("userId")));
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_clients_are_not_found() {
        let mut ports = MockPorts::default();
        ports
            .ledger_query
            .expect_profile_summary()
            .returning(|_| Err(Error::not_found("user not found")));
        let (status, _) = get(ports, "/api/profile?userId=999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
