//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! request and response DTOs, the domain error envelope and the session
//! cookie security scheme. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use crate::domain::{DomainError, ErrorCode};
use crate::inbound::http::accounts::{
    AccountResponse, LoginRequest, RegisterRequest, RegisterResponse,
};
use crate::inbound::http::coins::{
    BuyRequest, BuyResponse, CoinHistoryResponse, CoinListResponse, GenerateCoinRequest,
    GenerateCoinResponse,
};
use crate::inbound::http::ledger_dto::{CoinItem, HistoryItem, PurchaseItem, TransactionItem};
use crate::inbound::http::profile::ProfileResponse;
use crate::inbound::http::transactions::TransactionListResponse;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "BitSlow marketplace API",
        description = "Client accounts, coin listings, purchases and ledger history.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::current_session,
        crate::inbound::http::transactions::list_transactions,
        crate::inbound::http::coins::list_coins,
        crate::inbound::http::coins::buy_coin,
        crate::inbound::http::coins::generate_coin,
        crate::inbound::http::coins::coin_history,
        crate::inbound::http::profile::profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DomainError,
        ErrorCode,
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        AccountResponse,
        TransactionItem,
        TransactionListResponse,
        CoinItem,
        CoinListResponse,
        BuyRequest,
        BuyResponse,
        PurchaseItem,
        GenerateCoinRequest,
        GenerateCoinResponse,
        HistoryItem,
        CoinHistoryResponse,
        ProfileResponse,
    )),
    tags(
        (name = "accounts", description = "Registration, login and sessions"),
        (name = "ledger", description = "Coins, purchases and transaction history"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(doc: &utoipa::openapi::OpenApi, name: &str) -> Vec<String> {
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema for {name}"),
        }
    }

    #[rstest]
    #[case("/api/register")]
    #[case("/api/login")]
    #[case("/api/logout")]
    #[case("/api/session")]
    #[case("/api/transactions")]
    #[case("/api/coins")]
    #[case("/api/buy")]
    #[case("/api/generate-coin")]
    #[case("/api/coin-history")]
    #[case("/api/profile")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn error_schema_exposes_envelope_fields() {
        let fields = object_fields(&ApiDoc::openapi(), "DomainError");
        for field in ["code", "message", "traceId", "details"] {
            assert!(fields.iter().any(|f| f == field), "missing {field}");
        }
    }

    #[rstest]
    fn transaction_items_use_snake_case_fields() {
        let fields = object_fields(&ApiDoc::openapi(), "TransactionItem");
        for field in ["coin_id", "transaction_date", "seller_name", "bit_slow"] {
            assert!(fields.iter().any(|f| f == field), "missing {field}");
        }
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
