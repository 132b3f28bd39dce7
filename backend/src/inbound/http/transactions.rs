//! Transaction listing handler.
//!
//! ```text
//! GET /api/transactions?page=1&limit=15&startDate=2024-01-01&buyerName=ada
//! ```

use actix_web::web;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, TransactionFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::ledger_dto::TransactionItem;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, non_blank, parse_end_date, parse_optional_i64, parse_page_request,
    parse_start_date,
};

/// Query parameters for `GET /api/transactions`. Blank values are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct TransactionListQuery {
    /// One-based page number (default 1).
    pub page: Option<String>,
    /// Page size (default 15).
    pub limit: Option<String>,
    /// Earliest transaction date, RFC 3339 or `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Latest transaction date; a bare date covers the whole day.
    pub end_date: Option<String>,
    /// Smallest coin value.
    pub min_value: Option<String>,
    /// Largest coin value.
    pub max_value: Option<String>,
    /// Case-insensitive buyer name fragment.
    pub buyer_name: Option<String>,
    /// Case-insensitive seller name fragment.
    pub seller_name: Option<String>,
}

impl TransactionListQuery {
    fn into_filter(self) -> Result<(TransactionFilter, pagination::PageRequest), Error> {
        let page = parse_page_request(self.page, self.limit)?;
        let filter = TransactionFilter {
            start: parse_start_date(self.start_date, FieldName::new("startDate"))?,
            end: parse_end_date(self.end_date, FieldName::new("endDate"))?,
            min_value: parse_optional_i64(self.min_value, FieldName::new("minValue"))?,
            max_value: parse_optional_i64(self.max_value, FieldName::new("maxValue"))?,
            buyer_name: non_blank(self.buyer_name),
            seller_name: non_blank(self.seller_name),
        };
        Ok((filter, page))
    }
}

/// Page of transactions.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListResponse {
    /// Transactions, newest first.
    pub transactions: Vec<TransactionItem>,
    /// Number of transactions matching the filters.
    pub total: u64,
    /// Page returned.
    pub page: u32,
    /// Page size used.
    pub limit: u32,
}

/// List transactions, newest first, with optional filters.
#[utoipa::path(
    get,
    path = "/api/transactions",
    params(TransactionListQuery),
    responses(
        (status = 200, description = "Matching transactions", body = TransactionListResponse),
        (status = 400, description = "Invalid query parameter", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["ledger"],
    operation_id = "listTransactions",
    security([])
)]
pub async fn list_transactions(
    state: web::Data<HttpState>,
    query: web::Query<TransactionListQuery>,
) -> ApiResult<web::Json<TransactionListResponse>> {
    let (filter, page) = query.into_inner().into_filter()?;
    let result = state.ledger_query.list_transactions(&filter, page).await?;
    let (total, page_number, limit) = (result.total(), result.page(), result.limit());
    Ok(web::Json(TransactionListResponse {
        transactions: result.into_items().into_iter().map(TransactionItem::from).collect(),
        total,
        page: page_number,
        limit,
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use chrono::{TimeZone, Utc};
    use pagination::{Page, PageRequest};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{
        BitTriple, ClientId, CoinId, CoinValue, DateRangeEnd, LedgerEntry, Party, TransactionId,
    };
    use crate::inbound::http::test_utils::MockPorts;

    fn entry(id: i64) -> LedgerEntry {
        LedgerEntry {
            id: TransactionId::new(id),
            coin_id: CoinId::new(1),
            amount: 500,
            transaction_date: Utc
                .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
                .single()
                .expect("valid date"),
            seller: None,
            buyer: Party {
                id: ClientId::new(7),
                name: "Ada".to_owned(),
            },
            bits: BitTriple::new(4, 5, 6).expect("valid bits"),
            value: CoinValue::new(500).expect("valid value"),
        }
    }

    async fn get(ports: MockPorts, uri: &str) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
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
    async fn passes_parsed_filters_to_the_query_port() {
        let mut ports = MockPorts::default();
        ports
            .ledger_query
            .expect_list_transactions()
            .withf(|filter, page| {
                filter.min_value == Some(100)
                    && filter.max_value.is_none()
                    && filter.buyer_name.as_deref() == Some("ada")
                    && filter.seller_name.is_none()
                    && filter.end
                        == Utc
                            .with_ymd_and_hms(2024, 2, 2, 0, 0, 0)
                            .single()
                            .map(DateRangeEnd::Before)
                    && page.page() == 2
                    && page.limit() == 5
            })
            .times(1)
            .returning(|_, page| Ok(Page::new(vec![entry(11)], 6, page)));

        let (status, body) = get(
            ports,
            "/api/transactions?page=2&limit=5&minValue=100&maxValue=&buyerName=ada&endDate=2024-02-01",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.get("total"), Some(&json!(6)));
        assert_eq!(body.get("page"), Some(&json!(2)));
        assert_eq!(body.get("limit"), Some(&json!(5)));
        assert_eq!(body.pointer("/transactions/0/id"), Some(&json!(11)));
        assert_eq!(body.pointer("/transactions/0/seller_name"), Some(&Value::Null));
    }

    #[rstest]
    #[actix_web::test]
    async fn defaults_to_the_first_page_of_fifteen() {
        let mut ports = MockPorts::default();
        ports
            .ledger_query
            .expect_list_transactions()
            .withf(|filter, page| filter.is_empty() && *page == PageRequest::default())
            .returning(|_, page| Ok(Page::new(Vec::new(), 0, page)));

        let (status, body) = get(ports, "/api/transactions").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"transactions": [], "total": 0, "page": 1, "limit": 15}));
    }

    #[rstest]
    #[case("/api/transactions?page=0", "page")]
    #[case("/api/transactions?minValue=cheap", "minValue")]
    #[case("/api/transactions?startDate=01/02/2024", "startDate")]
    #[actix_web::test]
    async fn rejects_malformed_parameters(#[case] uri: &str, #[case] field: &str) {
        let (status, body) = get(MockPorts::default(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.pointer("/details/field"), Some(&json!(field)));
    }
}
