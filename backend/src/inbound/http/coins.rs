//! Coin handlers: listing, purchase, generation and history.
//!
//! ```text
//! GET  /api/coins?page=1&limit=15
//! POST /api/buy {"coin_id":3,"buyer_id":7}
//! POST /api/generate-coin {"amount":500}
//! GET  /api/coin-history?coin_id=3
//! ```

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ClientId, CoinId, CoinValue, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::ledger_dto::{CoinItem, HistoryItem, PurchaseItem};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, coin_validation_error, missing_field_error, parse_page_request, parse_required_i64,
};

/// Query parameters for `GET /api/coins`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CoinListQuery {
    /// One-based page number (default 1).
    pub page: Option<String>,
    /// Page size (default 15).
    pub limit: Option<String>,
}

/// Page of coins.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoinListResponse {
    /// Coins in ascending id order.
    pub coins: Vec<CoinItem>,
    /// Number of coins.
    pub total: u64,
    /// Page returned.
    pub page: u32,
    /// Page size used.
    pub limit: u32,
}

/// Purchase request body for `POST /api/buy`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct BuyRequest {
    /// Coin to buy.
    pub coin_id: Option<i64>,
    /// Buyer; defaults to the session's client.
    pub buyer_id: Option<i64>,
}

/// Response body for a purchase.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BuyResponse {
    /// Confirmation message.
    pub message: String,
    /// Appended transaction.
    pub transaction: PurchaseItem,
}

/// Generation request body for `POST /api/generate-coin`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct GenerateCoinRequest {
    /// Value of the new coin; a positive integer.
    #[schema(example = 500)]
    pub amount: Option<i64>,
}

/// Response body for a generated coin.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateCoinResponse {
    /// Confirmation message.
    pub message: String,
    /// The new, unowned coin.
    pub coin: CoinItem,
}

/// Query parameters for `GET /api/coin-history`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CoinHistoryQuery {
    /// Coin whose history to return.
    pub coin_id: Option<String>,
}

/// Ownership history of a coin.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CoinHistoryResponse {
    /// Transactions, oldest first.
    pub history: Vec<HistoryItem>,
}

/// List coins with their current owners.
#[utoipa::path(
    get,
    path = "/api/coins",
    params(CoinListQuery),
    responses(
        (status = 200, description = "Coins", body = CoinListResponse),
        (status = 400, description = "Invalid query parameter", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["ledger"],
    operation_id = "listCoins",
    security([])
)]
pub async fn list_coins(
    state: web::Data<HttpState>,
    query: web::Query<CoinListQuery>,
) -> ApiResult<web::Json<CoinListResponse>> {
    let CoinListQuery { page, limit } = query.into_inner();
    let request = parse_page_request(page, limit)?;
    let result = state.ledger_query.list_coins(request).await?;
    let (total, page_number, page_limit) = (result.total(), result.page(), result.limit());
    Ok(web::Json(CoinListResponse {
        coins: result.into_items().into_iter().map(CoinItem::from).collect(),
        total,
        page: page_number,
        limit: page_limit,
    }))
}

/// Buy a coin on behalf of a client.
#[utoipa::path(
    post,
    path = "/api/buy",
    request_body = BuyRequest,
    responses(
        (status = 200, description = "Coin bought", body = BuyResponse),
        (status = 400, description = "Invalid request or coin already owned", body = Error),
        (status = 404, description = "Unknown coin or buyer", body = Error),
        (status = 503, description = "Database busy", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["ledger"],
    operation_id = "buyCoin"
)]
pub async fn buy_coin(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<BuyRequest>,
) -> ApiResult<web::Json<BuyResponse>> {
    let request = payload.into_inner();
    let coin_id = request
        .coin_id
        .ok_or_else(|| missing_field_error(FieldName::new("coin_id")))?;
    let buyer = match request.buyer_id {
        Some(id) => ClientId::new(id),
        None => session
            .user_id()?
            .ok_or_else(|| missing_field_error(FieldName::new("buyer_id")))?,
    };

    let record = state.ledger.buy_coin(CoinId::new(coin_id), buyer).await?;
    info!(coin_id, buyer_id = %buyer, transaction_id = %record.id, "coin bought");
    Ok(web::Json(BuyResponse {
        message: "Coin purchased successfully".to_owned(),
        transaction: record.into(),
    }))
}

/// Generate a new unowned coin with a unique component triple.
#[utoipa::path(
    post,
    path = "/api/generate-coin",
    request_body = GenerateCoinRequest,
    responses(
        (status = 201, description = "Coin generated", body = GenerateCoinResponse),
        (status = 400, description = "Invalid amount or no unique combination remaining", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["ledger"],
    operation_id = "generateCoin"
)]
pub async fn generate_coin(
    state: web::Data<HttpState>,
    payload: web::Json<GenerateCoinRequest>,
) -> ApiResult<HttpResponse> {
    let field = FieldName::new("amount");
    let amount = payload
        .into_inner()
        .amount
        .ok_or_else(|| missing_field_error(field))?;
    let value = CoinValue::new(amount).map_err(|err| coin_validation_error(&err, field))?;

    let coin = state.ledger.generate_coin(value).await?;
    info!(coin_id = %coin.id, value = coin.value.get(), "coin generated");
    Ok(HttpResponse::Created().json(GenerateCoinResponse {
        message: "Coin generated successfully".to_owned(),
        coin: coin.into(),
    }))
}

/// Ownership history of a coin, oldest first.
#[utoipa::path(
    get,
    path = "/api/coin-history",
    params(CoinHistoryQuery),
    responses(
        (status = 200, description = "Coin history", body = CoinHistoryResponse),
        (status = 400, description = "Missing or malformed coin id", body = Error),
        (status = 404, description = "Unknown coin", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["ledger"],
    operation_id = "coinHistory",
    security([])
)]
pub async fn coin_history(
    state: web::Data<HttpState>,
    query: web::Query<CoinHistoryQuery>,
) -> ApiResult<web::Json<CoinHistoryResponse>> {
    let coin_id = parse_required_i64(query.into_inner().coin_id, FieldName::new("coin_id"))?;
    let history = state.ledger_query.coin_history(CoinId::new(coin_id)).await?;
    Ok(web::Json(CoinHistoryResponse {
        history: history.into_iter().map(HistoryItem::from).collect(),
    }))
}

#[cfg(test)]
#[path = "coins_tests.rs"]
mod tests;
