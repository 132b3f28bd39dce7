//! Route table for the HTTP API.
//!
//! Each path is a resource whose default service answers unsupported verbs
//! with `405 method_not_allowed`.

use actix_web::{HttpRequest, Resource, web};

use crate::domain::Error;

use super::accounts::{current_session, login, logout, register};
use super::coins::{buy_coin, coin_history, generate_coin, list_coins};
use super::health::{live, ready};
use super::profile::profile;
use super::transactions::list_transactions;
use super::validation::{json_config, query_config};

async fn method_not_allowed(req: HttpRequest) -> Result<&'static str, Error> {
    Err(Error::method_not_allowed(format!(
        "{} is not supported on {}",
        req.method(),
        req.path()
    )))
}

fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::to(method_not_allowed))
}

/// Register every API and health route plus the extractor configuration.
///
/// The caller provides `web::Data<HttpState>` and `web::Data<HealthState>`
/// and, for the account routes, the session middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(resource("/api/register").route(web::post().to(register)))
        .service(resource("/api/login").route(web::post().to(login)))
        .service(resource("/api/logout").route(web::post().to(logout)))
        .service(resource("/api/session").route(web::get().to(current_session)))
        .service(resource("/api/transactions").route(web::get().to(list_transactions)))
        .service(resource("/api/coins").route(web::get().to(list_coins)))
        .service(resource("/api/buy").route(web::post().to(buy_coin)))
        .service(resource("/api/generate-coin").route(web::post().to(generate_coin)))
        .service(resource("/api/coin-history").route(web::get().to(coin_history)))
        .service(resource("/api/profile").route(web::get().to(profile)))
        .service(resource("/health/ready").route(web::get().to(ready)))
        .service(resource("/health/live").route(web::get().to(live)));
}
