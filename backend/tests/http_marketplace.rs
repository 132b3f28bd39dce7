//! End-to-end marketplace flows through the real router, services and a
//! throwaway SQLite database.

use std::net::SocketAddr;

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use bitslow::Trace;
use bitslow::domain::TRACE_ID_HEADER;
use bitslow::inbound::http::health::HealthState;
use bitslow::inbound::http::router;
use bitslow::test_support::TestDatabase;

#[allow(dead_code)]
#[path = "../src/server/config.rs"]
mod server_config;
pub use server_config::ServerConfig;

#[path = "../src/server/session.rs"]
mod session;
use session::{SESSION_COOKIE_NAME, session_middleware};

#[path = "../src/server/state_builders.rs"]
mod state_builders;

fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .expect("session cookie")
        .into_owned()
}

async fn body(res: ServiceResponse) -> Value {
    actix_test::read_body_json(res).await
}

macro_rules! marketplace_app {
    ($db:expr) => {{
        let addr: SocketAddr = "127.0.0.1:0".parse().expect("addr");
        let config = ServerConfig::new(Key::generate(), addr, $db.pool().clone());
        let http_state = state_builders::build_http_state(&config);
        actix_test::init_service(
            App::new()
                .app_data(http_state)
                .app_data(web::Data::new(HealthState::new()))
                .wrap(session_middleware(Key::generate(), false, SameSite::Lax))
                .wrap(Trace)
                .configure(router::configure),
        )
        .await
    }};
}

async fn register_and_login<S>(app: &S, name: &str, email: &str) -> (i64, Cookie<'static>)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({"name": name, "email": email, "password": "hunter22"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let registered = body(res).await;
    let user_id = registered["userId"].as_i64().expect("userId");

    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({"email": email, "password": "hunter22"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res);
    let logged_in = body(res).await;
    assert_eq!(logged_in["userId"], json!(user_id));
    (user_id, cookie)
}

#[rstest]
#[actix_web::test]
async fn register_login_generate_buy_and_inspect() {
    let db = TestDatabase::new().await.expect("database");
    let app = marketplace_app!(db);
    let (user_id, cookie) = register_and_login(&app, "Ada Lovelace", "ada@example.com").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/session")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body(res).await, json!({"userId": user_id, "userName": "Ada Lovelace"}));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/generate-coin")
            .set_json(json!({"amount": 500}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let generated = body(res).await;
    let coin_id = generated["coin"]["coin_id"].as_i64().expect("coin_id");
    assert_eq!(generated["coin"]["owner_id"], Value::Null);
    assert_eq!(generated["coin"]["value"], json!(500));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/buy")
            .cookie(cookie.clone())
            .set_json(json!({"coin_id": coin_id}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let bought = body(res).await;
    assert_eq!(bought["message"], "Coin purchased successfully");
    assert_eq!(bought["transaction"]["seller_id"], Value::Null);
    assert_eq!(bought["transaction"]["buyer_id"], json!(user_id));
    assert_eq!(bought["transaction"]["amount"], json!(500));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/buy")
            .cookie(cookie.clone())
            .set_json(json!({"coin_id": coin_id}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(res).await["code"], "conflict");

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/coin-history?coin_id={coin_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let history = body(res).await;
    let entries = history["history"].as_array().expect("history array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries.first().expect("entry")["seller_name"], "Original Issuer");

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/profile")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        body(res).await,
        json!({"totalTransactions": 1, "totalBitSlow": 1, "totalValue": 500})
    );

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/transactions?buyerName=lovelace")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let listing = body(res).await;
    assert_eq!(listing["total"], json!(1));
    assert_eq!(listing["page"], json!(1));
    assert_eq!(listing["limit"], json!(15));
    let item = listing["transactions"]
        .as_array()
        .and_then(|items| items.first())
        .expect("one transaction");
    assert_eq!(item["buyer_name"], "Ada Lovelace");
    assert_eq!(item["seller_name"], Value::Null);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/coins").to_request(),
    )
    .await;
    let coins = body(res).await;
    assert_eq!(coins["total"], json!(1));
    let coin = coins["coins"]
        .as_array()
        .and_then(|items| items.first())
        .expect("one coin");
    assert_eq!(coin["owner_name"], "Ada Lovelace");
}

#[rstest]
#[actix_web::test]
async fn resale_moves_ownership_between_clients() {
    let db = TestDatabase::new().await.expect("database");
    let app = marketplace_app!(db);
    let (ada, ada_cookie) = register_and_login(&app, "Ada Lovelace", "ada@example.com").await;
    let (grace, grace_cookie) = register_and_login(&app, "Grace Hopper", "grace@example.com").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/generate-coin")
            .set_json(json!({"amount": 42}))
            .to_request(),
    )
    .await;
    let coin_id = body(res).await["coin"]["coin_id"].as_i64().expect("coin_id");

    for cookie in [ada_cookie, grace_cookie] {
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/buy")
                .cookie(cookie)
                .set_json(json!({"coin_id": coin_id}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/coin-history?coin_id={coin_id}"))
            .to_request(),
    )
    .await;
    let history = body(res).await;
    let chain: Vec<_> = history["history"]
        .as_array()
        .expect("history array")
        .iter()
        .map(|entry| (entry["seller_id"].as_i64(), entry["buyer_id"].as_i64()))
        .collect();
    assert_eq!(chain, vec![(None, Some(ada)), (Some(ada), Some(grace))]);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/profile?userId={ada}"))
            .to_request(),
    )
    .await;
    assert_eq!(
        body(res).await,
        json!({"totalTransactions": 2, "totalBitSlow": 0, "totalValue": 0})
    );

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/transactions?sellerName=ADA")
            .to_request(),
    )
    .await;
    assert_eq!(body(res).await["total"], json!(1));
}

#[rstest]
#[actix_web::test]
async fn logout_ends_the_session() {
    let db = TestDatabase::new().await.expect("database");
    let app = marketplace_app!(db);
    let (_, cookie) = register_and_login(&app, "Alan Turing", "alan@example.com").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let cleared = session_cookie(&res);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/session")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn account_failures_map_to_documented_statuses() {
    let db = TestDatabase::new().await.expect("database");
    let app = marketplace_app!(db);
    register_and_login(&app, "Ada Lovelace", "ada@example.com").await;

    let cases = [
        (
            "/api/register",
            json!({"name": "Imposter", "email": "ADA@example.com", "password": "hunter22"}),
            StatusCode::BAD_REQUEST,
            "conflict",
        ),
        (
            "/api/login",
            json!({"email": "ada@example.com", "password": "wrong-password"}),
            StatusCode::UNAUTHORIZED,
            "unauthorized",
        ),
        (
            "/api/login",
            json!({"email": "nobody@example.com", "password": "hunter22"}),
            StatusCode::NOT_FOUND,
            "not_found",
        ),
        (
            "/api/register",
            json!({"name": "", "email": "x@example.com", "password": "hunter22"}),
            StatusCode::BAD_REQUEST,
            "invalid_request",
        ),
    ];

    for (uri, payload, status, code) in cases {
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(uri)
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), status, "{uri}");
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
        assert_eq!(body(res).await["code"], code, "{uri}");
    }
}

#[rstest]
#[actix_web::test]
async fn unknown_entities_are_not_found() {
    let db = TestDatabase::new().await.expect("database");
    let app = marketplace_app!(db);

    for uri in ["/api/coin-history?coin_id=77", "/api/profile?userId=77"] {
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(uri).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{uri}");
    }

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/buy")
            .set_json(json!({"coin_id": 77, "buyer_id": 1}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
