//! Handler tests for the account endpoints.

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::{ClientId, ClientName, EmailAddress};
use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_session_middleware};

fn ada() -> Client {
    Client::new(
        ClientId::new(7),
        ClientName::parse("Ada Lovelace").expect("valid name"),
        EmailAddress::parse("ada@example.com").expect("valid email"),
    )
}

#[fixture]
fn ports() -> MockPorts {
    MockPorts::default()
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .configure(crate::inbound::http::router::configure)
}

#[rstest]
#[actix_web::test]
async fn register_returns_created_identity(mut ports: MockPorts) {
    ports
        .accounts
        .expect_register()
        .withf(|registration| registration.email().as_ref() == "ada@example.com")
        .times(1)
        .returning(|_| Ok(ada()));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({
                "name": "Ada Lovelace",
                "email": " ADA@example.com ",
                "password": "analytical",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({"message": "User registered successfully", "userId": 7, "userName": "Ada Lovelace"})
    );
}

#[rstest]
#[case(json!({"name": " ", "email": "a@b.io", "password": "pw"}), "name")]
#[case(json!({"name": "Ada", "email": "nope", "password": "pw"}), "email")]
#[case(json!({"name": "Ada", "email": "a@b.io"}), "password")]
#[actix_web::test]
async fn register_rejects_invalid_fields(
    ports: MockPorts,
    #[case] payload: Value,
    #[case] field: &str,
) {
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/register")
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("code"), Some(&json!("invalid_request")));
    assert_eq!(body.pointer("/details/field"), Some(&json!(field)));
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_a_bad_request(mut ports: MockPorts) {
    ports
        .accounts
        .expect_register()
        .returning(|_| Err(Error::conflict("email already registered")));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({"name": "Ada", "email": "a@b.io", "password": "pw"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("code"), Some(&json!("conflict")));
}

#[rstest]
#[actix_web::test]
async fn login_sets_a_session_that_identifies_the_client(mut ports: MockPorts) {
    ports.accounts.expect_login().times(1).returning(|_| Ok(ada()));
    ports
        .account_query
        .expect_find_client()
        .withf(|id| *id == ClientId::new(7))
        .returning(|_| Ok(ada()));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let login_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({"email": "ada@example.com", "password": "analytical"}))
            .to_request(),
    )
    .await;
    assert_eq!(login_res.status(), StatusCode::OK);
    let cookie = session_cookie(&login_res);
    let body: Value = actix_test::read_body_json(login_res).await;
    assert_eq!(body, json!({"userId": 7, "userName": "Ada Lovelace"}));

    let session_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/session")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(session_res.status(), StatusCode::OK);
}

#[rstest]
#[case(Error::not_found("no account registered for this email"), StatusCode::NOT_FOUND)]
#[case(Error::unauthorized("invalid password"), StatusCode::UNAUTHORIZED)]
#[actix_web::test]
async fn login_failures_map_to_status(
    mut ports: MockPorts,
    #[case] failure: Error,
    #[case] status: StatusCode,
) {
    ports
        .accounts
        .expect_login()
        .returning(move |_| Err(failure.clone()));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({"email": "ada@example.com", "password": "wrong"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), status);
    assert!(
        response
            .response()
            .cookies()
            .all(|cookie| cookie.name() != "session")
    );
}

#[rstest]
#[actix_web::test]
async fn session_requires_login(ports: MockPorts) {
    let app = actix_test::init_service(test_app(ports.into_state())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/session").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn logout_returns_no_content(ports: MockPorts) {
    let app = actix_test::init_service(test_app(ports.into_state())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post().uri("/api/logout").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
