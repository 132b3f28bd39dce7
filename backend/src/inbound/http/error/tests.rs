//! Tests for HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::conflict("already owned"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::method_not_allowed("verb"), StatusCode::METHOD_NOT_ALLOWED)]
#[case(Error::service_unavailable("busy"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn body_of(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error JSON");
    (status, header, body)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("database password is hunter2")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let (status, header, body) = body_of(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body,
        json!({
            "code": "internal_error",
            "message": REDACTED_MESSAGE,
            "traceId": expected_trace_id,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details(expected_trace_id: String) {
    let error = Error::invalid_request("email is malformed")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"field": "email", "code": "invalid_email"}));

    let (status, header, body) = body_of(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body.get("message"), Some(&json!("email is malformed")));
    assert_eq!(
        body.get("details"),
        Some(&json!({"field": "email", "code": "invalid_email"}))
    );
}

#[rstest]
#[actix_web::test]
async fn omits_trace_header_without_trace_id() {
    let (_, header, body) = body_of(&Error::not_found("coin not found")).await;
    assert!(header.is_none());
    assert!(body.get("traceId").is_none());
}

#[rstest]
fn actix_errors_become_redacted_internal_errors() {
    let actix = actix_web::error::ErrorBadGateway("upstream detail");
    let error = Error::from(actix);
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), REDACTED_MESSAGE);
}
