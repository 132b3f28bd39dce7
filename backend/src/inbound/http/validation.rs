//! Shared validation helpers for inbound HTTP adapters.
//!
//! Query strings arrive as optional text so each parameter can be rejected
//! with a field-specific `invalid_request` error. Empty values count as
//! absent.

use actix_web::web;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use pagination::{DEFAULT_LIMIT, PageRequest};
use serde_json::json;

use crate::domain::{ClientValidationError, CoinValidationError, DateRangeEnd, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidInteger,
    InvalidTimestamp,
    InvalidPage,
    InvalidBody,
    InvalidQuery,
}

impl ValidationCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidInteger => "invalid_integer",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::InvalidPage => "invalid_page",
            Self::InvalidBody => "invalid_body",
            Self::InvalidQuery => "invalid_query",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ValidationCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn field_value_error(
    field: FieldName,
    message: String,
    code: ValidationCode,
    value: &str,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Treat missing and blank values alike.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("missing required field: {name}"),
        ValidationCode::MissingField,
    )
}

pub(crate) fn invalid_integer_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    field_value_error(
        field,
        format!("{name} must be an integer"),
        ValidationCode::InvalidInteger,
        value,
    )
}

pub(crate) fn parse_optional_i64(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<i64>, Error> {
    non_blank(value)
        .map(|raw| {
            raw.parse::<i64>()
                .map_err(|_| invalid_integer_error(field, &raw))
        })
        .transpose()
}

pub(crate) fn parse_required_i64(value: Option<String>, field: FieldName) -> Result<i64, Error> {
    parse_optional_i64(value, field)?.ok_or_else(|| missing_field_error(field))
}

fn parse_page_number(value: Option<String>, field: FieldName) -> Result<Option<u32>, Error> {
    non_blank(value)
        .map(|raw| {
            raw.parse::<u32>()
                .ok()
                .filter(|number| *number > 0)
                .ok_or_else(|| {
                    let name = field.as_str();
                    field_value_error(
                        field,
                        format!("{name} must be a positive integer"),
                        ValidationCode::InvalidPage,
                        &raw,
                    )
                })
        })
        .transpose()
}

/// Build a page request from the raw `page` and `limit` parameters.
pub(crate) fn parse_page_request(
    page: Option<String>,
    limit: Option<String>,
) -> Result<PageRequest, Error> {
    let page_number = parse_page_number(page, FieldName::new("page"))?;
    let page_limit = parse_page_number(limit, FieldName::new("limit"))?;
    PageRequest::from_optional(page_number, page_limit, DEFAULT_LIMIT)
        .map_err(|err| Error::invalid_request(err.to_string()))
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    field_value_error(
        field,
        format!("{name} must be an RFC 3339 timestamp or a YYYY-MM-DD date"),
        ValidationCode::InvalidTimestamp,
        value,
    )
}

/// A date bound as written by the caller.
enum RawBound {
    Instant(DateTime<Utc>),
    Day(NaiveDate),
}

fn parse_raw_bound(raw: &str, field: FieldName) -> Result<RawBound, Error> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(RawBound::Instant(timestamp.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(RawBound::Day)
        .map_err(|_| invalid_timestamp_error(field, raw))
}

/// Parse the inclusive start of a date range; a bare date starts at midnight.
pub(crate) fn parse_start_date(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    let Some(raw) = non_blank(value) else {
        return Ok(None);
    };
    match parse_raw_bound(&raw, field)? {
        RawBound::Instant(instant) => Ok(Some(instant)),
        RawBound::Day(day) => Ok(Some(day.and_time(NaiveTime::MIN).and_utc())),
    }
}

/// Parse the end of a date range.
///
/// Timestamps are inclusive. A bare date covers the whole day and becomes an
/// exclusive bound at the following midnight.
pub(crate) fn parse_end_date(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateRangeEnd>, Error> {
    let Some(raw) = non_blank(value) else {
        return Ok(None);
    };
    match parse_raw_bound(&raw, field)? {
        RawBound::Instant(instant) => Ok(Some(DateRangeEnd::Through(instant))),
        RawBound::Day(day) => day
            .succ_opt()
            .map(|next| Some(DateRangeEnd::Before(next.and_time(NaiveTime::MIN).and_utc())))
            .ok_or_else(|| invalid_timestamp_error(field, &raw)),
    }
}

/// Map a client validation failure to a field-specific error.
pub(crate) fn client_validation_error(err: &ClientValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.reason(),
    }))
}

/// Map a coin validation failure on `field` to an error.
pub(crate) fn coin_validation_error(err: &CoinValidationError, field: FieldName) -> Error {
    field_error(field, err.to_string(), ValidationCode::InvalidInteger)
}

/// JSON extractor configuration reporting malformed bodies as
/// `invalid_request`.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid request body: {err}"))
            .with_details(json!({ "code": ValidationCode::InvalidBody.as_str() }))
            .into()
    })
}

/// Query extractor configuration reporting malformed query strings as
/// `invalid_request`.
#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid query string: {err}"))
            .with_details(json!({ "code": ValidationCode::InvalidQuery.as_str() }))
            .into()
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    const FIELD: FieldName = FieldName::new("coin_id");

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("  "), None)]
    #[case(Some("42"), Some(42))]
    #[case(Some(" -7 "), Some(-7))]
    fn parses_optional_integers(#[case] raw: Option<&str>, #[case] expected: Option<i64>) {
        let parsed = parse_optional_i64(raw.map(str::to_owned), FIELD).expect("valid");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn rejects_non_numeric_integers() {
        let err = parse_optional_i64(Some("abc".to_owned()), FIELD).expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "coin_id", "value": "abc", "code": "invalid_integer"}))
        );
    }

    #[rstest]
    fn required_integers_report_missing_fields() {
        let err = parse_required_i64(None, FIELD).expect_err("missing");
        assert_eq!(err.message(), "missing required field: coin_id");
    }

    #[rstest]
    #[case(None, None, 1, DEFAULT_LIMIT)]
    #[case(Some("3"), Some("10"), 3, 10)]
    #[case(Some(""), Some("500"), 1, 500)]
    fn builds_page_requests(
        #[case] page: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] expected_page: u32,
        #[case] expected_limit: u32,
    ) {
        let request =
            parse_page_request(page.map(str::to_owned), limit.map(str::to_owned)).expect("valid");
        assert_eq!((request.page(), request.limit()), (expected_page, expected_limit));
    }

    #[rstest]
    #[case(Some("0"), None, "page")]
    #[case(Some("-1"), None, "page")]
    #[case(None, Some("ten"), "limit")]
    #[case(None, Some("0"), "limit")]
    fn rejects_bad_page_parameters(
        #[case] page: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] field: &str,
    ) {
        let err = parse_page_request(page.map(str::to_owned), limit.map(str::to_owned))
            .expect_err("invalid");
        assert_eq!(
            err.details().and_then(|d| d.get("field")),
            Some(&json!(field))
        );
    }

    #[rstest]
    #[case("2024-03-01", Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single())]
    #[case("2024-03-01T12:30:00+02:00", Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).single())]
    fn parses_start_dates(#[case] raw: &str, #[case] expected: Option<DateTime<Utc>>) {
        let parsed =
            parse_start_date(Some(raw.to_owned()), FieldName::new("startDate")).expect("valid");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn end_timestamps_are_inclusive() {
        let parsed = parse_end_date(
            Some("2024-03-01T12:30:00Z".to_owned()),
            FieldName::new("endDate"),
        )
        .expect("valid");
        let instant = Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
            .single()
            .expect("valid time");
        assert_eq!(parsed, Some(DateRangeEnd::Through(instant)));
    }

    #[rstest]
    #[case("2024-03-01", (2024, 3, 2))]
    #[case("2024-02-29", (2024, 3, 1))]
    #[case("2024-12-31", (2025, 1, 1))]
    fn date_only_end_runs_to_the_next_midnight(#[case] raw: &str, #[case] next: (i32, u32, u32)) {
        let parsed =
            parse_end_date(Some(raw.to_owned()), FieldName::new("endDate")).expect("valid");
        let midnight = Utc
            .with_ymd_and_hms(next.0, next.1, next.2, 0, 0, 0)
            .single()
            .expect("valid time");
        assert_eq!(parsed, Some(DateRangeEnd::Before(midnight)));
    }

    #[rstest]
    #[case(None)]
    #[case(Some("  "))]
    fn blank_bounds_are_absent(#[case] raw: Option<&str>) {
        let field = FieldName::new("endDate");
        assert_eq!(parse_end_date(raw.map(str::to_owned), field).expect("valid"), None);
        assert_eq!(parse_start_date(raw.map(str::to_owned), field).expect("valid"), None);
    }

    #[rstest]
    fn rejects_unparseable_dates() {
        let err = parse_start_date(Some("yesterday".to_owned()), FieldName::new("startDate"))
            .expect_err("invalid");
        assert_eq!(
            err.details().and_then(|d| d.get("code")),
            Some(&json!("invalid_timestamp"))
        );
    }

    #[rstest]
    fn client_validation_errors_name_their_field() {
        let err = client_validation_error(&ClientValidationError::InvalidEmail);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "email", "code": "invalid_email"}))
        );
    }
}
