//! Endpoint contract assertions
//!
//! A contract pairs an exact status code with structural checks on the JSON
//! payload. Success contracts ([`Expect`]) and failure contracts
//! ([`ExpectFailure`]) are both first-class: a scenario that expects a 400
//! treats an unexpected 2xx as a violation, never as a pass.

pub mod page;

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::http::ApiResponse;

/// A failed expectation, carrying the specific field and expected-vs-actual
/// detail for the scenario report.
#[derive(Error, Debug)]
pub enum Violation {
    #[error("expected status {expected} but got {actual}")]
    Status { expected: u16, actual: u16 },

    #[error("expected failure status {expected} but the service returned success {actual}")]
    UnexpectedSuccess { expected: u16, actual: u16 },

    #[error("field `{path}` is missing")]
    MissingField { path: String },

    #[error("field `{path}` expected {expected} but got {actual}")]
    FieldMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("field `{path}` expected an array of length {expected} but got {actual}")]
    ArrayLength {
        path: String,
        expected: usize,
        actual: String,
    },

    #[error("field `{path}` expected a non-empty string but got {actual}")]
    EmptyField { path: String, actual: String },

    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("page arithmetic inconsistent: {detail}")]
    PageArithmetic { detail: String },

    #[error("observed duration {actual_ms}ms is below the requested delay of {min_ms}ms")]
    DurationBelowDelay { min_ms: u64, actual_ms: u64 },

    #[error("no duration was recorded for a duration-bounded request")]
    DurationUnavailable,
}

/// One structural check against the response payload
#[derive(Clone, Debug)]
enum Check {
    Present(String),
    Eq(String, Value),
    ArrayLen(String, usize),
    NonEmptyString(String),
    MinDuration(Duration),
}

/// Success contract: exact status plus ordered payload checks.
///
/// Checks are evaluated in declaration order and the first violation is
/// reported; an exact status mismatch always wins over payload detail.
#[derive(Clone, Debug)]
pub struct Expect {
    status: u16,
    checks: Vec<Check>,
}

impl Expect {
    pub fn status(status: u16) -> Self {
        Self {
            status,
            checks: Vec::new(),
        }
    }

    /// Require `path` to exist with exactly `value`
    pub fn field_eq(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.checks.push(Check::Eq(path.into(), value.into()));
        self
    }

    /// Require `path` to exist with any value
    pub fn field_present(mut self, path: impl Into<String>) -> Self {
        self.checks.push(Check::Present(path.into()));
        self
    }

    /// Require `path` to be an array of exactly `len` elements
    pub fn array_len(mut self, path: impl Into<String>, len: usize) -> Self {
        self.checks.push(Check::ArrayLen(path.into(), len));
        self
    }

    /// Require `path` to be a non-empty string
    pub fn non_empty_string(mut self, path: impl Into<String>) -> Self {
        self.checks.push(Check::NonEmptyString(path.into()));
        self
    }

    /// Require the observed round-trip duration to be at least `min`.
    ///
    /// One-directional: network variance puts no upper bound on latency. A
    /// response without a recorded duration violates this check loudly, it is
    /// never skipped.
    pub fn min_duration(mut self, min: Duration) -> Self {
        self.checks.push(Check::MinDuration(min));
        self
    }

    /// Evaluate the contract against a received response
    pub fn verify(&self, response: &ApiResponse) -> Result<(), Violation> {
        if response.status != self.status {
            return Err(Violation::Status {
                expected: self.status,
                actual: response.status,
            });
        }

        if self.checks.is_empty() {
            return Ok(());
        }

        let needs_body = self
            .checks
            .iter()
            .any(|c| !matches!(c, Check::MinDuration(_)));
        let body = if needs_body {
            Some(parse_body(response)?)
        } else {
            None
        };

        for check in &self.checks {
            match check {
                Check::MinDuration(min) => check_min_duration(response, *min)?,
                other => check_field(body.as_ref().expect("body parsed for field checks"), other)?,
            }
        }

        Ok(())
    }
}

/// Failure contract: exact error status plus an optional exact error message.
#[derive(Clone, Debug)]
pub struct ExpectFailure {
    status: u16,
    error_message: Option<String>,
}

impl ExpectFailure {
    pub fn status(status: u16) -> Self {
        Self {
            status,
            error_message: None,
        }
    }

    /// Require the body to be `{"error": "<message>"}` exactly
    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Evaluate against a received response.
    ///
    /// Callers hand this an actual HTTP response; a transport failure never
    /// reaches a failure contract and stays in its own taxonomy.
    pub fn verify(&self, response: &ApiResponse) -> Result<(), Violation> {
        if response.is_success() {
            return Err(Violation::UnexpectedSuccess {
                expected: self.status,
                actual: response.status,
            });
        }

        if response.status != self.status {
            return Err(Violation::Status {
                expected: self.status,
                actual: response.status,
            });
        }

        if let Some(expected) = &self.error_message {
            let body = parse_body(response)?;
            let actual = lookup(&body, "error")
                .ok_or_else(|| Violation::MissingField {
                    path: "error".to_string(),
                })?
                .clone();

            if actual.as_str() != Some(expected.as_str()) {
                return Err(Violation::FieldMismatch {
                    path: "error".to_string(),
                    expected: format!("\"{expected}\""),
                    actual: actual.to_string(),
                });
            }
        }

        Ok(())
    }
}

fn parse_body(response: &ApiResponse) -> Result<Value, Violation> {
    serde_json::from_str(&response.body).map_err(|e| Violation::InvalidJson(e.to_string()))
}

fn check_min_duration(response: &ApiResponse, min: Duration) -> Result<(), Violation> {
    let actual = response.duration.ok_or(Violation::DurationUnavailable)?;
    if actual < min {
        return Err(Violation::DurationBelowDelay {
            min_ms: min.as_millis() as u64,
            actual_ms: actual.as_millis() as u64,
        });
    }
    Ok(())
}

fn check_field(body: &Value, check: &Check) -> Result<(), Violation> {
    match check {
        Check::Present(path) => {
            lookup(body, path).ok_or_else(|| Violation::MissingField { path: path.clone() })?;
            Ok(())
        }
        Check::Eq(path, expected) => {
            let actual =
                lookup(body, path).ok_or_else(|| Violation::MissingField { path: path.clone() })?;
            if actual != expected {
                return Err(Violation::FieldMismatch {
                    path: path.clone(),
                    expected: expected.to_string(),
                    actual: actual.to_string(),
                });
            }
            Ok(())
        }
        Check::ArrayLen(path, expected) => {
            let actual =
                lookup(body, path).ok_or_else(|| Violation::MissingField { path: path.clone() })?;
            match actual.as_array() {
                Some(items) if items.len() == *expected => Ok(()),
                Some(items) => Err(Violation::ArrayLength {
                    path: path.clone(),
                    expected: *expected,
                    actual: items.len().to_string(),
                }),
                None => Err(Violation::ArrayLength {
                    path: path.clone(),
                    expected: *expected,
                    actual: format!("non-array {actual}"),
                }),
            }
        }
        Check::NonEmptyString(path) => {
            let actual =
                lookup(body, path).ok_or_else(|| Violation::MissingField { path: path.clone() })?;
            match actual.as_str() {
                Some(s) if !s.is_empty() => Ok(()),
                _ => Err(Violation::EmptyField {
                    path: path.clone(),
                    actual: actual.to_string(),
                }),
            }
        }
        Check::MinDuration(_) => unreachable!("duration checks are handled before field checks"),
    }
}

/// Resolve a dotted path (`data.first_name`) inside a JSON value
fn lookup<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = body;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn response(status: u16, body: Value) -> ApiResponse {
        ApiResponse {
            status,
            headers: HashMap::new(),
            body: body.to_string(),
            duration: Some(Duration::from_millis(42)),
        }
    }

    #[test]
    fn test_success_contract_passes() {
        let resp = response(
            200,
            json!({"data": {"id": 2, "email": "janet.weaver@reqres.in"}}),
        );

        let expect = Expect::status(200)
            .field_eq("data.id", 2)
            .field_eq("data.email", "janet.weaver@reqres.in");

        assert!(expect.verify(&resp).is_ok());
    }

    #[test]
    fn test_status_mismatch_wins_over_payload() {
        let resp = response(500, json!({"data": {"id": 2}}));
        let expect = Expect::status(200).field_eq("data.id", 2);

        match expect.verify(&resp) {
            Err(Violation::Status { expected, actual }) => {
                assert_eq!(expected, 200);
                assert_eq!(actual, 500);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_missing_field_names_the_path() {
        let resp = response(200, json!({"data": {}}));
        let expect = Expect::status(200).field_eq("data.email", "janet.weaver@reqres.in");

        match expect.verify(&resp) {
            Err(Violation::MissingField { path }) => assert_eq!(path, "data.email"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_field_mismatch_reports_expected_vs_actual() {
        let resp = response(200, json!({"per_page": 5}));
        let expect = Expect::status(200).field_eq("per_page", 6);

        match expect.verify(&resp) {
            Err(Violation::FieldMismatch {
                path,
                expected,
                actual,
            }) => {
                assert_eq!(path, "per_page");
                assert_eq!(expected, "6");
                assert_eq!(actual, "5");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_array_length_check() {
        let resp = response(200, json!({"data": [1, 2, 3]}));
        assert!(Expect::status(200)
            .array_len("data", 3)
            .verify(&resp)
            .is_ok());
        assert!(matches!(
            Expect::status(200).array_len("data", 6).verify(&resp),
            Err(Violation::ArrayLength { .. })
        ));
    }

    #[test]
    fn test_non_empty_string_check() {
        let resp = response(200, json!({"token": "QpwL5tke4Pnpja7X4"}));
        assert!(Expect::status(200)
            .non_empty_string("token")
            .verify(&resp)
            .is_ok());

        let empty = response(200, json!({"token": ""}));
        assert!(matches!(
            Expect::status(200).non_empty_string("token").verify(&empty),
            Err(Violation::EmptyField { .. })
        ));
    }

    #[test]
    fn test_no_body_checks_for_bodyless_status() {
        let resp = ApiResponse {
            status: 204,
            headers: HashMap::new(),
            body: String::new(),
            duration: Some(Duration::from_millis(10)),
        };
        // A 204 contract declares no payload checks, so the empty body is
        // never parsed.
        assert!(Expect::status(204).verify(&resp).is_ok());
    }

    #[test]
    fn test_min_duration_bound() {
        let resp = response(200, json!({"page": 1}));
        assert!(Expect::status(200)
            .min_duration(Duration::from_millis(40))
            .verify(&resp)
            .is_ok());

        match Expect::status(200)
            .min_duration(Duration::from_secs(3))
            .verify(&resp)
        {
            Err(Violation::DurationBelowDelay { min_ms, actual_ms }) => {
                assert_eq!(min_ms, 3000);
                assert_eq!(actual_ms, 42);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_missing_duration_fails_loudly() {
        let mut resp = response(200, json!({"page": 1}));
        resp.duration = None;

        assert!(matches!(
            Expect::status(200)
                .min_duration(Duration::from_secs(1))
                .verify(&resp),
            Err(Violation::DurationUnavailable)
        ));
    }

    #[test]
    fn test_failure_contract_passes_on_exact_error() {
        let resp = response(400, json!({"error": "Missing password"}));
        let expect = ExpectFailure::status(400).error_message("Missing password");
        assert!(expect.verify(&resp).is_ok());
    }

    #[test]
    fn test_unexpected_success_is_a_violation() {
        let resp = response(200, json!({"token": "x"}));
        let expect = ExpectFailure::status(400).error_message("Missing password");

        assert!(matches!(
            expect.verify(&resp),
            Err(Violation::UnexpectedSuccess {
                expected: 400,
                actual: 200
            })
        ));
    }

    #[test]
    fn test_wrong_error_message_is_reported() {
        let resp = response(400, json!({"error": "Missing email or username"}));
        let expect = ExpectFailure::status(400).error_message("Missing password");

        assert!(matches!(
            expect.verify(&resp),
            Err(Violation::FieldMismatch { .. })
        ));
    }

    #[test]
    fn test_failure_contract_without_message_check() {
        let resp = response(404, json!({}));
        assert!(ExpectFailure::status(404).verify(&resp).is_ok());
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let resp = ApiResponse {
            status: 200,
            headers: HashMap::new(),
            body: "<html>".to_string(),
            duration: Some(Duration::from_millis(1)),
        };
        assert!(matches!(
            Expect::status(200).field_present("data").verify(&resp),
            Err(Violation::InvalidJson(_))
        ));
    }

    #[test]
    fn test_lookup_dotted_paths() {
        let body = json!({"data": {"user": {"id": 7}}});
        assert_eq!(lookup(&body, "data.user.id"), Some(&json!(7)));
        assert!(lookup(&body, "data.user.name").is_none());
        assert!(lookup(&body, "missing").is_none());
    }
}
