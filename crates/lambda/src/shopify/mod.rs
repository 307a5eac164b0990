//! Shopify Admin GraphQL API client.
//!
//! The sweep steps issue fixed query documents with typed variables and get
//! back the raw response body; interpreting success or failure is the
//! caller's job via [`validate_response`], shared by every step. Mutations
//! here have externally visible side effects (product creation and
//! deletion, inventory changes), so nothing in this module is retry-safe.

mod client;
pub mod queries;
mod response;

pub use client::{GraphqlClient, GraphqlRequest};
pub use response::{ApiCost, ThrottleStatus, i64_at, parse_cost, string_at};

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to the Shopify Admin API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint reported an error (`errors` array or non-empty
    /// `userErrors`). Carries the offending query, whitespace-collapsed,
    /// and the raw response for the logs.
    #[error("GraphQL error: {message}")]
    Api {
        message: String,
        query: String,
        response: String,
    },

    /// Response body was not valid JSON.
    #[error("failed to parse response as json")]
    MalformedResponse { query: String, response: String },

    /// The response parsed but an expected field was absent.
    #[error("missing field {path} in response")]
    MissingField { path: String },
}

/// Collapse a query document onto one line for error payloads and logs.
#[must_use]
pub fn collapse_whitespace(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse and validate a raw GraphQL response body.
///
/// Fails with [`ShopifyError::MalformedResponse`] when the body is not
/// JSON, and with [`ShopifyError::Api`] when a top-level `errors` array is
/// present or any payload carries a non-empty `userErrors` array (using the
/// first error's message, defaulting to `"no message"`).
///
/// # Errors
///
/// See above; on success returns the parsed response document.
pub fn validate_response(query: &str, raw: &str) -> Result<Value, ShopifyError> {
    let Ok(value) = serde_json::from_str::<Value>(raw) else {
        return Err(ShopifyError::MalformedResponse {
            query: collapse_whitespace(query),
            response: raw.to_string(),
        });
    };

    if let Some(errors) = value.get("errors").and_then(Value::as_array) {
        let message = errors
            .first()
            .and_then(|error| error.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("no message")
            .to_string();
        return Err(ShopifyError::Api {
            message,
            query: collapse_whitespace(query),
            response: raw.to_string(),
        });
    }

    if let Some(message) = first_user_error(&value) {
        return Err(ShopifyError::Api {
            message,
            query: collapse_whitespace(query),
            response: raw.to_string(),
        });
    }

    Ok(value)
}

/// First `userErrors` message at the top level or directly inside a
/// `data.*` mutation payload.
fn first_user_error(value: &Value) -> Option<String> {
    let payloads = std::iter::once(value).chain(
        value
            .get("data")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|data| data.values()),
    );

    for payload in payloads {
        if let Some(user_errors) = payload.get("userErrors").and_then(Value::as_array)
            && let Some(first) = user_errors.first()
        {
            return Some(
                first
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("no message")
                    .to_string(),
            );
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_clean_response() {
        let raw = r#"{"data":{"productDelete":{"shop":{"id":"gid://shopify/Shop/1"}}}}"#;
        let value = validate_response("mutation { }", raw).expect("valid response");
        assert!(value.get("data").is_some());
    }

    #[test]
    fn rejects_non_json_response() {
        let err = validate_response("query { shop }", "<html>502</html>").expect_err("must fail");
        assert!(matches!(err, ShopifyError::MalformedResponse { .. }));
    }

    #[test]
    fn top_level_errors_use_first_message() {
        let raw = r#"{"errors":[{"message":"boom"},{"message":"second"}]}"#;
        let err = validate_response("query { shop }", raw).expect_err("must fail");
        match err {
            ShopifyError::Api { message, .. } => assert_eq!(message, "boom"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn errors_without_message_default() {
        let raw = r#"{"errors":[{"extensions":{"code":"THROTTLED"}}]}"#;
        let err = validate_response("query { shop }", raw).expect_err("must fail");
        match err {
            ShopifyError::Api { message, .. } => assert_eq!(message, "no message"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_empty_user_errors_fail() {
        let raw = r#"{"data":{"productCreate":{"product":null,"userErrors":[{"field":["title"],"message":"Title can't be blank"}]}}}"#;
        let err = validate_response("mutation { }", raw).expect_err("must fail");
        match err {
            ShopifyError::Api { message, .. } => assert_eq!(message, "Title can't be blank"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_user_errors_pass() {
        let raw = r#"{"data":{"productCreate":{"product":{"id":"gid://shopify/Product/1"},"userErrors":[]}}}"#;
        assert!(validate_response("mutation { }", raw).is_ok());
    }

    #[test]
    fn api_error_collapses_query_whitespace() {
        let raw = r#"{"errors":[{"message":"boom"}]}"#;
        let err = validate_response("query {\n  shop\n}", raw).expect_err("must fail");
        match err {
            ShopifyError::Api { query, .. } => assert_eq!(query, "query { shop }"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
