//! HTTP transport for the Admin GraphQL endpoint.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::ShopCredentials;

use super::{ShopifyError, collapse_whitespace, validate_response};

/// One GraphQL request: a fixed query document plus typed variables.
///
/// Variables travel in the JSON envelope rather than being spliced into the
/// document, so identifiers returned by the platform never need escaping.
#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest<'a> {
    /// Query or mutation document.
    pub query: &'a str,
    /// Variable bindings for the document.
    pub variables: Value,
}

/// Authenticated client for one shop's Admin GraphQL endpoint.
///
/// Constructed once per message from the selected credential set; the
/// underlying `reqwest::Client` keeps its connection pool for the life of
/// the process.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    token: SecretString,
}

impl GraphqlClient {
    /// Create a client for a shop.
    ///
    /// `api_base` overrides the `https://{shop}.myshopify.com` base URL and
    /// exists for tests running against a local mock server.
    #[must_use]
    pub fn new(credentials: &ShopCredentials, api_version: &str, api_base: Option<&str>) -> Self {
        let base = api_base.map_or_else(
            || format!("https://{}.myshopify.com", credentials.shop),
            str::to_string,
        );

        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{base}/admin/api/{api_version}/graphql.json"),
            token: credentials.password.clone(),
        }
    }

    /// Issue a request and return the raw response body.
    ///
    /// Does not interpret the response - pair with
    /// [`validate_response`](super::validate_response).
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] when the transport fails.
    #[instrument(skip(self, request))]
    pub async fn execute(&self, request: &GraphqlRequest<'_>) -> Result<String, ShopifyError> {
        debug!(query = %collapse_whitespace(request.query), "issuing graphql request");

        let response = self
            .http
            .post(&self.endpoint)
            .header("X-Shopify-Access-Token", self.token.expose_secret())
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let body = response.text().await?;
        debug!(body = %body, "graphql response");

        Ok(body)
    }

    /// Issue a request and validate the response in one step.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] on transport failure, or the
    /// validation errors described at
    /// [`validate_response`](super::validate_response).
    pub async fn call(&self, request: &GraphqlRequest<'_>) -> Result<Value, ShopifyError> {
        let raw = self.execute(request).await?;
        validate_response(request.query, &raw)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(base: &str) -> GraphqlClient {
        let credentials = ShopCredentials {
            shop: "canary-dev".to_string(),
            password: SecretString::from("test-token"),
        };
        GraphqlClient::new(&credentials, "2020-10", Some(base))
    }

    #[tokio::test]
    async fn posts_query_with_access_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/api/2020-10/graphql.json"))
            .and(header("X-Shopify-Access-Token", "test-token"))
            .and(body_partial_json(
                serde_json::json!({"variables": {"sku": "123"}}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":{}}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let request = GraphqlRequest {
            query: "query { shop }",
            variables: serde_json::json!({"sku": "123"}),
        };

        let raw = client.execute(&request).await.expect("request succeeds");
        assert_eq!(raw, r#"{"data":{}}"#);
    }

    #[tokio::test]
    async fn call_validates_error_responses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"errors":[{"message":"boom"}]}"#),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let request = GraphqlRequest {
            query: "query { shop }",
            variables: Value::Null,
        };

        let err = client.call(&request).await.expect_err("must fail");
        assert!(matches!(err, ShopifyError::Api { ref message, .. } if message == "boom"));
    }
}
