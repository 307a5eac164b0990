//! Shared scenario harness: a mock Shopify backend plus handler builders.

use aws_lambda_events::sqs::{SqsEvent, SqsMessage};
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopcanary_lambda::{ShopCredentials, SweepConfig};

/// API version the harness mounts its endpoint under; must match the
/// config below.
pub const API_VERSION: &str = "2020-10";

/// Sweep config wired to a mock server instead of `*.myshopify.com`.
#[must_use]
pub fn sweep_config(api_base: &str) -> SweepConfig {
    SweepConfig {
        table_name: "canary-records".to_string(),
        api_version: API_VERSION.to_string(),
        dev: ShopCredentials {
            shop: "shopA".to_string(),
            password: SecretString::from("dev-token"),
        },
        prod: ShopCredentials {
            shop: "shopB".to_string(),
            password: SecretString::from("prod-token"),
        },
        api_base: Some(api_base.to_string()),
    }
}

/// One-record SQS event.
#[must_use]
pub fn sqs_event(message_id: &str, body: &str) -> SqsEvent {
    SqsEvent {
        records: vec![SqsMessage {
            message_id: Some(message_id.to_string()),
            body: Some(body.to_string()),
            event_source: Some("aws:sqs".to_string()),
            ..Default::default()
        }],
    }
}

fn cost_block(actual: i64, available: f64) -> Value {
    json!({
        "cost": {
            "requestedQueryCost": actual,
            "actualQueryCost": actual,
            "throttleStatus": {
                "maximumAvailable": 1000.0,
                "currentlyAvailable": available,
                "restoreRate": 50.0
            }
        }
    })
}

/// Mount a backend that accepts all five sweep calls, each reporting an
/// `actualQueryCost` of 1. The final (delete) call reports `available`
/// headroom of 995.
pub async fn mount_unit_cost_backend(server: &MockServer) {
    let endpoint = format!("/admin/api/{API_VERSION}/graphql.json");

    Mock::given(method("POST"))
        .and(path(endpoint.clone()))
        .and(body_string_contains("productCreate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"productCreate": {
                "product": {
                    "id": "gid://shopify/Product/100",
                    "variants": {"edges": [{"node": {
                        "id": "gid://shopify/ProductVariant/200",
                        "inventoryItem": {
                            "id": "gid://shopify/InventoryItem/300",
                            "inventoryLevels": {"edges": [{"node": {
                                "id": "gid://shopify/InventoryLevel/400"
                            }}]}
                        }
                    }}]}
                },
                "userErrors": []
            }},
            "extensions": cost_block(1, 999.0)
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(endpoint.clone()))
        .and(body_string_contains("inventoryLevelBySku"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"inventoryItems": {"edges": [{"node": {
                "inventoryLevels": {"edges": [{"node": {
                    "id": "gid://shopify/InventoryLevel/401"
                }}]}
            }}]}},
            "extensions": cost_block(1, 998.0)
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(endpoint.clone()))
        .and(body_string_contains("inventoryAdjustQuantity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"inventoryAdjustQuantity": {"inventoryLevel": {
                "id": "gid://shopify/InventoryLevel/401",
                "item": {"sku": "1", "variant": {"displayName": "title-1"}}
            }}},
            "extensions": cost_block(1, 997.0)
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(endpoint.clone()))
        .and(body_string_contains("inventoryAvailable"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"inventoryItems": {"edges": [{"node": {
                "inventoryLevels": {"edges": [{"node": {"available": 5}}]}
            }}]}},
            "extensions": cost_block(1, 996.0)
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(endpoint))
        .and(body_string_contains("productDelete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"productDelete": {
                "shop": {"id": "gid://shopify/Shop/1"},
                "userErrors": []
            }},
            "extensions": cost_block(1, 995.0)
        })))
        .mount(server)
        .await;
}
