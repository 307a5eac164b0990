//! Field extraction and cost telemetry parsing.

use serde::Deserialize;
use serde_json::Value;
use shopcanary_core::CostSnapshot;

use super::ShopifyError;

/// The `extensions.cost` block Shopify attaches to every Admin API
/// response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCost {
    pub requested_query_cost: i64,
    pub actual_query_cost: i64,
    pub throttle_status: ThrottleStatus,
}

/// Throttle telemetry inside the cost block.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrottleStatus {
    /// Headroom remaining; Shopify reports this as a float.
    pub currently_available: f64,
}

impl ApiCost {
    /// Condense to the persisted snapshot shape.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn snapshot(&self) -> CostSnapshot {
        CostSnapshot {
            requested: self.requested_query_cost,
            actual: self.actual_query_cost,
            available: self.throttle_status.currently_available as i64,
        }
    }
}

/// Parse the cost block out of a validated response document.
///
/// # Errors
///
/// Returns [`ShopifyError::MissingField`] when the block is absent or
/// malformed.
pub fn parse_cost(value: &Value) -> Result<ApiCost, ShopifyError> {
    value
        .get("extensions")
        .and_then(|extensions| extensions.get("cost"))
        .cloned()
        .and_then(|cost| serde_json::from_value(cost).ok())
        .ok_or_else(|| ShopifyError::MissingField {
            path: "extensions.cost".to_string(),
        })
}

fn value_at<'v>(mut value: &'v Value, path: &[&str]) -> Option<&'v Value> {
    for segment in path {
        value = match segment.parse::<usize>() {
            Ok(index) => value.get(index)?,
            Err(_) => value.get(segment)?,
        };
    }
    Some(value)
}

/// Extract a string at a fixed path, where numeric segments index arrays.
///
/// # Errors
///
/// Returns [`ShopifyError::MissingField`] when the path does not resolve
/// to a string.
pub fn string_at(value: &Value, path: &[&str]) -> Result<String, ShopifyError> {
    value_at(value, path)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ShopifyError::MissingField {
            path: path.join("."),
        })
}

/// Extract an integer at a fixed path.
///
/// # Errors
///
/// Returns [`ShopifyError::MissingField`] when the path does not resolve
/// to an integer.
pub fn i64_at(value: &Value, path: &[&str]) -> Result<i64, ShopifyError> {
    value_at(value, path)
        .and_then(Value::as_i64)
        .ok_or_else(|| ShopifyError::MissingField {
            path: path.join("."),
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_shopify_cost_shape() {
        let value = json!({
            "data": {},
            "extensions": {
                "cost": {
                    "requestedQueryCost": 10,
                    "actualQueryCost": 6,
                    "throttleStatus": {
                        "maximumAvailable": 1000.0,
                        "currentlyAvailable": 994.5,
                        "restoreRate": 50.0
                    }
                }
            }
        });

        let snapshot = parse_cost(&value).expect("cost present").snapshot();
        assert_eq!(
            snapshot,
            CostSnapshot {
                requested: 10,
                actual: 6,
                available: 994,
            }
        );
    }

    #[test]
    fn missing_cost_is_an_error() {
        let err = parse_cost(&json!({"data": {}})).expect_err("must fail");
        assert!(matches!(err, ShopifyError::MissingField { ref path } if path == "extensions.cost"));
    }

    #[test]
    fn string_at_walks_edges() {
        let value = json!({
            "data": {"inventoryItems": {"edges": [
                {"node": {"inventoryLevels": {"edges": [{"node": {"id": "gid://shopify/InventoryLevel/3"}}]}}}
            ]}}
        });

        let id = string_at(
            &value,
            &[
                "data",
                "inventoryItems",
                "edges",
                "0",
                "node",
                "inventoryLevels",
                "edges",
                "0",
                "node",
                "id",
            ],
        )
        .expect("path resolves");
        assert_eq!(id, "gid://shopify/InventoryLevel/3");
    }

    #[test]
    fn missing_path_names_the_path() {
        let err = string_at(&json!({"data": {}}), &["data", "product", "id"])
            .expect_err("must fail");
        assert!(matches!(err, ShopifyError::MissingField { ref path } if path == "data.product.id"));
    }
}
