//! The five fixed sweep documents.
//!
//! Written against Admin API 2020-10. Field shapes are what the sweep's
//! extraction paths expect - change a document and the paths in
//! [`crate::sweep`] change with it.

use serde_json::json;

use super::GraphqlRequest;

const PRODUCT_CREATE: &str = r"
mutation productCreate($title: String!, $sku: String!) {
  productCreate(input: {
    title: $title
    variants: {
      sku: $sku
      inventoryManagement: SHOPIFY
    }
  }) {
    product {
      id
      variants(first: 1) {
        edges {
          node {
            id
            inventoryItem {
              id
              inventoryLevels(first: 1) {
                edges {
                  node {
                    id
                  }
                }
              }
            }
          }
        }
      }
    }
    userErrors {
      field
      message
    }
  }
}";

const INVENTORY_LEVEL_BY_SKU: &str = r"
query inventoryLevelBySku($query: String!) {
  inventoryItems(first: 1, query: $query) {
    edges {
      node {
        inventoryLevels(first: 1) {
          edges {
            node {
              id
            }
          }
        }
      }
    }
  }
}";

const INVENTORY_ADJUST: &str = r"
mutation inventoryAdjust($levelId: ID!, $delta: Int!) {
  inventoryAdjustQuantity(input: {
    inventoryLevelId: $levelId,
    availableDelta: $delta
  }) {
    inventoryLevel {
      id
      item {
        sku
        variant {
          displayName
        }
      }
    }
  }
}";

const INVENTORY_AVAILABLE: &str = r"
query inventoryAvailable($query: String!) {
  inventoryItems(first: 1, query: $query) {
    edges {
      node {
        inventoryLevels(first: 1) {
          edges {
            node {
              available
            }
          }
        }
      }
    }
  }
}";

const PRODUCT_DELETE: &str = r"
mutation productDelete($id: ID!) {
  productDelete(input: {
    id: $id
  }) {
    shop {
      id
    }
    userErrors {
      field
      message
    }
  }
}";

/// Create a test product titled `title-{sku}` with one tracked variant.
#[must_use]
pub fn product_create(sku: u32) -> GraphqlRequest<'static> {
    GraphqlRequest {
        query: PRODUCT_CREATE,
        variables: json!({
            "title": format!("title-{sku}"),
            "sku": sku.to_string(),
        }),
    }
}

/// Re-resolve the authoritative inventory level id by SKU.
#[must_use]
pub fn inventory_level_by_sku(sku: u32) -> GraphqlRequest<'static> {
    GraphqlRequest {
        query: INVENTORY_LEVEL_BY_SKU,
        variables: json!({ "query": format!("sku:{sku}") }),
    }
}

/// Adjust available quantity at an inventory level by `delta`.
#[must_use]
pub fn inventory_adjust(level_id: &str, delta: i64) -> GraphqlRequest<'static> {
    GraphqlRequest {
        query: INVENTORY_ADJUST,
        variables: json!({ "levelId": level_id, "delta": delta }),
    }
}

/// Read the available quantity for an inventory item.
#[must_use]
pub fn inventory_available(item_id: &str) -> GraphqlRequest<'static> {
    GraphqlRequest {
        query: INVENTORY_AVAILABLE,
        variables: json!({ "query": format!("id={item_id}") }),
    }
}

/// Delete the test product.
#[must_use]
pub fn product_delete(product_id: &str) -> GraphqlRequest<'static> {
    GraphqlRequest {
        query: PRODUCT_DELETE,
        variables: json!({ "id": product_id }),
    }
}
