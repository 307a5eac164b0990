//! The five-step inventory sweep.
//!
//! Linear with no branching on business logic: create a product, re-resolve
//! its inventory level by SKU, adjust the available quantity, re-read
//! availability, delete the product. Each step threads identifiers from the
//! previous response and appends one cost snapshot; any validation failure
//! aborts the whole sweep with no compensating rollback, so a failure
//! before the delete step leaves the test product behind.

use std::time::Instant;

use tracing::{info, instrument};

use shopcanary_core::CostSnapshot;

use crate::shopify::{GraphqlClient, ShopifyError, i64_at, parse_cost, queries, string_at};

/// Result of one completed sweep.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    /// Per-call cost snapshots in call order:
    /// create, resolve, adjust, read, delete.
    pub costs: Vec<CostSnapshot>,
    /// Wall-clock duration from first call to last, milliseconds.
    pub duration_ms: i64,
}

/// Run the sweep against one shop.
///
/// `sku` names the test product; `delta` is the quantity adjustment. Both
/// are chosen randomly by the handler so every run touches a fresh product.
///
/// # Errors
///
/// Propagates the first [`ShopifyError`] from any step; later steps do not
/// run.
#[instrument(skip(client))]
pub async fn run_sweep(
    client: &GraphqlClient,
    sku: u32,
    delta: i64,
) -> Result<SweepOutcome, ShopifyError> {
    let started = Instant::now();
    let mut costs = Vec::with_capacity(5);

    // Step 1: create the product with one tracked variant.
    let value = client.call(&queries::product_create(sku)).await?;
    let product_id = string_at(&value, &["data", "productCreate", "product", "id"])?;
    let variant_id = string_at(
        &value,
        &["data", "productCreate", "product", "variants", "edges", "0", "node", "id"],
    )?;
    let item_id = string_at(
        &value,
        &[
            "data", "productCreate", "product", "variants", "edges", "0", "node",
            "inventoryItem", "id",
        ],
    )?;
    // The level id in the create response is provisional; the SKU lookup
    // below is authoritative once the query index catches up.
    let provisional_level_id = string_at(
        &value,
        &[
            "data", "productCreate", "product", "variants", "edges", "0", "node",
            "inventoryItem", "inventoryLevels", "edges", "0", "node", "id",
        ],
    )?;
    costs.push(parse_cost(&value)?.snapshot());
    info!(%product_id, %variant_id, %item_id, %provisional_level_id, "created product");

    // Step 2: re-resolve the inventory level by SKU.
    let value = client.call(&queries::inventory_level_by_sku(sku)).await?;
    let level_id = string_at(
        &value,
        &[
            "data", "inventoryItems", "edges", "0", "node", "inventoryLevels", "edges", "0",
            "node", "id",
        ],
    )?;
    costs.push(parse_cost(&value)?.snapshot());

    // Step 3: adjust the available quantity.
    let value = client.call(&queries::inventory_adjust(&level_id, delta)).await?;
    costs.push(parse_cost(&value)?.snapshot());

    // Step 4: re-read availability. Reporting only; not used for control flow.
    let value = client.call(&queries::inventory_available(&item_id)).await?;
    let available = i64_at(
        &value,
        &[
            "data", "inventoryItems", "edges", "0", "node", "inventoryLevels", "edges", "0",
            "node", "available",
        ],
    )?;
    costs.push(parse_cost(&value)?.snapshot());
    info!(%level_id, available, delta, "adjusted inventory");

    // Step 5: delete the test product.
    let value = client.call(&queries::product_delete(&product_id)).await?;
    costs.push(parse_cost(&value)?.snapshot());

    let duration_ms = i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX);
    info!(duration_ms, "sweep complete");

    Ok(SweepOutcome { costs, duration_ms })
}
