//! Tests against a live Shopify shop.
//!
//! These require real credentials in the environment (see
//! `shopcanary-lambda`'s config docs) and create/delete a real test
//! product, so they are ignored by default.
//!
//! Run with: `cargo test -p shopcanary-integration-tests -- --ignored`

use shopcanary_lambda::SweepConfig;
use shopcanary_lambda::sweep::run_sweep;

#[tokio::test]
#[ignore = "Requires live Shopify credentials in the environment"]
async fn sweep_against_dev_shop() {
    let config = SweepConfig::from_env().expect("sweep configuration present");
    let client = config.graphql_client(&config.dev);

    let outcome = run_sweep(&client, 54_321, 3).await.expect("sweep succeeds");

    assert_eq!(outcome.costs.len(), 5);
    assert!(outcome.costs.iter().all(|cost| cost.actual > 0));
    assert!(outcome.duration_ms > 0);
}
