//! Per-call API cost telemetry.

use serde::{Deserialize, Serialize};

/// One GraphQL call's cost telemetry, in call order.
///
/// Condensed from the `extensions.cost` block Shopify attaches to every
/// Admin API response: the cost the query was estimated at, the cost it
/// actually consumed, and the throttle headroom remaining afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSnapshot {
    /// Requested (estimated) query cost.
    pub requested: i64,
    /// Actual query cost charged.
    pub actual: i64,
    /// Throttle headroom currently available after this call.
    pub available: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_flat() {
        let snapshot = CostSnapshot {
            requested: 10,
            actual: 6,
            available: 994,
        };
        let json = serde_json::to_value(snapshot).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({"requested": 10, "actual": 6, "available": 994})
        );
    }
}
