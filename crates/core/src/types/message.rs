//! Queue message body for sweep runs.

use serde::{Deserialize, Serialize};

/// Body of an inbound SQS message requesting one sweep run.
///
/// Published by the CLI and decoded by the sweep Lambda. The `shop` value
/// selects which credential set the run uses; `batch` is an opaque
/// correlation string carried through into the persisted record unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Caller-supplied correlation string for grouping test runs.
    pub batch: String,
    /// Shop selector (matched against the configured dev shop).
    pub shop: String,
}
