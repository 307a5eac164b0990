//! Persisted records, keyed by SQS message id.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::cost::CostSnapshot;

/// Outcome of one completed sweep run.
///
/// Written exactly once per unique message id, after the five-step workflow
/// completes. Every later delivery of the same id only increments `again`;
/// no other field is ever overwritten after the first write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    /// SQS message id (table primary key).
    pub id: String,
    /// Correlation string carried over from the request.
    pub batch: String,
    /// Write time, epoch milliseconds.
    pub epoch: i64,
    /// Sum of `actual` across all cost snapshots.
    pub total: i64,
    /// Per-call cost snapshots, in call order.
    pub costs: Vec<CostSnapshot>,
    /// Throttle headroom reported by the final (delete) call.
    pub available: i64,
    /// Wall-clock duration of the workflow, milliseconds.
    pub duration: i64,
    /// Shop domain the run executed against.
    pub shop: String,
    /// Delivery counter: 1 on first write, incremented per duplicate.
    pub again: i64,
}

impl RunRecord {
    /// Build the record for a freshly completed run.
    ///
    /// `total` is derived from the snapshots and `available` is taken from
    /// the last snapshot's headroom (the delete step). `again` starts at 1,
    /// representing the first delivery.
    #[must_use]
    pub fn from_sweep(
        id: impl Into<String>,
        batch: impl Into<String>,
        shop: impl Into<String>,
        costs: Vec<CostSnapshot>,
        duration_ms: i64,
    ) -> Self {
        let total = costs.iter().map(|cost| cost.actual).sum();
        let available = costs.last().map_or(0, |cost| cost.available);

        Self {
            id: id.into(),
            batch: batch.into(),
            epoch: Utc::now().timestamp_millis(),
            total,
            costs,
            available,
            duration: duration_ms,
            shop: shop.into(),
            again: 1,
        }
    }
}

/// Body of a failed message: parsed JSON when possible, the raw string
/// otherwise.
///
/// This is the explicit form of "try to decode, keep the raw text on
/// failure" - callers construct it with [`FailureBody::parse`] rather than
/// swallowing the decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FailureBody {
    /// Body decoded as JSON.
    Json(serde_json::Value),
    /// Body kept verbatim because it was not valid JSON.
    Raw(String),
}

impl FailureBody {
    /// Decode `body` as JSON, falling back to the raw string.
    #[must_use]
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).map_or_else(|_| Self::Raw(body.to_string()), Self::Json)
    }

    /// The `batch` field, when the body is a JSON object carrying one.
    #[must_use]
    pub fn batch(&self) -> Option<String> {
        match self {
            Self::Json(value) => value
                .get("batch")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
            Self::Raw(_) => None,
        }
    }
}

/// Record of a message that exhausted its redelivery attempts.
///
/// Written unconditionally by the dead-letter Lambda - a repeat invocation
/// for the same message id overwrites the previous record (last write wins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// SQS message id (table primary key).
    pub id: String,
    /// Mirrors `id`; marks the record as a failure entry in the shared table.
    pub error: String,
    /// Parsed-or-raw message body.
    pub body: FailureBody,
    /// Correlation string, when the body carried one.
    pub batch: Option<String>,
    /// Write time, epoch milliseconds.
    pub epoch: i64,
}

impl FailureRecord {
    /// Build a failure record for a rejected message body.
    #[must_use]
    pub fn new(message_id: impl Into<String>, raw_body: &str) -> Self {
        let id = message_id.into();
        let body = FailureBody::parse(raw_body);
        let batch = body.batch();

        Self {
            error: id.clone(),
            id,
            body,
            batch,
            epoch: Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_costs(n: usize) -> Vec<CostSnapshot> {
        (0..n)
            .map(|i| CostSnapshot {
                requested: 1,
                actual: 1,
                available: 1000 - i64::try_from(i).expect("small index"),
            })
            .collect()
    }

    #[test]
    fn total_is_sum_of_actual_costs() {
        let costs = vec![
            CostSnapshot {
                requested: 10,
                actual: 10,
                available: 990,
            },
            CostSnapshot {
                requested: 1,
                actual: 1,
                available: 989,
            },
            CostSnapshot {
                requested: 10,
                actual: 6,
                available: 983,
            },
        ];
        let record = RunRecord::from_sweep("m-1", "batch", "shop", costs, 1200);
        assert_eq!(record.total, 17);
    }

    #[test]
    fn available_comes_from_final_snapshot() {
        let record = RunRecord::from_sweep("m-1", "batch", "shop", unit_costs(5), 10);
        assert_eq!(record.available, 996);
    }

    #[test]
    fn first_write_has_again_one() {
        let record = RunRecord::from_sweep("m-1", "batch", "shop", unit_costs(5), 10);
        assert_eq!(record.again, 1);
    }

    #[test]
    fn snapshots_keep_call_order() {
        let costs = unit_costs(5);
        let record = RunRecord::from_sweep("m-1", "batch", "shop", costs.clone(), 10);
        assert_eq!(record.costs, costs);
    }

    #[test]
    fn failure_body_keeps_raw_string_unchanged() {
        let body = FailureBody::parse("not json");
        assert_eq!(body, FailureBody::Raw("not json".to_string()));
        assert_eq!(body.batch(), None);
    }

    #[test]
    fn failure_body_decodes_json() {
        let body = FailureBody::parse(r#"{"batch":"1700000000","shop":"shopA"}"#);
        assert_eq!(body.batch(), Some("1700000000".to_string()));
    }

    #[test]
    fn failure_record_mirrors_id_into_error() {
        let record = FailureRecord::new("msg-9", "not json");
        assert_eq!(record.id, "msg-9");
        assert_eq!(record.error, "msg-9");
        assert_eq!(record.body, FailureBody::Raw("not json".to_string()));
        assert_eq!(record.batch, None);
    }

    #[test]
    fn failure_record_extracts_batch_from_json_body() {
        let record = FailureRecord::new("msg-9", r#"{"batch":"b-1","shop":"shopA"}"#);
        assert_eq!(record.batch, Some("b-1".to_string()));
    }
}
