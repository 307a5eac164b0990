//! In-memory record store for tests and local runs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use shopcanary_core::{FailureRecord, RunRecord};

use crate::{RecordStore, Seen, StoreError};

#[derive(Debug, Clone)]
enum Stored {
    Run(RunRecord),
    Failure(FailureRecord),
}

/// Record store holding everything in a mutex-guarded map.
///
/// Mirrors the DynamoDB table's observable behavior: point lookups by
/// message id, atomic `again` increments, unconditional overwrites.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Arc<Mutex<HashMap<String, Stored>>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a run record by message id, if present.
    #[must_use]
    pub fn run(&self, message_id: &str) -> Option<RunRecord> {
        let records = self.records.lock().expect("record map poisoned");
        match records.get(message_id) {
            Some(Stored::Run(record)) => Some(record.clone()),
            _ => None,
        }
    }

    /// Fetch a failure record by message id, if present.
    #[must_use]
    pub fn failure(&self, message_id: &str) -> Option<FailureRecord> {
        let records = self.records.lock().expect("record map poisoned");
        match records.get(message_id) {
            Some(Stored::Failure(record)) => Some(record.clone()),
            _ => None,
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().expect("record map poisoned").len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryRecordStore {
    async fn check_and_mark(&self, message_id: &str) -> Result<Seen, StoreError> {
        let mut records = self.records.lock().expect("record map poisoned");
        match records.get_mut(message_id) {
            Some(Stored::Run(record)) => {
                record.again += 1;
                Ok(Seen::AlreadySeen)
            }
            Some(Stored::Failure(_)) => Ok(Seen::AlreadySeen),
            None => Ok(Seen::FirstSeen),
        }
    }

    async fn put_run(&self, record: &RunRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("record map poisoned")
            .insert(record.id.clone(), Stored::Run(record.clone()));
        Ok(())
    }

    async fn put_failure(&self, record: &FailureRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("record map poisoned")
            .insert(record.id.clone(), Stored::Failure(record.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use shopcanary_core::CostSnapshot;

    use super::*;

    fn sample_record(id: &str) -> RunRecord {
        RunRecord::from_sweep(
            id,
            "batch-1",
            "shop-dev",
            vec![CostSnapshot {
                requested: 1,
                actual: 1,
                available: 999,
            }],
            42,
        )
    }

    #[tokio::test]
    async fn first_seen_when_absent() {
        let store = MemoryRecordStore::new();
        let seen = store.check_and_mark("m-1").await.expect("lookup");
        assert_eq!(seen, Seen::FirstSeen);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn duplicate_increments_again_only() {
        let store = MemoryRecordStore::new();
        store.put_run(&sample_record("m-1")).await.expect("write");

        let seen = store.check_and_mark("m-1").await.expect("lookup");
        assert_eq!(seen, Seen::AlreadySeen);

        let record = store.run("m-1").expect("record present");
        assert_eq!(record.again, 2);
        assert_eq!(record.total, 1);
        assert_eq!(record.batch, "batch-1");
    }

    #[tokio::test]
    async fn each_duplicate_counts_once() {
        let store = MemoryRecordStore::new();
        store.put_run(&sample_record("m-1")).await.expect("write");

        for _ in 0..3 {
            store.check_and_mark("m-1").await.expect("lookup");
        }

        assert_eq!(store.run("m-1").expect("record present").again, 4);
    }

    #[tokio::test]
    async fn failure_overwrite_is_last_write_wins() {
        let store = MemoryRecordStore::new();
        store
            .put_failure(&FailureRecord::new("m-2", "first"))
            .await
            .expect("write");
        store
            .put_failure(&FailureRecord::new("m-2", "second"))
            .await
            .expect("write");

        let record = store.failure("m-2").expect("record present");
        assert_eq!(
            record.body,
            shopcanary_core::FailureBody::Raw("second".to_string())
        );
    }
}
