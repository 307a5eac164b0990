//! Record store for Shopcanary.
//!
//! One DynamoDB table holds both [`RunRecord`]s and [`FailureRecord`]s,
//! keyed by SQS message id. The [`RecordStore`] trait abstracts the table so
//! handlers can run against [`DynamoRecordStore`] in production and
//! [`MemoryRecordStore`] in tests and local runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use async_trait::async_trait;
use thiserror::Error;

use shopcanary_core::{FailureRecord, RunRecord};

mod dynamodb;
mod memory;

pub use dynamodb::DynamoRecordStore;
pub use memory::MemoryRecordStore;

/// Whether a message id has been processed before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seen {
    /// No record exists yet; the caller should run the workflow.
    FirstSeen,
    /// A record exists; its `again` counter has been incremented and the
    /// caller must skip the workflow.
    AlreadySeen,
}

/// Errors arising from the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying table operation failed.
    #[error("store {operation} failed: {source}")]
    Backend {
        operation: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A record could not be converted to or from the stored item shape.
    #[error("store codec error: {0}")]
    Codec(String),
}

/// The shared record table.
///
/// `check_and_mark` and `put_run` are deliberately separate operations: a
/// duplicate delivered between the lookup and the final write observes
/// `FirstSeen` and runs the workflow a second time. That window is an
/// accepted property of the system, not something implementations may
/// paper over with conditional writes.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Point lookup by message id. When a record exists, atomically
    /// increment its `again` counter and report [`Seen::AlreadySeen`].
    async fn check_and_mark(&self, message_id: &str) -> Result<Seen, StoreError>;

    /// Write a completed run record. Unconditional; relies on
    /// `check_and_mark` having filtered duplicates.
    async fn put_run(&self, record: &RunRecord) -> Result<(), StoreError>;

    /// Write a failure record. Unconditional, last write wins.
    async fn put_failure(&self, record: &FailureRecord) -> Result<(), StoreError>;
}
