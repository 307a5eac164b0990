//! Core types for Shopcanary.
//!
//! Everything persisted to DynamoDB or carried on the queue is defined here.

pub mod cost;
pub mod message;
pub mod record;

pub use cost::CostSnapshot;
pub use message::RunRequest;
pub use record::{FailureBody, FailureRecord, RunRecord};
