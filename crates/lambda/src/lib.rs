//! Shopcanary Lambda functions.
//!
//! Two SQS-triggered functions share this crate:
//!
//! - `sweep_lambda` - consumes run requests, executes the five-step
//!   inventory sweep against the Shopify Admin GraphQL API, and records the
//!   outcome (cost telemetry, duration, duplicate counter) in DynamoDB.
//! - `dead_letter_lambda` - consumes messages that exhausted their
//!   redelivery attempts and records them in the same table.
//!
//! # Architecture
//!
//! Clients and configuration are constructed once at cold start and passed
//! into the handlers explicitly - no module-level singletons. Each SQS
//! record is processed independently; the five sweep steps are strictly
//! sequential because each consumes identifiers produced by the previous
//! one. Handler errors propagate to the Lambda runtime, which lets SQS
//! redeliver the message; duplicates are detected afterwards by the record
//! store and downgraded to a counter increment.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod handlers;
pub mod shopify;
pub mod sweep;

pub use config::{ConfigError, DeadLetterConfig, ShopCredentials, SweepConfig};
pub use handlers::{DeadLetterHandler, HandlerError, SweepHandler};
