//! Shopcanary Core - Shared types library.
//!
//! This crate provides common types used across all Shopcanary components:
//! - `lambda` - SQS-triggered Lambda functions (inventory sweep, dead letter)
//! - `store` - DynamoDB record store
//! - `cli` - Test-message publisher
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no AWS clients, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Queue message bodies, cost telemetry, and persisted records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
