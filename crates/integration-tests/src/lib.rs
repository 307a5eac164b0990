//! Integration tests for Shopcanary.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopcanary-integration-tests
//! ```
//!
//! The scenarios run the real handlers against a wiremock Shopify backend
//! and the in-memory record store - no AWS access required. Tests that talk
//! to a live shop are marked `#[ignore]` and need real credentials in the
//! environment.

pub mod harness;
