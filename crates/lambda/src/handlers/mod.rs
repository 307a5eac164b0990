//! SQS event handlers.

mod dead_letter;
mod sweep;

pub use dead_letter::DeadLetterHandler;
pub use sweep::SweepHandler;

use thiserror::Error;

use crate::shopify::ShopifyError;
use shopcanary_store::StoreError;

/// Errors a handler can surface to the Lambda runtime.
///
/// Any of these fails the invocation, which makes SQS redeliver the
/// message (subject to the queue's retry and dead-letter policy).
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Shopify(#[from] ShopifyError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid message body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("message missing {0}")]
    MissingAttribute(&'static str),
}
