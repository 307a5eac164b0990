//! Handler for the failure queue.

use aws_lambda_events::sqs::{SqsEvent, SqsMessage};
use tracing::{instrument, warn};

use shopcanary_core::FailureRecord;
use shopcanary_store::RecordStore;

use super::HandlerError;

/// Records messages that exhausted their redelivery attempts.
///
/// Best-effort by design: no idempotency check, every invocation for a
/// given message id overwrites the previous failure record.
pub struct DeadLetterHandler<S> {
    store: S,
}

impl<S: RecordStore> DeadLetterHandler<S> {
    /// Create a handler over a record store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Record every failed message in one SQS event.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] only when the store write itself fails or
    /// a record has no message id; bodies are never rejected.
    #[instrument(skip(self, event), fields(records = event.records.len()))]
    pub async fn handle(&self, event: SqsEvent) -> Result<(), HandlerError> {
        for message in &event.records {
            if message.event_source.as_deref() != Some("aws:sqs") {
                continue;
            }
            self.record(message).await?;
        }
        Ok(())
    }

    async fn record(&self, message: &SqsMessage) -> Result<(), HandlerError> {
        let message_id = message
            .message_id
            .as_deref()
            .ok_or(HandlerError::MissingAttribute("messageId"))?;
        let body = message.body.as_deref().unwrap_or_default();

        warn!(message_id, body, "recording rejected message");

        let record = FailureRecord::new(message_id, body);
        self.store.put_failure(&record).await?;
        Ok(())
    }
}
