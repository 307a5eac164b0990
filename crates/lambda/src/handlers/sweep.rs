//! Handler for the sweep queue.

use aws_lambda_events::sqs::{SqsEvent, SqsMessage};
use rand::Rng;
use tracing::{info, instrument};

use shopcanary_core::{RunRecord, RunRequest};
use shopcanary_store::{RecordStore, Seen};

use crate::config::SweepConfig;
use crate::sweep::run_sweep;

use super::HandlerError;

/// Processes sweep run requests delivered over SQS.
///
/// Holds the record store and configuration for the life of the process;
/// a GraphQL client is built per message because the message's `shop`
/// value selects the credential set.
pub struct SweepHandler<S> {
    store: S,
    config: SweepConfig,
}

impl<S: RecordStore> SweepHandler<S> {
    /// Create a handler over a record store.
    pub const fn new(store: S, config: SweepConfig) -> Self {
        Self { store, config }
    }

    /// Process every record in one SQS event.
    ///
    /// # Errors
    ///
    /// Returns the first [`HandlerError`], failing the invocation so the
    /// queue redelivers.
    #[instrument(skip(self, event), fields(records = event.records.len()))]
    pub async fn handle(&self, event: SqsEvent) -> Result<(), HandlerError> {
        for message in &event.records {
            self.process(message).await?;
        }
        Ok(())
    }

    async fn process(&self, message: &SqsMessage) -> Result<(), HandlerError> {
        let message_id = message
            .message_id
            .as_deref()
            .ok_or(HandlerError::MissingAttribute("messageId"))?;

        // Duplicate deliveries are not errors: count them and skip the
        // sweep entirely, issuing no GraphQL calls.
        if self.store.check_and_mark(message_id).await? == Seen::AlreadySeen {
            info!(message_id, "duplicate delivery, counted and skipped");
            return Ok(());
        }

        let body = message
            .body
            .as_deref()
            .ok_or(HandlerError::MissingAttribute("body"))?;
        let request: RunRequest = serde_json::from_str(body)?;

        let credentials = self.config.credentials_for(&request.shop);
        let client = self.config.graphql_client(credentials);

        let (sku, delta) = {
            let mut rng = rand::rng();
            (rng.random_range(1..=99_999), rng.random_range(1..=10))
        };
        info!(message_id, batch = %request.batch, shop = %credentials.shop, sku, delta, "starting sweep");

        let outcome = run_sweep(&client, sku, delta).await?;

        let record = RunRecord::from_sweep(
            message_id,
            request.batch,
            credentials.shop.clone(),
            outcome.costs,
            outcome.duration_ms,
        );
        self.store.put_run(&record).await?;

        info!(message_id, total = record.total, available = record.available, "recorded sweep");
        Ok(())
    }
}
