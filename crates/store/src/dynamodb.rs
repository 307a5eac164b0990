//! DynamoDB-backed record store.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use tracing::instrument;

use shopcanary_core::{FailureRecord, RunRecord};

use crate::{RecordStore, Seen, StoreError};

const KEY_ID: &str = "id";

/// Record store backed by one DynamoDB table keyed by message id.
#[derive(Debug, Clone)]
pub struct DynamoRecordStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoRecordStore {
    /// Create a store over an existing table.
    #[must_use]
    pub const fn new(client: aws_sdk_dynamodb::Client, table_name: String) -> Self {
        Self { client, table_name }
    }

    async fn put_item(
        &self,
        item: HashMap<String, AttributeValue>,
        operation: &'static str,
    ) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|err| StoreError::Backend {
                operation,
                source: err.into(),
            })?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl RecordStore for DynamoRecordStore {
    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn check_and_mark(&self, message_id: &str) -> Result<Seen, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_ID, AttributeValue::S(message_id.to_string()))
            .send()
            .await
            .map_err(|err| StoreError::Backend {
                operation: "get_item",
                source: err.into(),
            })?;

        if output.item.is_none() {
            return Ok(Seen::FirstSeen);
        }

        // ADD is atomic, so concurrent duplicates each count exactly once.
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(KEY_ID, AttributeValue::S(message_id.to_string()))
            .update_expression("ADD again :one")
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .send()
            .await
            .map_err(|err| StoreError::Backend {
                operation: "update_item",
                source: err.into(),
            })?;

        Ok(Seen::AlreadySeen)
    }

    #[instrument(skip(self, record), fields(table = %self.table_name, id = %record.id))]
    async fn put_run(&self, record: &RunRecord) -> Result<(), StoreError> {
        let item: HashMap<String, AttributeValue> =
            serde_dynamo::to_item(record).map_err(|err| StoreError::Codec(err.to_string()))?;

        self.put_item(item, "put_run").await
    }

    #[instrument(skip(self, record), fields(table = %self.table_name, id = %record.id))]
    async fn put_failure(&self, record: &FailureRecord) -> Result<(), StoreError> {
        let item: HashMap<String, AttributeValue> =
            serde_dynamo::to_item(record).map_err(|err| StoreError::Codec(err.to_string()))?;

        self.put_item(item, "put_failure").await
    }
}
