//! Dead-letter Lambda entry point.

#![cfg_attr(not(test), forbid(unsafe_code))]

use aws_lambda_events::sqs::SqsEvent;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use tracing_subscriber::EnvFilter;

use shopcanary_lambda::{DeadLetterConfig, DeadLetterHandler};
use shopcanary_store::DynamoRecordStore;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .without_time() // CloudWatch adds timestamps
        .init();

    let config = DeadLetterConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = DynamoRecordStore::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        config.table_name,
    );
    let handler = DeadLetterHandler::new(store);
    let handler = &handler;

    run(service_fn(move |event: LambdaEvent<SqsEvent>| async move {
        handler.handle(event.payload).await.map_err(Error::from)
    }))
    .await
}
