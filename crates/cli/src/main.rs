//! Shopcanary CLI - Test-message publisher.
//!
//! # Usage
//!
//! ```bash
//! # Publish 10 sweep requests to the queue named by QUEUE_NAME
//! shopcanary send 10
//!
//! # Publish against the dev shop
//! shopcanary send 10 --shop canary-dev
//! ```
//!
//! Every message in one invocation shares a `batch` value (the current
//! unix timestamp), so one `send` run can be correlated in the record
//! table afterwards.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shopcanary_core::RunRequest;

#[derive(Parser)]
#[command(name = "shopcanary")]
#[command(author, version, about = "Shopcanary CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish synthetic sweep requests to the run queue
    Send {
        /// Number of messages to publish
        count: u32,

        /// Shop selector carried in each message body
        #[arg(short, long, default_value = "prod")]
        shop: String,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("queue {0} not found")]
    QueueNotFound(String),
    #[error("SQS error: {0}")]
    Sqs(String),
    #[error("failed to encode message body: {0}")]
    Encode(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Send { count, shop } => send(count, shop).await,
    }
}

async fn send(count: u32, shop: String) -> Result<(), CliError> {
    let queue_name = std::env::var("QUEUE_NAME")
        .map_err(|_| CliError::MissingEnvVar("QUEUE_NAME".to_string()))?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_sqs::Client::new(&aws_config);

    let queue_url = client
        .get_queue_url()
        .queue_name(&queue_name)
        .send()
        .await
        .map_err(|err| CliError::Sqs(err.to_string()))?
        .queue_url
        .ok_or(CliError::QueueNotFound(queue_name))?;

    let request = RunRequest {
        batch: chrono::Utc::now().timestamp().to_string(),
        shop,
    };
    let body = serde_json::to_string(&request)?;

    for sent in 1..=count {
        let output = client
            .send_message()
            .queue_url(&queue_url)
            .message_body(&body)
            .send()
            .await
            .map_err(|err| CliError::Sqs(err.to_string()))?;

        info!(
            sent,
            count,
            message_id = output.message_id.as_deref().unwrap_or("unknown"),
            "published"
        );
    }

    info!(batch = %request.batch, count, "batch published");
    Ok(())
}
