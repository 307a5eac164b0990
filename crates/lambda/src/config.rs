//! Lambda configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required (sweep)
//! - `TABLE_NAME` - DynamoDB record table
//! - `SHOPIFY_SHOP_DEV` - Development shop name (e.g. `my-dev-shop`)
//! - `SHOPIFY_PASSWORD_DEV` - Development Admin API access token
//! - `SHOPIFY_SHOP_PROD` - Production shop name
//! - `SHOPIFY_PASSWORD_PROD` - Production Admin API access token
//!
//! ## Required (dead letter)
//! - `TABLE_NAME` - DynamoDB record table
//!
//! ## Optional
//! - `SHOPIFY_API_VERSION` - Admin API version (default: 2020-10, the
//!   version the fixed sweep queries are written against)

use secrecy::SecretString;
use thiserror::Error;

use crate::shopify::GraphqlClient;

/// Admin API version the sweep queries target. `inventoryAdjustQuantity`
/// was removed in later versions, so bumping this means rewriting the
/// adjust step.
const DEFAULT_API_VERSION: &str = "2020-10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// One shop's Admin API credential pair.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopCredentials {
    /// Shop name (the `{shop}` in `{shop}.myshopify.com`).
    pub shop: String,
    /// Admin API access token.
    pub password: SecretString,
}

impl std::fmt::Debug for ShopCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopCredentials")
            .field("shop", &self.shop)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl ShopCredentials {
    fn from_env(shop_var: &str, password_var: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            shop: get_required_env(shop_var)?,
            password: SecretString::from(get_required_env(password_var)?),
        })
    }
}

/// Configuration for the sweep Lambda.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// DynamoDB record table.
    pub table_name: String,
    /// Shopify Admin API version.
    pub api_version: String,
    /// Development shop credentials.
    pub dev: ShopCredentials,
    /// Production shop credentials.
    pub prod: ShopCredentials,
    /// Override for the API base URL (used by mock-backed tests; `None`
    /// means `https://{shop}.myshopify.com`).
    pub api_base: Option<String>,
}

impl SweepConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            table_name: get_required_env("TABLE_NAME")?,
            api_version: get_env_or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION),
            dev: ShopCredentials::from_env("SHOPIFY_SHOP_DEV", "SHOPIFY_PASSWORD_DEV")?,
            prod: ShopCredentials::from_env("SHOPIFY_SHOP_PROD", "SHOPIFY_PASSWORD_PROD")?,
            api_base: None,
        })
    }

    /// Select the credential set for a request's `shop` value.
    ///
    /// Anything that is not the configured dev shop silently selects
    /// production; this is a selector, not a validation step.
    #[must_use]
    pub fn credentials_for(&self, shop: &str) -> &ShopCredentials {
        if shop == self.dev.shop {
            &self.dev
        } else {
            &self.prod
        }
    }

    /// Build a GraphQL client for one credential set.
    #[must_use]
    pub fn graphql_client(&self, credentials: &ShopCredentials) -> GraphqlClient {
        GraphqlClient::new(credentials, &self.api_version, self.api_base.as_deref())
    }
}

/// Configuration for the dead-letter Lambda.
#[derive(Debug, Clone)]
pub struct DeadLetterConfig {
    /// DynamoDB record table.
    pub table_name: String,
}

impl DeadLetterConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `TABLE_NAME` is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            table_name: get_required_env("TABLE_NAME")?,
        })
    }
}

fn get_required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn get_env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
