//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DOCSTORE_BASE_URL` - Base URL of the document database REST endpoint
//! - `DOCSTORE_API_KEY` - API key for the document database
//! - `SHOP_OWNER_PHONE` - WhatsApp recipient for orders (country code +
//!   number, digits only, e.g. 917299731118)
//!
//! ## Optional
//! - `DOCSTORE_COLLECTION` - Product collection name (default: products)
//! - `CATALOG_POLL_INTERVAL_SECS` - Snapshot poll interval (default: 5)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

use patisserie_docstore::DocStoreConfig;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Document database connection settings.
    pub docstore: DocStoreConfig,
    /// WhatsApp recipient identifier for outbound orders.
    pub shop_owner_phone: String,
    /// How often the catalog watcher polls for a fresh snapshot.
    pub poll_interval: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the API key looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let docstore = docstore_from_env()?;

        let shop_owner_phone = get_required_env("SHOP_OWNER_PHONE")?;
        if !shop_owner_phone.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::InvalidEnvVar(
                "SHOP_OWNER_PHONE".to_string(),
                "must contain only digits".to_string(),
            ));
        }

        let poll_interval_secs = get_env_or_default("CATALOG_POLL_INTERVAL_SECS", "5")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_POLL_INTERVAL_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            docstore,
            shop_owner_phone,
            poll_interval: Duration::from_secs(poll_interval_secs),
        })
    }
}

/// Load the shared document store settings.
pub(crate) fn docstore_from_env() -> Result<DocStoreConfig, ConfigError> {
    Ok(DocStoreConfig {
        base_url: get_required_env("DOCSTORE_BASE_URL")?,
        api_key: get_validated_secret("DOCSTORE_API_KEY")?,
        collection: get_env_or_default("DOCSTORE_COLLECTION", "products"),
    })
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a secret is not an obvious placeholder.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
