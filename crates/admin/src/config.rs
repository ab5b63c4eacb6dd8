//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DOCSTORE_BASE_URL` - Base URL of the document database REST endpoint
//! - `DOCSTORE_API_KEY` - API key for the document database
//! - `ADMIN_PASSWORD` - Admin password, compared in plaintext at login
//!
//! ## Image backend (one of)
//! - `ADMIN_IMAGE_BACKEND=blob` (default) with
//!   - `BLOB_STORE_URL` - Base URL of the blob storage API
//!   - `BLOB_STORE_API_KEY` / `BLOB_STORE_API_SECRET` - Basic-auth pair
//! - `ADMIN_IMAGE_BACKEND=widget` with
//!   - `WIDGET_UPLOAD_URL` - Hosted upload endpoint
//!   - `WIDGET_UPLOAD_PRESET` - Unsigned upload preset name
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

/// Which image storage backend the admin uses.
///
/// The two variants reduce to the same capability - produce a URL from
/// selected image bytes, optionally remove one later - and differ only in
/// who hosts the bytes and whether deletion exists.
#[derive(Clone)]
pub enum ImageBackendConfig {
    /// Direct blob storage API with upload and best-effort delete.
    Blob {
        base_url: String,
        api_key: String,
        api_secret: SecretString,
    },
    /// Hosted upload widget endpoint; upload only, no deletion.
    Widget {
        upload_url: String,
        upload_preset: String,
    },
}

impl std::fmt::Debug for ImageBackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blob {
                base_url, api_key, ..
            } => f
                .debug_struct("Blob")
                .field("base_url", base_url)
                .field("api_key", api_key)
                .field("api_secret", &"[REDACTED]")
                .finish(),
            Self::Widget {
                upload_url,
                upload_preset,
            } => f
                .debug_struct("Widget")
                .field("upload_url", upload_url)
                .field("upload_preset", upload_preset)
                .finish(),
        }
    }
}

/// Admin application configuration.
#[derive(Clone)]
pub struct AdminConfig {
    /// Document database connection settings.
    pub docstore: DocStoreConfig,
    /// Admin password, compared in plaintext at login.
    pub admin_password: SecretString,
    /// Image storage backend.
    pub image_backend: ImageBackendConfig,
    /// How often the catalog watcher polls for a fresh snapshot.
    pub poll_interval: Duration,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("docstore", &self.docstore)
            .field("admin_password", &"[REDACTED]")
            .field("image_backend", &self.image_backend)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if a service credential looks like a placeholder. The admin
    /// password is deliberately not strength-checked: it is a configured
    /// plaintext string by design.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let docstore = DocStoreConfig {
            base_url: get_required_env("DOCSTORE_BASE_URL")?,
            api_key: get_validated_secret("DOCSTORE_API_KEY")?,
            collection: get_env_or_default("DOCSTORE_COLLECTION", "products"),
        };

        let admin_password = SecretString::from(get_required_env("ADMIN_PASSWORD")?);

        let image_backend = match get_env_or_default("ADMIN_IMAGE_BACKEND", "blob").as_str() {
            "blob" => ImageBackendConfig::Blob {
                base_url: get_required_env("BLOB_STORE_URL")?,
                api_key: get_required_env("BLOB_STORE_API_KEY")?,
                api_secret: get_validated_secret("BLOB_STORE_API_SECRET")?,
            },
            "widget" => ImageBackendConfig::Widget {
                upload_url: get_required_env("WIDGET_UPLOAD_URL")?,
                upload_preset: get_required_env("WIDGET_UPLOAD_PRESET")?,
            },
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "ADMIN_IMAGE_BACKEND".to_string(),
                    format!("expected 'blob' or 'widget', got '{other}'"),
                ));
            }
        };

        let poll_interval_secs = get_env_or_default("CATALOG_POLL_INTERVAL_SECS", "5")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_POLL_INTERVAL_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            docstore,
            admin_password,
            image_backend,
            poll_interval: Duration::from_secs(poll_interval_secs),
        })
    }
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("put-your-key-here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength("sk-9Qz2mVt4xWp1", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AdminConfig {
            docstore: DocStoreConfig {
                base_url: "https://docs.test".to_string(),
                api_key: SecretString::from("doc-key-secret"),
                collection: "products".to_string(),
            },
            admin_password: SecretString::from("hunter2-plaintext"),
            image_backend: ImageBackendConfig::Blob {
                base_url: "https://blobs.test".to_string(),
                api_key: "blob-key-id".to_string(),
                api_secret: SecretString::from("blob-secret-value"),
            },
            poll_interval: Duration::from_secs(5),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2-plaintext"));
        assert!(!debug_output.contains("blob-secret-value"));
        assert!(!debug_output.contains("doc-key-secret"));
        // Non-secret identifiers stay visible.
        assert!(debug_output.contains("blob-key-id"));
    }
}
