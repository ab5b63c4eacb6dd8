//! Client for the external document database's `products` collection.
//!
//! # Architecture
//!
//! - The database is the source of truth - no local persistence, no sync
//!   engine. The client reads whole snapshots and issues single-document
//!   writes.
//! - Reads for the live views go through [`watch::ProductWatcher`], which
//!   publishes full-replacement snapshots into a `tokio::sync::watch`
//!   channel.
//! - Writes (admin only) are last-write-wins: the database applies them in
//!   arrival order and two concurrent editors silently overwrite each other.
//!   That is an accepted property of the system, not a bug here.
//!
//! # Example
//!
//! ```rust,ignore
//! use patisserie_docstore::{DocStoreClient, DocStoreConfig};
//!
//! let client = DocStoreClient::new(&config.docstore);
//!
//! let products = client.list_products().await?;
//! let created = client.create_product(&input).await?;
//! client.delete_product(&created.id).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod client;
pub mod watch;

pub use client::{DocStoreClient, DocStoreConfig};
pub use watch::{CatalogSnapshot, ProductWatcher};

use thiserror::Error;

/// Errors that can occur when talking to the document database.
#[derive(Debug, Error)]
pub enum DocStoreError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("document store returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for logging.
        message: String,
    },

    /// Response body did not parse as the expected document shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The addressed document does not exist.
    #[error("document not found: {0}")]
    NotFound(String),
}
