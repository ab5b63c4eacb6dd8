//! Integration tests for the patisserie storefront and admin.
//!
//! Every test runs against a [`wiremock::MockServer`] standing in for the
//! document database (and, for admin tests, the image host), so the suite
//! is self-contained: `cargo test -p patisserie-integration-tests`.
//!
//! # Test Categories
//!
//! - `docstore_products` - CRUD wire contract against the collection
//! - `catalog_watch` - live snapshot replacement and failure behavior
//! - `order_flow` - the full shopper path, catalog to outbound link
//! - `admin_flow` - form validation, image upload, and write semantics

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use serde_json::{Value, json};

use patisserie_docstore::{DocStoreClient, DocStoreConfig};

/// A product document as the database would serve it.
#[must_use]
pub fn product_json(id: &str, name: &str, price: u64, category: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "price": price,
        "category": category,
        "description": format!("{name} from the counter"),
        "image": format!("https://img.test/{id}.jpg"),
        "updatedAt": "2026-08-01T10:00:00Z"
    })
}

/// Install a test subscriber so `RUST_LOG` works under `cargo test`.
/// Safe to call from every test; only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A client pointed at a mock server's product collection.
#[must_use]
pub fn docstore_client(base_url: &str) -> DocStoreClient {
    init_tracing();
    DocStoreClient::new(&DocStoreConfig {
        base_url: base_url.to_owned(),
        api_key: SecretString::from("test-api-key-1"),
        collection: "products".to_owned(),
    })
}
