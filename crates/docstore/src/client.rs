//! HTTP client for the document database's REST surface.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use patisserie_core::{Product, ProductId, ProductInput};

use crate::DocStoreError;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-api-key";

/// How much response body to keep in error messages and logs.
const ERROR_BODY_LIMIT: usize = 500;

/// Connection settings for the document database.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct DocStoreConfig {
    /// Base URL of the database's REST endpoint (no trailing slash).
    pub base_url: String,
    /// API key sent with every request.
    pub api_key: SecretString,
    /// Collection holding the product documents.
    pub collection: String,
}

impl std::fmt::Debug for DocStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocStoreConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("collection", &self.collection)
            .finish()
    }
}

/// Client for the product collection.
///
/// Cheaply cloneable via `Arc`; one instance is shared by the watcher task
/// and any writer.
#[derive(Clone)]
pub struct DocStoreClient {
    inner: Arc<DocStoreClientInner>,
}

struct DocStoreClientInner {
    client: reqwest::Client,
    collection_url: String,
    api_key: SecretString,
}

impl std::fmt::Debug for DocStoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocStoreClient")
            .field("collection_url", &self.inner.collection_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl DocStoreClient {
    /// Create a new client for the configured collection.
    #[must_use]
    pub fn new(config: &DocStoreConfig) -> Self {
        let collection_url = format!(
            "{}/v1/{}",
            config.base_url.trim_end_matches('/'),
            config.collection
        );

        Self {
            inner: Arc::new(DocStoreClientInner {
                client: reqwest::Client::new(),
                collection_url,
                api_key: config.api_key.clone(),
            }),
        }
    }

    /// Fetch the full product collection.
    ///
    /// This is always a whole-snapshot read; the caller replaces whatever it
    /// held before, it never merges.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a
    /// non-success status, or the body does not parse.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, DocStoreError> {
        let response = self
            .inner
            .client
            .get(&self.inner.collection_url)
            .header(API_KEY_HEADER, self.inner.api_key.expose_secret())
            .send()
            .await?;

        let body = check_status(response, &self.inner.collection_url).await?;
        let products: Vec<Product> = serde_json::from_str(&body)?;

        debug!(count = products.len(), "Fetched product snapshot");
        Ok(products)
    }

    /// Create a product document. The database assigns the id and returns
    /// the stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a
    /// product document.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, DocStoreError> {
        let response = self
            .inner
            .client
            .post(&self.inner.collection_url)
            .header(API_KEY_HEADER, self.inner.api_key.expose_secret())
            .json(input)
            .send()
            .await?;

        let body = check_status(response, &self.inner.collection_url).await?;
        let product: Product = serde_json::from_str(&body)?;

        debug!(id = %product.id, "Created product");
        Ok(product)
    }

    /// Overwrite an existing product document, preserving its id.
    ///
    /// Last write wins: no version check, no merge. A concurrent editor's
    /// update is silently replaced by this one if it lands later.
    ///
    /// # Errors
    ///
    /// Returns [`DocStoreError::NotFound`] if the document does not exist,
    /// or another error for transport/API failures.
    #[instrument(skip(self, input), fields(id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        input: &ProductInput,
    ) -> Result<Product, DocStoreError> {
        let url = self.document_url(id);
        let response = self
            .inner
            .client
            .patch(&url)
            .header(API_KEY_HEADER, self.inner.api_key.expose_secret())
            .json(input)
            .send()
            .await?;

        let body = check_status(response, &url).await?;
        let product: Product = serde_json::from_str(&body)?;

        debug!(id = %product.id, "Updated product");
        Ok(product)
    }

    /// Delete a product document.
    ///
    /// # Errors
    ///
    /// Returns [`DocStoreError::NotFound`] if the document does not exist,
    /// or another error for transport/API failures.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), DocStoreError> {
        let url = self.document_url(id);
        let response = self
            .inner
            .client
            .delete(&url)
            .header(API_KEY_HEADER, self.inner.api_key.expose_secret())
            .send()
            .await?;

        check_status(response, &url).await?;

        debug!(id = %id, "Deleted product");
        Ok(())
    }

    fn document_url(&self, id: &ProductId) -> String {
        format!("{}/{}", self.inner.collection_url, id)
    }
}

/// Map a non-success response to an error, otherwise hand back the body.
///
/// The body is read as text first so a failed parse still leaves something
/// useful to log.
async fn check_status(response: reqwest::Response, url: &str) -> Result<String, DocStoreError> {
    let status = response.status();
    let body = response.text().await?;

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(DocStoreError::NotFound(url.to_owned()));
    }

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %truncate(&body),
            "Document store returned non-success status"
        );
        return Err(DocStoreError::Api {
            status: status.as_u16(),
            message: truncate(&body),
        });
    }

    Ok(body)
}

fn truncate(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}
