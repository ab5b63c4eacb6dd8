//! Image storage backends.
//!
//! Product images are hosted outside the document database; only their URLs
//! are stored on the product document. Two interchangeable backends cover
//! the one capability the form needs - turn selected bytes into a public
//! URL - plus best-effort removal where the backend supports it.

mod blob;
mod widget;

use thiserror::Error;
use tracing::warn;

use crate::config::ImageBackendConfig;

pub use blob::BlobStore;
pub use widget::WidgetStore;

/// Errors from image upload or removal.
#[derive(Debug, Error)]
pub enum ImageError {
    /// HTTP request failed (connection, timeout, etc.)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The storage API answered with a non-success status.
    #[error("Image store returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body did not carry the expected URL field.
    #[error("Unexpected image store response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An image the admin selected for upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original filename, forwarded as the multipart part filename.
    pub filename: String,
    /// MIME type of the bytes.
    pub content_type: String,
    /// The raw image bytes.
    pub bytes: Vec<u8>,
}

/// The configured image storage backend.
#[derive(Debug)]
pub enum ImageStore {
    /// Direct blob storage API.
    Blob(BlobStore),
    /// Hosted upload widget endpoint.
    Widget(WidgetStore),
}

impl ImageStore {
    /// Build the store from configuration.
    #[must_use]
    pub fn new(config: &ImageBackendConfig) -> Self {
        match config {
            ImageBackendConfig::Blob {
                base_url,
                api_key,
                api_secret,
            } => Self::Blob(BlobStore::new(base_url, api_key, api_secret.clone())),
            ImageBackendConfig::Widget {
                upload_url,
                upload_preset,
            } => Self::Widget(WidgetStore::new(upload_url, upload_preset)),
        }
    }

    /// Upload an image and return its public URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload request fails or the response carries
    /// no URL.
    pub async fn store(&self, upload: ImageUpload) -> Result<String, ImageError> {
        match self {
            Self::Blob(store) => store.upload(upload).await,
            Self::Widget(store) => store.upload(upload).await,
        }
    }

    /// Remove a previously stored image, best effort.
    ///
    /// Failures are logged and swallowed; a dangling blob is acceptable,
    /// a blocked product deletion is not. The widget backend has no
    /// removal API and this is a no-op there.
    pub async fn remove(&self, url: &str) {
        let result = match self {
            Self::Blob(store) => store.remove(url).await,
            Self::Widget(_) => {
                warn!(url, "Image backend has no removal API; leaving image in place");
                Ok(())
            }
        };

        if let Err(error) = result {
            warn!(url, %error, "Failed to remove image; continuing");
        }
    }
}
