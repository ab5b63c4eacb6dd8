//! Direct blob storage backend.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{ImageError, ImageUpload};

/// How much response body to keep in error messages.
const ERROR_BODY_LIMIT: usize = 500;

/// Client for a blob storage API with upload and delete.
pub struct BlobStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: SecretString,
}

impl std::fmt::Debug for BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobStore")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

impl BlobStore {
    pub(crate) fn new(base_url: &str, api_key: &str, api_secret: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            api_secret,
        }
    }

    fn authorization(&self) -> String {
        let pair = format!("{}:{}", self.api_key, self.api_secret.expose_secret());
        format!("Basic {}", BASE64.encode(pair))
    }

    /// Upload image bytes as multipart form data; the API answers with the
    /// public URL of the stored blob.
    #[instrument(skip(self, upload), fields(filename = %upload.filename, size = upload.bytes.len()))]
    pub(crate) async fn upload(&self, upload: ImageUpload) -> Result<String, ImageError> {
        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.filename)
            .mime_str(&upload.content_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.authorization())
            .multipart(form)
            .send()
            .await?;

        let body = check_status(response).await?;
        let parsed: UploadResponse = serde_json::from_str(&body)?;

        debug!(url = %parsed.url, "Uploaded image");
        Ok(parsed.url)
    }

    /// Delete a stored blob by its public URL.
    #[instrument(skip(self))]
    pub(crate) async fn remove(&self, url: &str) -> Result<(), ImageError> {
        let response = self
            .client
            .delete(format!("{}/images", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.authorization())
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await?;

        check_status(response).await?;

        debug!(url, "Removed image");
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<String, ImageError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ImageError::Api {
            status: status.as_u16(),
            message: body.chars().take(ERROR_BODY_LIMIT).collect(),
        });
    }

    Ok(body)
}
