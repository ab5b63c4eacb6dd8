//! Hosted upload widget backend.
//!
//! Unsigned uploads against a hosted endpoint identified by an upload
//! preset. No credentials travel with the request; the preset scopes what
//! the endpoint accepts. There is no removal API.

use serde::Deserialize;
use tracing::{debug, instrument};

use super::{ImageError, ImageUpload};

const ERROR_BODY_LIMIT: usize = 500;

/// Client for a hosted unsigned-upload endpoint.
#[derive(Debug)]
pub struct WidgetStore {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
}

#[derive(Deserialize)]
struct WidgetResponse {
    secure_url: String,
}

impl WidgetStore {
    pub(crate) fn new(upload_url: &str, upload_preset: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url: upload_url.to_owned(),
            upload_preset: upload_preset.to_owned(),
        }
    }

    /// Upload image bytes with the configured preset; the endpoint answers
    /// with the hosted URL.
    #[instrument(skip(self, upload), fields(filename = %upload.filename, size = upload.bytes.len()))]
    pub(crate) async fn upload(&self, upload: ImageUpload) -> Result<String, ImageError> {
        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.filename)
            .mime_str(&upload.content_type)?;
        let form = reqwest::multipart::Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ImageError::Api {
                status: status.as_u16(),
                message: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let parsed: WidgetResponse = serde_json::from_str(&body)?;

        debug!(url = %parsed.secure_url, "Uploaded image");
        Ok(parsed.secure_url)
    }
}
