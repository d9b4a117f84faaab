//! Multipart upload client for the storage API.
//!
//! Sends one file per request as `multipart/form-data` to
//! `POST {base-url}/v1/files` and decodes the JSON reply.  There are no
//! retries, timeouts, or cancellation: each call is a single attempt.
//!
//! Uses `reqwest`, which runs on `fetch` under `wasm32-unknown-unknown`
//! and on hyper everywhere else.

use bucketdrop_core::types::ErrorBody;
use bucketdrop_core::{SelectedFile, UploadError, UploadResponse};
use reqwest::multipart::{Form, Part};

use crate::config::ClientConfig;

/// Multipart field that carries the file.
pub const FILE_FIELD: &str = "file";

/// Client for the storage API's upload endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct UploadClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl PartialEq for UploadClient {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

impl UploadClient {
    /// Create a client for the given configuration.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// The configuration this client sends to.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Upload `file` and return the server's response.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::Server`] if the server answers with a
    /// non-success status or a body with `success: false`.
    /// Returns [`UploadError::Transport`] if the request cannot be sent or
    /// the reply is not the expected JSON.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; reqwest's fetch future is !Send
    pub async fn upload(&self, file: &SelectedFile) -> Result<UploadResponse, UploadError> {
        let url = self.config.upload_url();
        tracing::info!(
            file = file.name(),
            bytes = file.contents.len(),
            %url,
            "uploading file"
        );

        let form = build_form(file)?;
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let outcome = interpret_response(status, &body);
        match &outcome {
            Ok(resp) => tracing::info!(file = %resp.file_name, "upload stored"),
            Err(e) => tracing::warn!(error = %e, "upload failed"),
        }
        outcome
    }
}

/// Build the single-part form carrying `file`.
fn build_form(file: &SelectedFile) -> Result<Form, UploadError> {
    let mut part = Part::bytes(file.contents.clone()).file_name(file.name().to_owned());
    if !file.mime_type().is_empty() {
        part = part
            .mime_str(file.mime_type())
            .map_err(|e| UploadError::Transport(format!("invalid MIME type: {e}")))?;
    }
    Ok(Form::new().part(FILE_FIELD, part))
}

/// Turn an HTTP status and body into the upload outcome.
///
/// - Non-2xx: [`UploadError::Server`] with the body's `message`, if any.
/// - 2xx that is not an [`UploadResponse`]: [`UploadError::Transport`].
/// - 2xx with `success: false`: [`UploadError::Server`].
///
/// # Errors
///
/// See above.
pub fn interpret_response(status: u16, body: &str) -> Result<UploadResponse, UploadError> {
    if !(200..300).contains(&status) {
        return Err(UploadError::Server {
            status,
            message: ErrorBody::message_from(body),
        });
    }

    let resp: UploadResponse = serde_json::from_str(body)
        .map_err(|e| UploadError::Transport(format!("unexpected response body: {e}")))?;

    if resp.success {
        Ok(resp)
    } else {
        Err(UploadError::Server {
            status,
            message: Some(resp.message).filter(|m| !m.trim().is_empty()),
        })
    }
}
