//! Template download
//!
//! One outbound GET per request. Any transport error, non-success
//! status, or oversized response is reported back to the caller as a
//! download failure; nothing here retries.

use crate::error::{AppError, Result};

/// Downloads blank PDF templates over HTTP
#[derive(Clone)]
pub struct TemplateFetcher {
    client: reqwest::Client,
    max_bytes: usize,
}

impl TemplateFetcher {
    /// Create a fetcher around a shared client
    ///
    /// The download timeout is configured on the client itself.
    pub fn new(client: reqwest::Client, max_bytes: usize) -> Self {
        Self { client, max_bytes }
    }

    /// Fetch the template bytes at `url`
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Downloading template from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Download(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Download(format!("server returned {}", status)));
        }

        // Reject oversized templates before buffering when the server
        // announces a length, and again after in case it lied.
        if let Some(len) = response.content_length() {
            if len as usize > self.max_bytes {
                return Err(AppError::Download(format!(
                    "template is {} bytes, limit is {}",
                    len, self.max_bytes
                )));
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Download(e.to_string()))?;

        if body.len() > self.max_bytes {
            return Err(AppError::Download(format!(
                "template is {} bytes, limit is {}",
                body.len(),
                self.max_bytes
            )));
        }

        tracing::debug!("Downloaded template ({} bytes)", body.len());
        Ok(body.to_vec())
    }
}
