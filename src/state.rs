//! Application state management

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::fetch::TemplateFetcher;

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Shared application state
///
/// Holds the configuration and the template fetcher with its pooled
/// HTTP client. Everything else is request-local.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    fetcher: TemplateFetcher,
}

impl AppState {
    /// Create a new application state
    ///
    /// Builds the shared outbound HTTP client with the configured
    /// download timeout.
    pub fn new(config: Config) -> Result<Self, StateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch.timeout_secs))
            .build()?;
        let fetcher = TemplateFetcher::new(client, config.fetch.max_template_bytes);

        Ok(Self {
            inner: Arc::new(AppStateInner { config, fetcher }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the template fetcher
    pub fn fetcher(&self) -> &TemplateFetcher {
        &self.inner.fetcher
    }
}
