use reqwest::Client;

use crate::config::ApiConfig;
use crate::error::{BoardError, Result};

/// HTTP access to the dashboard backend. One instance is shared by reference
/// across every concurrent call of a request cycle.
pub struct ApiClient {
    pub(super) client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pipeboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BoardError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path such as `/api/pipelines/summary`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
