use log::info;

use super::client::ApiClient;
use crate::auth::SyncToken;
use crate::error::{BoardError, Result};
use crate::models::{HealthStatus, SyncResult};

pub const SYNC_TOKEN_HEADER: &str = "X-Sync-Token";

pub const DEFAULT_SYNC_PER_PAGE: u32 = 30;
const MAX_SYNC_PER_PAGE: u32 = 100;

pub fn clamp_per_page(per_page: u32) -> u32 {
    per_page.clamp(1, MAX_SYNC_PER_PAGE)
}

impl ApiClient {
    /// Backend liveness. Unlike the dashboard reads, failures are reported.
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.client.get(self.url("/health")).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BoardError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<HealthStatus>().await?)
    }

    /// Ask the backend to pull the latest workflow runs from its CI provider.
    pub async fn trigger_sync(&self, token: &SyncToken, per_page: u32) -> Result<SyncResult> {
        if token.is_empty() {
            return Err(BoardError::Config(
                "A sync token is required to trigger a backend sync".to_string(),
            ));
        }

        let per_page = clamp_per_page(per_page);
        info!("Triggering backend sync of up to {per_page} runs");

        let response = self
            .client
            .post(self.url("/api/pipelines/sync"))
            .query(&[("per_page", per_page)])
            .header(SYNC_TOKEN_HEADER, token.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BoardError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let result = response.json::<SyncResult>().await?;
        info!("Backend synced {} runs", result.synced_runs);

        Ok(result)
    }
}
