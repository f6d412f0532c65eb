use log::info;

use crate::api::{ApiClient, Fetched};
use crate::models::DeploymentSummary;

pub const DEPLOYMENT_PATH: &str = "/api/pipelines/deployment";

impl ApiClient {
    pub async fn get_deployment_data(&self) -> Fetched<DeploymentSummary> {
        let deployment = self.fetch::<DeploymentSummary>(DEPLOYMENT_PATH).await;

        if let Fetched::Value(summary) = &deployment {
            info!(
                "Deployment data received (cd data: {}, environment: {})",
                summary.has_cd_data,
                summary.environment.as_deref().unwrap_or("unknown")
            );
        }

        deployment
    }
}
