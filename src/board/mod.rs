mod dashboard;
mod deployment;

pub use dashboard::DashboardData;

use futures::future;
use log::info;

use crate::api::{ApiClient, Fetched};
use crate::models::DeploymentSummary;
use crate::query::RunQuery;

impl ApiClient {
    /// Dashboard and deployment cycles side by side; neither waits on the
    /// other's outcome.
    pub async fn get_board_data(
        &self,
        query: &RunQuery,
        trend_days: u32,
    ) -> (DashboardData, Fetched<DeploymentSummary>) {
        info!("Collecting dashboard and deployment data");

        future::join(
            self.get_dashboard_data(query, trend_days),
            self.get_deployment_data(),
        )
        .await
    }
}
