//! Response shapes of the dashboard backend.
//!
//! Every struct defaults its missing fields so a sparse but well-formed body
//! still parses; display defaults are applied later in [`crate::views`].

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// One backend-reported workflow execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineRun {
    pub id: Option<u64>,
    pub workflow_name: Option<String>,
    pub category: Option<String>,
    /// Open vocabulary: `success`, `failure`, `cancelled`, and whatever else
    /// the CI provider reports.
    pub conclusion: Option<String>,
    pub branch: Option<String>,
    pub commit_sha: Option<String>,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
    /// Seconds
    pub duration: Option<f64>,
    pub html_url: Option<String>,
}

/// Latest conclusion per category (`ci`, `security`, `cd`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryStatus(pub HashMap<String, String>);

impl CategoryStatus {
    pub fn status(&self, category: &str) -> &str {
        self.0
            .get(category)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyChainFlags {
    pub sbom_generated: bool,
    pub cosign_signed: bool,
    pub cosign_verified: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySummary {
    pub severity_totals: HashMap<String, u64>,
    pub tool_totals: HashMap<String, u64>,
    pub tool_severity: HashMap<String, HashMap<String, u64>>,
    pub secret_leak_detected: bool,
    pub supply_chain: SupplyChainFlags,
}

/// `GET /api/pipelines/summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryResponse {
    pub total_runs: u64,
    pub status_counts: BTreeMap<String, u64>,
    pub category_status: CategoryStatus,
    pub recent_failures: Vec<PipelineRun>,
    pub security_summary: SecuritySummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunFilters {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub branch: String,
}

impl RunFilters {
    pub fn is_empty(&self) -> bool {
        self.category.is_empty() && self.branch.is_empty()
    }
}

/// `GET /api/pipelines/runs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunsResponse {
    pub count: u64,
    pub total: u64,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub total_pages: Option<u32>,
    pub filters: Option<RunFilters>,
    pub items: Vec<PipelineRun>,
}

/// One day of aggregated security findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityTrendPoint {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub total_findings: u64,
    pub severity_totals: HashMap<String, u64>,
}

/// `GET /api/pipelines/security-trends?days=N`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityTrendResponse {
    pub days: u32,
    pub points: Vec<SecurityTrendPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentSupplyChain {
    pub sbom_generated: bool,
    pub cosign_signed: bool,
    pub cosign_verified: bool,
    /// `None` when no HTTPS probe ran.
    pub https_ok: Option<bool>,
    pub image_digest: String,
    pub image_tag: String,
}

/// `GET /api/pipelines/deployment`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentSummary {
    pub has_cd_data: bool,
    pub latest_cd_run: Option<PipelineRun>,
    pub environment: Option<String>,
    pub supply_chain: DeploymentSupplyChain,
}

/// `GET /health`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: String,
}

/// `POST /api/pipelines/sync`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncResult {
    pub synced_runs: u64,
}
