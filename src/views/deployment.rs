use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{DeploymentSummary, PipelineRun};
use crate::present::labels::{format_duration, link, or_placeholder, or_unknown, UNKNOWN};
use crate::present::security::SupplyChainView;
use crate::present::{FlagLabel, Tone};

pub const NO_CD_DATA_MESSAGE: &str = "No CD execution data collected yet.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestRunView {
    pub workflow: String,
    pub conclusion: String,
    pub tone: Tone,
    pub branch: String,
    pub commit: String,
    pub duration: String,
    pub html_url: Option<String>,
}

impl LatestRunView {
    pub fn from_run(run: &PipelineRun) -> Self {
        Self {
            workflow: or_unknown(run.workflow_name.as_deref()),
            conclusion: or_unknown(run.conclusion.as_deref()),
            tone: Tone::for_conclusion(run.conclusion.as_deref()),
            branch: or_placeholder(run.branch.as_deref()),
            commit: or_placeholder(run.commit_sha.as_deref()),
            duration: format_duration(run.duration),
            html_url: link(run.html_url.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentView {
    pub generated_at: DateTime<Utc>,
    pub available: bool,
    pub environment: String,
    pub latest_status: String,
    pub latest_tone: Tone,
    pub image_tag: String,
    pub image_digest: String,
    pub https_check: FlagLabel,
    pub supply_chain: SupplyChainView,
    /// `"available"` or `"not available"`
    pub cd_data: String,
    pub latest_run: Option<LatestRunView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

impl DeploymentView {
    pub fn from_summary(deployment: Option<&DeploymentSummary>) -> Self {
        let latest = deployment.and_then(|d| d.latest_cd_run.as_ref());
        let supply_chain = deployment.map(|d| &d.supply_chain);
        let latest_status = latest
            .and_then(|run| run.conclusion.as_deref())
            .filter(|c| !c.is_empty())
            .unwrap_or(UNKNOWN);

        Self {
            generated_at: Utc::now(),
            available: deployment.is_some(),
            environment: or_unknown(deployment.and_then(|d| d.environment.as_deref())),
            latest_status: latest_status.to_string(),
            latest_tone: Tone::for_conclusion(Some(latest_status)),
            image_tag: or_placeholder(supply_chain.map(|s| s.image_tag.as_str())),
            image_digest: or_placeholder(supply_chain.map(|s| s.image_digest.as_str())),
            https_check: FlagLabel::from_optional(supply_chain.and_then(|s| s.https_ok)),
            supply_chain: SupplyChainView {
                sbom_generated: FlagLabel::from_bool(supply_chain.is_some_and(|s| s.sbom_generated)),
                cosign_signed: FlagLabel::from_bool(supply_chain.is_some_and(|s| s.cosign_signed)),
                cosign_verified: FlagLabel::from_bool(
                    supply_chain.is_some_and(|s| s.cosign_verified),
                ),
            },
            cd_data: if deployment.is_some_and(|d| d.has_cd_data) {
                "available".to_string()
            } else {
                "not available".to_string()
            },
            latest_run: latest.map(LatestRunView::from_run),
            empty_message: latest.is_none().then(|| NO_CD_DATA_MESSAGE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeploymentSupplyChain;

    #[test]
    fn test_unavailable_deployment_defaults() {
        let view = DeploymentView::from_summary(None);

        assert!(!view.available);
        assert_eq!(view.environment, "unknown");
        assert_eq!(view.latest_status, "unknown");
        assert_eq!(view.latest_tone, Tone::Muted);
        assert_eq!(view.image_tag, "-");
        assert_eq!(view.image_digest, "-");
        assert_eq!(view.https_check, FlagLabel::Unknown);
        assert_eq!(view.supply_chain.sbom_generated, FlagLabel::No);
        assert_eq!(view.cd_data, "not available");
        assert!(view.latest_run.is_none());
        assert_eq!(view.empty_message.as_deref(), Some(NO_CD_DATA_MESSAGE));
    }

    #[test]
    fn test_blank_backend_deployment() {
        let view = DeploymentView::from_summary(Some(&DeploymentSummary {
            environment: Some("unknown".to_string()),
            ..DeploymentSummary::default()
        }));

        assert!(view.available);
        assert_eq!(view.cd_data, "not available");
        assert_eq!(view.https_check, FlagLabel::Unknown);
    }

    #[test]
    fn test_full_deployment() {
        let summary = DeploymentSummary {
            has_cd_data: true,
            latest_cd_run: Some(PipelineRun {
                id: Some(103),
                workflow_name: Some("CD Build, Push & Deploy".to_string()),
                conclusion: Some("success".to_string()),
                branch: Some("main".to_string()),
                commit_sha: Some("xyz999".to_string()),
                duration: Some(180.0),
                html_url: Some("https://github.com/example/repo/actions/runs/103".to_string()),
                ..PipelineRun::default()
            }),
            environment: Some("prod".to_string()),
            supply_chain: DeploymentSupplyChain {
                sbom_generated: true,
                cosign_signed: true,
                cosign_verified: true,
                https_ok: Some(false),
                image_digest: "sha256:abc123".to_string(),
                image_tag: "v1.2.3".to_string(),
            },
        };

        let view = DeploymentView::from_summary(Some(&summary));

        assert_eq!(view.environment, "prod");
        assert_eq!(view.latest_status, "success");
        assert_eq!(view.latest_tone, Tone::Success);
        assert_eq!(view.image_tag, "v1.2.3");
        assert_eq!(view.image_digest, "sha256:abc123");
        assert_eq!(view.https_check, FlagLabel::No);
        assert_eq!(view.supply_chain.cosign_verified, FlagLabel::Yes);
        assert_eq!(view.cd_data, "available");
        assert!(view.empty_message.is_none());

        let latest = view.latest_run.unwrap();
        assert_eq!(latest.duration, "180s");
        assert_eq!(latest.commit, "xyz999");
    }

    #[test]
    fn test_latest_run_with_odd_conclusion() {
        let summary = DeploymentSummary {
            has_cd_data: true,
            latest_cd_run: Some(PipelineRun {
                conclusion: Some("action_required".to_string()),
                ..PipelineRun::default()
            }),
            ..DeploymentSummary::default()
        };

        let view = DeploymentView::from_summary(Some(&summary));

        assert_eq!(view.latest_status, "action_required");
        assert_eq!(view.latest_tone, Tone::Muted);
        assert_eq!(view.latest_run.unwrap().branch, "-");
    }
}
