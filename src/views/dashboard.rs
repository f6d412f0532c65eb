use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::board::DashboardData;
use crate::models::{PipelineRun, RunFilters, SummaryResponse};
use crate::present::labels::{format_duration, link, or_placeholder, or_unknown};
use crate::present::pagination::{build_pagination, Pagination};
use crate::present::security::{build_security_view, SecurityView};
use crate::present::trends::{build_trend_chart, TrendChart};
use crate::present::{PresentationSettings, Tone};
use crate::query::{normalize_branch, normalize_category, RunQuery};

/// Summary cards, in display order.
pub const CATEGORIES: [&str; 3] = ["ci", "security", "cd"];

pub const NO_RUNS_MESSAGE: &str = "No runs collected yet, or the backend API is not reachable.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRow {
    pub id: Option<u64>,
    pub workflow: String,
    pub category: String,
    pub conclusion: String,
    pub tone: Tone,
    pub branch: String,
    pub commit: String,
    pub duration: String,
    pub html_url: Option<String>,
}

impl RunRow {
    pub fn from_run(run: &PipelineRun) -> Self {
        Self {
            id: run.id,
            workflow: or_unknown(run.workflow_name.as_deref()),
            category: or_placeholder(run.category.as_deref()),
            conclusion: or_unknown(run.conclusion.as_deref()),
            tone: Tone::for_conclusion(run.conclusion.as_deref()),
            branch: or_placeholder(run.branch.as_deref()),
            commit: or_placeholder(run.commit_sha.as_deref()),
            duration: format_duration(run.duration),
            html_url: link(run.html_url.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCard {
    pub category: String,
    pub status: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub available: bool,
    pub total_runs: u64,
    pub categories: Vec<CategoryCard>,
    pub status_counts: BTreeMap<String, u64>,
    pub recent_failures: Vec<RunRow>,
}

impl SummaryView {
    pub fn from_response(summary: Option<&SummaryResponse>) -> Self {
        let categories = CATEGORIES
            .iter()
            .map(|category| {
                let status = summary.map_or("unknown", |s| s.category_status.status(category));
                CategoryCard {
                    category: (*category).to_string(),
                    status: status.to_string(),
                    tone: Tone::for_conclusion(Some(status)),
                }
            })
            .collect();

        Self {
            available: summary.is_some(),
            total_runs: summary.map_or(0, |s| s.total_runs),
            categories,
            status_counts: summary
                .map(|s| s.status_counts.clone())
                .unwrap_or_default(),
            recent_failures: summary
                .map(|s| s.recent_failures.iter().map(RunRow::from_run).collect())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActiveFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl From<&RunFilters> for ActiveFilters {
    fn from(filters: &RunFilters) -> Self {
        Self {
            category: normalize_category(Some(&filters.category)),
            branch: normalize_branch(Some(&filters.branch)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub generated_at: DateTime<Utc>,
    pub summary: SummaryView,
    pub runs: Vec<RunRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs_empty_message: Option<String>,
    pub total_runs: u64,
    pub active_filters: ActiveFilters,
    pub pagination: Pagination,
    pub trends: TrendChart,
    pub security: SecurityView,
}

impl DashboardView {
    pub fn build(data: &DashboardData, query: &RunQuery, settings: &PresentationSettings) -> Self {
        let summary = data.summary.as_ref().into_option();
        let runs: Vec<_> = data.runs.iter().map(RunRow::from_run).collect();

        Self {
            generated_at: Utc::now(),
            summary: SummaryView::from_response(summary),
            runs_empty_message: runs.is_empty().then(|| NO_RUNS_MESSAGE.to_string()),
            runs,
            total_runs: data.total_runs,
            active_filters: ActiveFilters::from(&data.active_filters),
            pagination: build_pagination(query, data.runs_page, data.total_pages),
            trends: build_trend_chart(&data.trends, settings),
            security: build_security_view(summary.map(|s| &s.security_summary), settings),
        }
    }
}
