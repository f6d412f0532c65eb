use log::info;
use serde::Serialize;

use crate::api::{ApiClient, Fetched};
use crate::models::{
    PipelineRun, RunFilters, RunsResponse, SecurityTrendPoint, SecurityTrendResponse,
    SummaryResponse,
};
use crate::present::pagination::clamp_page;
use crate::query::{normalize_trend_days, RunQuery};

pub const SUMMARY_PATH: &str = "/api/pipelines/summary";

/// Merged result of one dashboard cycle. Each part carries its own default
/// when its fetch failed, so one outage never blanks the others.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub summary: Fetched<SummaryResponse>,
    pub runs: Vec<PipelineRun>,
    pub runs_page: u32,
    pub total_pages: u32,
    pub total_runs: u64,
    pub active_filters: RunFilters,
    pub trends: Vec<SecurityTrendPoint>,
}

impl DashboardData {
    pub fn merge(
        query: &RunQuery,
        summary: Fetched<SummaryResponse>,
        runs: Fetched<RunsResponse>,
        trends: Fetched<SecurityTrendResponse>,
    ) -> Self {
        let requested_filters = RunFilters {
            category: query.category.clone().unwrap_or_default(),
            branch: query.branch.clone().unwrap_or_default(),
        };

        let (items, page, total_pages, total_runs, filters) = match runs {
            Fetched::Value(runs) => {
                // A page never exceeds the requested limit.
                let mut items = runs.items;
                items.truncate(usize::try_from(query.limit).unwrap_or(usize::MAX));
                (
                    items,
                    runs.page.unwrap_or(query.page),
                    runs.total_pages.unwrap_or(1).max(1),
                    runs.total,
                    runs.filters.filter(|f| !f.is_empty()),
                )
            }
            Fetched::Unavailable => (Vec::new(), query.page, 1, 0, None),
        };

        Self {
            summary,
            runs: items,
            runs_page: clamp_page(page, total_pages),
            total_pages,
            total_runs,
            active_filters: filters.unwrap_or(requested_filters),
            trends: trends.map(|t| t.points).into_option().unwrap_or_default(),
        }
    }
}

pub fn trends_path(days: u32) -> String {
    format!("/api/pipelines/security-trends?days={}", normalize_trend_days(days))
}

impl ApiClient {
    /// Summary, one page of runs and the trend series, fetched concurrently.
    /// Waits for all three; any that fail fall back to empty defaults.
    pub async fn get_dashboard_data(&self, query: &RunQuery, trend_days: u32) -> DashboardData {
        let runs_path = query.runs_path();
        let trends_path = trends_path(trend_days);

        let (summary, runs, trends) = tokio::join!(
            self.fetch::<SummaryResponse>(SUMMARY_PATH),
            self.fetch::<RunsResponse>(&runs_path),
            self.fetch::<SecurityTrendResponse>(&trends_path),
        );

        let data = DashboardData::merge(query, summary, runs, trends);

        info!(
            "Dashboard data: summary {}, {} runs on page {}/{}, {} trend points",
            if data.summary.is_available() {
                "available"
            } else {
                "unavailable"
            },
            data.runs.len(),
            data.runs_page,
            data.total_pages,
            data.trends.len()
        );

        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use mockito::{Matcher, Server, ServerGuard};

    const RUNS_BODY: &str = r#"{
        "count": 2,
        "total": 12,
        "page": 2,
        "limit": 2,
        "total_pages": 6,
        "filters": {"category": "ci", "branch": ""},
        "items": [
            {"id": 101, "workflow_name": "CI Pipeline", "category": "ci", "conclusion": "success", "branch": "main", "duration": 120},
            {"id": 104, "workflow_name": "CI Pipeline", "category": "ci", "conclusion": "failure", "branch": "main", "duration": null}
        ]
    }"#;

    const SUMMARY_BODY: &str = r#"{
        "total_runs": 12,
        "status_counts": {"success": 9, "failure": 3},
        "category_status": {"ci": "success", "security": "failure", "cd": "success"},
        "recent_failures": [],
        "security_summary": {"severity_totals": {"high": 2}}
    }"#;

    const TRENDS_BODY: &str = r#"{
        "days": 14,
        "points": [
            {"date": "2026-02-14", "total_findings": 0, "severity_totals": {}},
            {"date": "2026-02-15", "total_findings": 3, "severity_totals": {"high": 3}}
        ]
    }"#;

    fn client_for(server: &ServerGuard) -> ApiClient {
        ApiClient::new(&ApiConfig::new(&server.url())).unwrap()
    }

    fn ci_query() -> RunQuery {
        RunQuery {
            page: 2,
            limit: 2,
            category: Some("ci".to_string()),
            branch: None,
        }
    }

    async fn mock_json(
        server: &mut ServerGuard,
        path: &str,
        query: &str,
        status: usize,
        body: &str,
    ) -> mockito::Mock {
        let mut mock = server.mock("GET", path);
        if !query.is_empty() {
            mock = mock.match_query(Matcher::Exact(query.to_string()));
        }

        mock.with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_all_parts_merged() {
        let mut server = Server::new_async().await;
        let summary = mock_json(&mut server, SUMMARY_PATH, "", 200, SUMMARY_BODY).await;
        let runs = mock_json(
            &mut server,
            "/api/pipelines/runs",
            "limit=2&page=2&category=ci",
            200,
            RUNS_BODY,
        )
        .await;
        let trends = mock_json(
            &mut server,
            "/api/pipelines/security-trends",
            "days=14",
            200,
            TRENDS_BODY,
        )
        .await;

        let data = client_for(&server).get_dashboard_data(&ci_query(), 14).await;

        summary.assert_async().await;
        runs.assert_async().await;
        trends.assert_async().await;

        assert_eq!(data.summary.as_ref().into_option().unwrap().total_runs, 12);
        assert_eq!(data.runs.len(), 2);
        assert_eq!(data.runs_page, 2);
        assert_eq!(data.total_pages, 6);
        assert_eq!(data.total_runs, 12);
        assert_eq!(data.active_filters.category, "ci");
        assert_eq!(data.trends.len(), 2);
    }

    #[tokio::test]
    async fn test_summary_failure_does_not_affect_runs() {
        let mut server = Server::new_async().await;
        let _summary = mock_json(&mut server, SUMMARY_PATH, "", 500, "{}").await;
        let _runs = mock_json(
            &mut server,
            "/api/pipelines/runs",
            "limit=2&page=2&category=ci",
            200,
            RUNS_BODY,
        )
        .await;
        let _trends = mock_json(
            &mut server,
            "/api/pipelines/security-trends",
            "days=14",
            200,
            "not json",
        )
        .await;

        let data = client_for(&server).get_dashboard_data(&ci_query(), 14).await;

        assert_eq!(data.summary, Fetched::Unavailable);
        assert_eq!(data.runs.len(), 2);
        assert_eq!(data.total_runs, 12);
        assert!(data.trends.is_empty());

        let json = serde_json::to_value(&data).unwrap();
        assert!(json["summary"].is_null());
    }

    #[tokio::test]
    async fn test_unreachable_backend_yields_defaults() {
        let config = ApiConfig::new("http://127.0.0.1:1");
        let client = ApiClient::new(&config).unwrap();

        let data = client.get_dashboard_data(&RunQuery::default(), 14).await;

        assert_eq!(data.summary, Fetched::Unavailable);
        assert!(data.runs.is_empty());
        assert_eq!(data.runs_page, 1);
        assert_eq!(data.total_pages, 1);
        assert_eq!(data.total_runs, 0);
        assert!(data.active_filters.is_empty());
        assert!(data.trends.is_empty());
    }

    #[tokio::test]
    async fn test_empty_filters_are_not_sent() {
        let mut server = Server::new_async().await;
        let runs = mock_json(
            &mut server,
            "/api/pipelines/runs",
            "limit=10&page=1",
            200,
            r#"{"items": [], "total": 0, "page": 1, "total_pages": 1}"#,
        )
        .await;

        let data = client_for(&server)
            .get_dashboard_data(&RunQuery::default(), 14)
            .await;

        runs.assert_async().await;
        assert!(data.runs.is_empty());
    }

    #[test]
    fn test_merge_falls_back_to_requested_page_and_filters() {
        let runs = RunsResponse {
            total: 5,
            items: vec![PipelineRun::default()],
            ..RunsResponse::default()
        };

        let data = DashboardData::merge(
            &ci_query(),
            Fetched::Unavailable,
            Fetched::Value(runs),
            Fetched::Unavailable,
        );

        // No total_pages echoed, so the requested page 2 is clamped to 1.
        assert_eq!(data.total_pages, 1);
        assert_eq!(data.runs_page, 1);
        assert_eq!(data.active_filters.category, "ci");
        assert_eq!(data.runs.len(), 1);
    }

    #[test]
    fn test_merge_caps_items_at_requested_limit() {
        let runs = RunsResponse {
            total: 25,
            page: Some(1),
            total_pages: Some(3),
            items: vec![PipelineRun::default(); 25],
            ..RunsResponse::default()
        };

        let data = DashboardData::merge(
            &RunQuery::default(),
            Fetched::Unavailable,
            Fetched::Value(runs),
            Fetched::Unavailable,
        );

        assert_eq!(data.runs.len(), 10);
        assert_eq!(data.total_runs, 25);
    }

    #[tokio::test]
    async fn test_invalid_base_url_yields_defaults() {
        let config = ApiConfig::resolve_with(None, |name| {
            (name == "API_BASE").then(|| "not a url".to_string())
        });
        let client = ApiClient::new(&config).unwrap();

        let data = client.get_dashboard_data(&RunQuery::default(), 14).await;

        assert_eq!(data.summary, Fetched::Unavailable);
        assert!(data.runs.is_empty());
        assert_eq!(data.runs_page, 1);
        assert_eq!(data.total_pages, 1);
        assert_eq!(data.total_runs, 0);
        assert!(data.trends.is_empty());
    }

    #[test]
    fn test_merge_clamps_zero_total_pages() {
        let runs = RunsResponse {
            page: Some(0),
            total_pages: Some(0),
            ..RunsResponse::default()
        };

        let data = DashboardData::merge(
            &RunQuery::default(),
            Fetched::Unavailable,
            Fetched::Value(runs),
            Fetched::Unavailable,
        );

        assert_eq!(data.total_pages, 1);
        assert_eq!(data.runs_page, 1);
    }

    #[test]
    fn test_trends_path_is_clamped() {
        assert_eq!(trends_path(14), "/api/pipelines/security-trends?days=14");
        assert_eq!(trends_path(0), "/api/pipelines/security-trends?days=1");
        assert_eq!(trends_path(400), "/api/pipelines/security-trends?days=90");
    }
}
