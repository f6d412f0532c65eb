use serde::Serialize;
use url::form_urlencoded;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

pub const DEFAULT_TREND_DAYS: u32 = 14;
pub const MAX_TREND_DAYS: u32 = 90;

/// Navigation state as it arrives from the user, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRunQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub branch: Option<String>,
}

/// Canonical run-list query. Every constructor normalizes, so a value of
/// this type always satisfies `page >= 1` and `1 <= limit <= 100`, and
/// carries no empty filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl Default for RunQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            category: None,
            branch: None,
        }
    }
}

impl RunQuery {
    pub fn normalize(raw: &RawRunQuery) -> Self {
        Self {
            page: normalize_page(raw.page.as_deref()),
            limit: normalize_limit(raw.limit.as_deref()),
            category: normalize_category(raw.category.as_deref()),
            branch: normalize_branch(raw.branch.as_deref()),
        }
    }

    /// Same query pointed at another page; the filters are kept.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Backend path for the paginated run list, e.g.
    /// `/api/pipelines/runs?limit=10&page=1&category=ci`.
    pub fn runs_path(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("limit", &self.limit.to_string());
        query.append_pair("page", &self.page.to_string());
        self.append_filters(&mut query);
        format!("/api/pipelines/runs?{}", query.finish())
    }

    /// Dashboard-route link carrying the navigation state (`page`,
    /// `category`, `branch`).
    pub fn dashboard_href(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("page", &self.page.to_string());
        self.append_filters(&mut query);
        format!("?{}", query.finish())
    }

    fn append_filters(&self, query: &mut form_urlencoded::Serializer<'_, String>) {
        if let Some(category) = &self.category {
            query.append_pair("category", category);
        }
        if let Some(branch) = &self.branch {
            query.append_pair("branch", branch);
        }
    }
}

impl From<&RunQuery> for RawRunQuery {
    fn from(query: &RunQuery) -> Self {
        Self {
            page: Some(query.page.to_string()),
            limit: Some(query.limit.to_string()),
            category: query.category.clone(),
            branch: query.branch.clone(),
        }
    }
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Anything that is not a finite positive number becomes page 1; fractional
/// pages are floored.
pub fn normalize_page(raw: Option<&str>) -> u32 {
    match parse_number(raw) {
        Some(page) if page > 0.0 => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let page = page.floor() as u32;
            page.max(1)
        }
        _ => DEFAULT_PAGE,
    }
}

pub fn normalize_limit(raw: Option<&str>) -> u32 {
    let Some(limit) = parse_number(raw) else {
        return DEFAULT_LIMIT;
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let limit = limit.floor().clamp(1.0, f64::from(MAX_LIMIT)) as u32;
    limit
}

pub fn normalize_category(raw: Option<&str>) -> Option<String> {
    raw.map(|c| c.trim().to_lowercase()).filter(|c| !c.is_empty())
}

pub fn normalize_branch(raw: Option<&str>) -> Option<String> {
    raw.map(|b| b.trim().to_string()).filter(|b| !b.is_empty())
}

pub fn normalize_trend_days(days: u32) -> u32 {
    days.clamp(1, MAX_TREND_DAYS)
}
