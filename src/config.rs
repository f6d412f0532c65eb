use log::warn;
use url::Url;

/// Origin used when neither the command line nor the environment names one.
pub const DEFAULT_API_BASE: &str = "http://api:5000";

/// Environment variables consulted for the backend origin, in priority order.
pub const API_BASE_ENV_VARS: [&str; 2] = ["API_BASE", "NEXT_PUBLIC_API_BASE"];

/// Connection settings for the dashboard backend.
///
/// Resolved once at startup and handed to [`crate::api::ApiClient::new`];
/// nothing downstream reads the environment on its own. An origin that does
/// not parse is kept as given; requests against it fail and degrade like any
/// other unreachable backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        if let Err(e) = Url::parse(base_url) {
            warn!("API base URL '{base_url}' is not a valid URL ({e}); backend data will be unavailable");
        }

        let base_url = base_url.strip_suffix('/').unwrap_or(base_url).to_string();

        Self { base_url }
    }

    /// Resolve the origin from an explicit value, then the process environment.
    pub fn resolve(explicit: Option<&str>) -> Self {
        Self::resolve_with(explicit, |name| std::env::var(name).ok())
    }

    pub fn resolve_with<F>(explicit: Option<&str>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = explicit.map(str::trim).filter(|b| !b.is_empty()) {
            return Self::new(base);
        }

        let from_env = API_BASE_ENV_VARS
            .iter()
            .filter_map(|&name| lookup(name))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());

        match from_env {
            Some(base) => Self::new(&base),
            None => Self::new(DEFAULT_API_BASE),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
