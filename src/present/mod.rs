//! Pure mappings from backend fields to display tokens.

pub mod labels;
pub mod pagination;
pub mod security;
pub mod tone;
pub mod trends;

pub use labels::FlagLabel;
pub use tone::Tone;

pub const DEFAULT_MIN_BAR_HEIGHT: u32 = 6;

pub const SEVERITY_ORDER: [&str; 5] = ["critical", "high", "medium", "low", "unknown"];
pub const TOOL_ORDER: [&str; 5] = ["trivy", "bandit", "semgrep", "pip_audit", "gitleaks"];

/// Display constants that are a product decision rather than a structural
/// rule. Keys missing from a response still render, as 0, in these orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationSettings {
    /// Smallest bar height, in percent, so empty days stay visible.
    pub min_bar_height: u32,
    pub severity_order: Vec<String>,
    pub tool_order: Vec<String>,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            min_bar_height: DEFAULT_MIN_BAR_HEIGHT,
            severity_order: SEVERITY_ORDER.iter().map(ToString::to_string).collect(),
            tool_order: TOOL_ORDER.iter().map(ToString::to_string).collect(),
        }
    }
}

impl PresentationSettings {
    pub fn with_min_bar_height(mut self, min_bar_height: u32) -> Self {
        self.min_bar_height = min_bar_height.min(100);
        self
    }
}
