use serde::Serialize;

pub const PLACEHOLDER: &str = "-";
pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagLabel {
    Yes,
    No,
    Unknown,
}

impl FlagLabel {
    /// Tri-state, for fields the backend may leave unset (e.g. the HTTPS probe).
    pub fn from_optional(value: Option<bool>) -> Self {
        value.map_or(Self::Unknown, Self::from_bool)
    }

    /// Plain booleans such as SBOM and signing flags have no unknown state.
    pub fn from_bool(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// `None` renders as a dash; seconds render as `"{n}s"`.
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s.is_finite() && s.fract() == 0.0 => format!("{s:.0}s"),
        Some(s) if s.is_finite() => format!("{s}s"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Text or a dash when the backend sent nothing useful.
pub fn or_placeholder(value: Option<&str>) -> String {
    or_default(value, PLACEHOLDER)
}

pub fn or_unknown(value: Option<&str>) -> String {
    or_default(value, UNKNOWN)
}

fn or_default(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Links only exist when there is somewhere to go.
pub fn link(url: Option<&str>) -> Option<String> {
    url.map(str::trim)
        .filter(|u| !u.is_empty())
        .map(ToString::to_string)
}
