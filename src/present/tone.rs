use serde::Serialize;

/// Colour class attached to a status pill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    #[serde(rename = "tone-success")]
    Success,
    #[serde(rename = "tone-failure")]
    Failure,
    #[serde(rename = "tone-warn")]
    Warn,
    #[serde(rename = "tone-muted")]
    Muted,
}

impl Tone {
    /// Closed lookup; every other conclusion, absent included, is muted.
    pub fn for_conclusion(conclusion: Option<&str>) -> Self {
        match conclusion {
            Some("success") => Self::Success,
            Some("failure") => Self::Failure,
            Some("cancelled") => Self::Warn,
            _ => Self::Muted,
        }
    }
}
