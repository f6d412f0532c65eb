use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use super::labels::FlagLabel;
use super::PresentationSettings;
use crate::models::{SecuritySummary, SupplyChainFlags};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolRow {
    pub tool: String,
    pub total: u64,
    pub severities: IndexMap<String, u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SupplyChainView {
    pub sbom_generated: FlagLabel,
    pub cosign_signed: FlagLabel,
    pub cosign_verified: FlagLabel,
}

impl From<SupplyChainFlags> for SupplyChainView {
    fn from(flags: SupplyChainFlags) -> Self {
        Self {
            sbom_generated: FlagLabel::from_bool(flags.sbom_generated),
            cosign_signed: FlagLabel::from_bool(flags.cosign_signed),
            cosign_verified: FlagLabel::from_bool(flags.cosign_verified),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityView {
    pub severity_totals: IndexMap<String, u64>,
    pub tools: Vec<ToolRow>,
    pub secret_leak_detected: FlagLabel,
    pub supply_chain: SupplyChainView,
}

/// Counts laid out in `order`, whatever order the response used. Keys the
/// response omits are 0; keys outside `order` are dropped.
pub fn ordered_counts(counts: &HashMap<String, u64>, order: &[String]) -> IndexMap<String, u64> {
    order
        .iter()
        .map(|key| (key.clone(), counts.get(key).copied().unwrap_or(0)))
        .collect()
}

pub fn build_security_view(
    summary: Option<&SecuritySummary>,
    settings: &PresentationSettings,
) -> SecurityView {
    let empty = SecuritySummary::default();
    let summary = summary.unwrap_or(&empty);

    let no_counts = HashMap::new();
    let tools = settings
        .tool_order
        .iter()
        .map(|tool| ToolRow {
            tool: tool.clone(),
            total: summary.tool_totals.get(tool).copied().unwrap_or(0),
            severities: ordered_counts(
                summary.tool_severity.get(tool).unwrap_or(&no_counts),
                &settings.severity_order,
            ),
        })
        .collect();

    SecurityView {
        severity_totals: ordered_counts(&summary.severity_totals, &settings.severity_order),
        tools,
        secret_leak_detected: FlagLabel::from_bool(summary.secret_leak_detected),
        supply_chain: summary.supply_chain.into(),
    }
}
