use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use super::security::ordered_counts;
use super::PresentationSettings;
use crate::models::SecurityTrendPoint;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendBar {
    pub date: String,
    /// `MM-DD`, or the raw date when it does not parse.
    pub label: String,
    pub total_findings: u64,
    pub height_percent: u32,
    pub severities: IndexMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendChart {
    pub scale: u64,
    pub bars: Vec<TrendBar>,
}

/// Largest daily total, never below 1.
pub fn trend_scale(points: &[SecurityTrendPoint]) -> u64 {
    points
        .iter()
        .map(|p| p.total_findings)
        .max()
        .unwrap_or(0)
        .max(1)
}

pub fn bar_height(total_findings: u64, scale: u64, min_height: u32) -> u32 {
    #[allow(clippy::cast_precision_loss)]
    let fraction = total_findings as f64 / scale.max(1) as f64;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = (fraction * 100.0).round() as u32;

    percent.max(min_height)
}

fn short_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%m-%d").to_string())
        .unwrap_or_else(|_| date.to_string())
}

pub fn build_trend_chart(
    points: &[SecurityTrendPoint],
    settings: &PresentationSettings,
) -> TrendChart {
    let scale = trend_scale(points);

    let bars = points
        .iter()
        .map(|point| TrendBar {
            date: point.date.clone(),
            label: short_label(&point.date),
            total_findings: point.total_findings,
            height_percent: bar_height(point.total_findings, scale, settings.min_bar_height),
            severities: ordered_counts(&point.severity_totals, &settings.severity_order),
        })
        .collect();

    TrendChart { scale, bars }
}
