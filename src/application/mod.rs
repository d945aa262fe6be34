//! Application layer: the forecast pipeline entry point.
//!
//! Runs tiler, aggregator, summarizer, selector, and classifier in sequence
//! and assembles the response payload. This is the only layer that emits
//! tracing events; the domain layer below stays silent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::forecast::{bullets, domains, selector, DomainBucket, WindowSummarizer, WindowSummary};
use crate::domain::foundation::{LifeDomain, ValidationError};
use crate::domain::intersection::{IntersectionAggregator, IntersectionPolicy};
use crate::domain::timeline::cycle::{sort_cycles, Cycle};
use crate::domain::timeline::Granularity;

/// Bounded length of the top-window ranking.
const DEFAULT_TOP_N: usize = 6;

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

/// A forecast request: the range to tile plus presentation knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    pub range_from: String,
    pub range_to: String,
    #[serde(default)]
    pub granularity: Granularity,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl ForecastRequest {
    /// A monthly request over the given inclusive `YYYY-MM` range with the
    /// default ranking bound.
    pub fn monthly(range_from: impl Into<String>, range_to: impl Into<String>) -> Self {
        Self {
            range_from: range_from.into(),
            range_to: range_to.into(),
            granularity: Granularity::Month,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Echo of the requested range on the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeEcho {
    pub from: String,
    pub to: String,
}

/// The assembled forecast payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    pub granularity: Granularity,
    pub range: RangeEcho,
    pub top_windows: Vec<WindowSummary>,
    pub by_domain: BTreeMap<LifeDomain, DomainBucket>,
    pub summary: Vec<String>,
}

/// Runs the full forecast pipeline over a cycle list.
pub struct ForecastEngine;

impl ForecastEngine {
    /// Builds a forecast with the default intersection policy.
    pub fn build_forecast(
        cycles: &[Cycle],
        request: &ForecastRequest,
    ) -> Result<ForecastResponse, ValidationError> {
        Self::build_forecast_with_policy(cycles, request, &IntersectionPolicy::default())
    }

    /// Builds a forecast: intersects the cycles over the tiled range,
    /// summarizes raw and intersection cycles alike, selects a diverse
    /// top-N, and buckets the full summarized set by life domain.
    pub fn build_forecast_with_policy(
        cycles: &[Cycle],
        request: &ForecastRequest,
        policy: &IntersectionPolicy,
    ) -> Result<ForecastResponse, ValidationError> {
        debug!(
            range_from = %request.range_from,
            range_to = %request.range_to,
            granularity = %request.granularity,
            cycles = cycles.len(),
            "building forecast"
        );

        let intersections = IntersectionAggregator::build_with_policy(
            cycles,
            &request.range_from,
            &request.range_to,
            request.granularity,
            policy,
        )?;

        let mut all_cycles: Vec<Cycle> = cycles.to_vec();
        all_cycles.extend(intersections.iter().cloned());
        sort_cycles(&mut all_cycles);

        let summaries: Vec<WindowSummary> = all_cycles
            .iter()
            .map(WindowSummarizer::summarize)
            .collect();

        let mut top_windows = selector::select_top(&summaries, request.top_n);
        selector::mark_continuations(&mut top_windows);

        let by_domain = domains::bucket_by_domain(&summaries);
        let summary =
            bullets::build_summary_bullets(&top_windows, &request.range_from, &request.range_to);

        info!(
            intersections = intersections.len(),
            top_windows = top_windows.len(),
            "forecast built"
        );

        Ok(ForecastResponse {
            granularity: request.granularity,
            range: RangeEcho {
                from: request.range_from.clone(),
                to: request.range_to.clone(),
            },
            top_windows,
            by_domain,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_with_defaults() {
        let request: ForecastRequest =
            serde_json::from_str(r#"{"rangeFrom": "2026-01", "rangeTo": "2026-06"}"#).unwrap();
        assert_eq!(request.granularity, Granularity::Month);
        assert_eq!(request.top_n, 6);
    }

    #[test]
    fn empty_cycle_list_yields_fallback_payload() {
        let request = ForecastRequest::monthly("2026-01", "2026-03");
        let response = ForecastEngine::build_forecast(&[], &request).unwrap();
        assert!(response.top_windows.is_empty());
        assert_eq!(response.by_domain.len(), 3);
        assert_eq!(response.summary.len(), 3);
        assert_eq!(response.range.from, "2026-01");
        assert_eq!(response.range.to, "2026-03");
    }

    #[test]
    fn malformed_range_is_rejected() {
        let request = ForecastRequest::monthly("", "2026-03");
        assert!(ForecastEngine::build_forecast(&[], &request).is_err());
    }

    #[test]
    fn response_serializes_with_camel_case_fields() {
        let request = ForecastRequest::monthly("2026-01", "2026-03");
        let response = ForecastEngine::build_forecast(&[], &request).unwrap();
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"topWindows\""));
        assert!(json.contains("\"byDomain\""));
        assert!(json.contains("\"granularity\":\"month\""));
        assert!(json.contains("\"career\""));
    }
}
