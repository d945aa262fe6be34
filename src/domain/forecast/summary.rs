//! Window summaries: the presentation-ready view of a cycle.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{clamp01, round2, CycleId};
use crate::domain::intersection::aggregator::WINDOW_MARKER_PREFIX;
use crate::domain::timeline::cycle::{Cycle, EvidenceValue, Polarity};
use crate::domain::timeline::SignalSystem;

/// Theme shown when a cycle carries no displayable theme at all.
pub const FALLBACK_THEME: &str = "general";

/// Presentation hints attached to a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowUi {
    pub primary_theme: String,
    pub display_themes: Vec<String>,
    pub is_continuation: bool,
}

/// Derived, ephemeral view of one cycle. Never persisted; it exists only as
/// part of a single response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSummary {
    pub window_id: String,
    pub start: String,
    pub end: String,
    pub polarity: Polarity,
    pub intensity: f64,
    pub confidence: f64,
    pub themes: Vec<String>,
    pub systems_aligned: Vec<SignalSystem>,
    pub evidence_cycle_ids: Vec<CycleId>,
    pub ui: WindowUi,
}

/// Converts cycles (raw or intersection) into window summaries.
pub struct WindowSummarizer;

impl WindowSummarizer {
    /// Summarizes one cycle.
    ///
    /// The window id comes from the cycle's `window:` marker theme when one
    /// is present (intersection cycles), falling back to the cycle id. The
    /// cycle's own confidence wins when set; otherwise confidence is derived
    /// from evidence breadth and intensity.
    pub fn summarize(cycle: &Cycle) -> WindowSummary {
        let window_id = cycle
            .themes
            .iter()
            .find_map(|theme| theme.strip_prefix(WINDOW_MARKER_PREFIX))
            .map(str::to_string)
            .unwrap_or_else(|| cycle.cycle_id.as_str().to_string());

        let display: Vec<String> = cycle
            .themes
            .iter()
            .filter(|theme| !theme.starts_with(WINDOW_MARKER_PREFIX))
            .cloned()
            .collect();
        let primary_theme = display
            .first()
            .cloned()
            .unwrap_or_else(|| FALLBACK_THEME.to_string());
        let display_themes = if display.is_empty() {
            vec![primary_theme.clone()]
        } else {
            display
        };

        let mut systems: BTreeSet<SignalSystem> = BTreeSet::new();
        let mut evidence_ids: BTreeSet<CycleId> = BTreeSet::new();
        for entry in &cycle.evidence {
            if let EvidenceValue::Cycle(reference) = &entry.value {
                systems.insert(reference.system);
                evidence_ids.insert(reference.cycle_id.clone());
            }
        }

        let confidence = cycle.confidence.unwrap_or_else(|| {
            clamp01(0.55 * (systems.len() as f64 / 3.0).min(1.0) + 0.45 * cycle.intensity)
        });

        WindowSummary {
            window_id,
            start: cycle.start.clone(),
            end: cycle.end.clone(),
            polarity: cycle.polarity,
            intensity: cycle.intensity,
            confidence: round2(confidence),
            themes: cycle.themes.clone(),
            systems_aligned: systems.into_iter().collect(),
            evidence_cycle_ids: evidence_ids.into_iter().collect(),
            ui: WindowUi {
                primary_theme,
                display_themes,
                is_continuation: false,
            },
        }
    }
}
