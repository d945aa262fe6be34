//! Life-domain classification of summarized windows.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::forecast::selector;
use crate::domain::forecast::summary::WindowSummary;
use crate::domain::foundation::LifeDomain;
use crate::domain::intersection::aggregator::WINDOW_MARKER_PREFIX;

/// Window ids surfaced per bucket.
const BUCKET_TOP_IDS: usize = 3;

// Membership covers both canonical themes and the raw tokens upstream
// systems emit, since raw cycles are summarized alongside intersections.
static CAREER_THEMES: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    BTreeSet::from([
        "structure_discipline",
        "pressure_maturation",
        "ambition",
        "responsibility",
        "authority",
    ])
});

static RELATIONSHIP_THEMES: Lazy<BTreeSet<&'static str>> =
    Lazy::new(|| BTreeSet::from(["love_harmony", "relationships", "belonging"]));

/// One life-domain bucket: its ranked windows plus the ids of its top few.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainBucket {
    pub windows: Vec<WindowSummary>,
    pub top_window_ids: Vec<String>,
}

/// Assigns a summary to a life-domain bucket from its non-marker themes.
///
/// Career themes take precedence over relationship themes; anything not in
/// either membership table lands in growth.
pub fn assign_domain(summary: &WindowSummary) -> LifeDomain {
    let themes = summary
        .themes
        .iter()
        .filter(|theme| !theme.starts_with(WINDOW_MARKER_PREFIX));
    for theme in themes.clone() {
        if CAREER_THEMES.contains(theme.as_str()) {
            return LifeDomain::Career;
        }
    }
    for theme in themes {
        if RELATIONSHIP_THEMES.contains(theme.as_str()) {
            return LifeDomain::Relationships;
        }
    }
    LifeDomain::Growth
}

/// Buckets the full summarized set by life domain.
///
/// All three buckets are always present, each internally in ranking order
/// with its own top window ids exposed for secondary views.
pub fn bucket_by_domain(summaries: &[WindowSummary]) -> BTreeMap<LifeDomain, DomainBucket> {
    let mut grouped: BTreeMap<LifeDomain, Vec<WindowSummary>> = BTreeMap::new();
    for domain in [
        LifeDomain::Career,
        LifeDomain::Relationships,
        LifeDomain::Growth,
    ] {
        grouped.insert(domain, Vec::new());
    }
    for summary in summaries {
        grouped
            .entry(assign_domain(summary))
            .or_default()
            .push(summary.clone());
    }

    grouped
        .into_iter()
        .map(|(domain, mut windows)| {
            selector::sort_ranked(&mut windows);
            let top_window_ids = windows
                .iter()
                .take(BUCKET_TOP_IDS)
                .map(|w| w.window_id.clone())
                .collect();
            (
                domain,
                DomainBucket {
                    windows,
                    top_window_ids,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::summary::WindowUi;
    use crate::domain::timeline::cycle::Polarity;

    fn summary(window_id: &str, confidence: f64, themes: &[&str]) -> WindowSummary {
        let themes: Vec<String> = themes.iter().map(|t| t.to_string()).collect();
        let primary = themes
            .iter()
            .find(|t| !t.starts_with(WINDOW_MARKER_PREFIX))
            .cloned()
            .unwrap_or_else(|| "general".to_string());
        WindowSummary {
            window_id: window_id.to_string(),
            start: format!("{}-01", window_id),
            end: format!("{}-28", window_id),
            polarity: Polarity::Supporting,
            intensity: confidence,
            confidence,
            themes: themes.clone(),
            systems_aligned: Vec::new(),
            evidence_cycle_ids: Vec::new(),
            ui: WindowUi {
                primary_theme: primary,
                display_themes: themes,
                is_continuation: false,
            },
        }
    }

    #[test]
    fn career_themes_win_over_relationship_themes() {
        let s = summary("2026-01", 0.8, &["love_harmony", "structure_discipline"]);
        assert_eq!(assign_domain(&s), LifeDomain::Career);
    }

    #[test]
    fn relationship_themes_classify_relationships() {
        let s = summary("2026-01", 0.8, &["love_harmony"]);
        assert_eq!(assign_domain(&s), LifeDomain::Relationships);
    }

    #[test]
    fn raw_relationship_tokens_classify_relationships() {
        let raw = summary("2026-01", 0.8, &["relationships"]);
        assert_eq!(assign_domain(&raw), LifeDomain::Relationships);
        let belonging = summary("2026-02", 0.8, &["belonging"]);
        assert_eq!(assign_domain(&belonging), LifeDomain::Relationships);
    }

    #[test]
    fn raw_career_tokens_classify_career() {
        let s = summary("2026-01", 0.8, &["responsibility", "authority"]);
        assert_eq!(assign_domain(&s), LifeDomain::Career);
    }

    #[test]
    fn unknown_themes_default_to_growth() {
        let s = summary("2026-01", 0.8, &["expansion_growth", "tension"]);
        assert_eq!(assign_domain(&s), LifeDomain::Growth);
    }

    #[test]
    fn volatility_and_drive_themes_stay_in_growth() {
        let s = summary("2026-01", 0.8, &["volatility_ambition", "drive_assertion"]);
        assert_eq!(assign_domain(&s), LifeDomain::Growth);
    }

    #[test]
    fn window_markers_are_ignored_during_classification() {
        let s = summary("2026-01", 0.8, &["window:2026-01"]);
        assert_eq!(assign_domain(&s), LifeDomain::Growth);
    }

    #[test]
    fn all_buckets_exist_even_when_empty() {
        let buckets = bucket_by_domain(&[]);
        assert_eq!(buckets.len(), 3);
        assert!(buckets.values().all(|b| b.windows.is_empty()));
        assert!(buckets.values().all(|b| b.top_window_ids.is_empty()));
    }

    #[test]
    fn buckets_rank_internally_and_cap_top_ids() {
        let summaries = vec![
            summary("2026-01", 0.5, &["structure_discipline"]),
            summary("2026-02", 0.9, &["ambition"]),
            summary("2026-03", 0.7, &["responsibility"]),
            summary("2026-04", 0.6, &["pressure_maturation"]),
            summary("2026-05", 0.8, &["love_harmony"]),
        ];
        let buckets = bucket_by_domain(&summaries);

        let career = &buckets[&LifeDomain::Career];
        assert_eq!(career.windows.len(), 4);
        assert_eq!(
            career.top_window_ids,
            vec!["2026-02", "2026-03", "2026-04"]
        );

        let relationships = &buckets[&LifeDomain::Relationships];
        assert_eq!(relationships.top_window_ids, vec!["2026-05"]);
    }
}
