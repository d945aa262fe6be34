//! The temporal intersection aggregator.
//!
//! For each tiled window, overlapping cycles are weighted by per-system
//! trust and intensity, accumulated per canonical theme, and classified into
//! convergences and divergences. Windows carrying meaningful cross-system
//! signal emit one synthetic intersection cycle.

use std::collections::BTreeSet;

use crate::domain::foundation::{clamp01, CycleId, LifeDomain, ValidationError};
use crate::domain::intersection::ledger::ThemeLedger;
use crate::domain::intersection::policy::IntersectionPolicy;
use crate::domain::timeline::cycle::{Cycle, CycleEvidence, Evidence, EvidenceValue, Polarity};
use crate::domain::timeline::themes::{self, Theme};
use crate::domain::timeline::windows::{Granularity, Window, WindowTiler};
use crate::domain::timeline::SignalSystem;

/// Theme marker appended to windows where systems meaningfully disagree.
pub const TENSION_MARKER: &str = "tension";

/// Prefix of the window-label marker theme on emitted cycles.
pub const WINDOW_MARKER_PREFIX: &str = "window:";

/// One weighted cycle contributing to a window.
struct Contribution<'a> {
    cycle: &'a Cycle,
    weight: f64,
    sign: i32,
}

/// Builds synthetic intersection cycles from overlapping upstream cycles.
pub struct IntersectionAggregator;

impl IntersectionAggregator {
    /// Aggregates with the default policy.
    pub fn build(
        cycles: &[Cycle],
        range_from: &str,
        range_to: &str,
        granularity: Granularity,
    ) -> Result<Vec<Cycle>, ValidationError> {
        Self::build_with_policy(cycles, range_from, range_to, granularity, &IntersectionPolicy::default())
    }

    /// Aggregates the cycle list over the tiled range, emitting at most one
    /// intersection cycle per window, in chronological window order.
    pub fn build_with_policy(
        cycles: &[Cycle],
        range_from: &str,
        range_to: &str,
        granularity: Granularity,
        policy: &IntersectionPolicy,
    ) -> Result<Vec<Cycle>, ValidationError> {
        let windows = WindowTiler::tile(range_from, range_to, granularity)?;
        let mut emitted = Vec::new();
        for window in &windows {
            if let Some(cycle) = Self::intersect(cycles, window, granularity, policy) {
                emitted.push(cycle);
            }
        }
        Ok(emitted)
    }

    fn intersect(
        cycles: &[Cycle],
        window: &Window,
        granularity: Granularity,
        policy: &IntersectionPolicy,
    ) -> Option<Cycle> {
        let mut contributions: Vec<Contribution<'_>> = Vec::new();
        let mut systems_present: BTreeSet<SignalSystem> = BTreeSet::new();
        let mut ledger = ThemeLedger::new();

        for cycle in cycles {
            if !cycle.overlaps(window.start, window.end) {
                continue;
            }
            let Some(base) = policy.baseline_weight(cycle.system) else {
                continue;
            };
            let weight = base * cycle.intensity;
            if weight <= 0.0 {
                continue;
            }
            let sign = cycle.polarity.sign();
            systems_present.insert(cycle.system);
            for theme in themes::canonicalize(&cycle.themes) {
                ledger.record(theme, cycle.system, weight, sign, policy);
            }
            contributions.push(Contribution { cycle, weight, sign });
        }

        if contributions.is_empty() {
            return None;
        }

        let convergences = ledger.convergences(policy);
        let divergences = ledger.divergences(policy);

        let total_weight: f64 = contributions.iter().map(|c| c.weight).sum();
        let net: f64 = contributions
            .iter()
            .map(|c| c.weight * f64::from(c.sign))
            .sum();
        let magnitude = clamp01(total_weight);
        let intensity = clamp01(0.5 * magnitude + 0.5 * net.abs());
        let polarity = if net > policy.polarity_band {
            Polarity::Supporting
        } else if net < -policy.polarity_band {
            Polarity::Challenging
        } else {
            Polarity::Neutral
        };

        if convergences.is_empty()
            && divergences.is_empty()
            && magnitude < policy.emission_magnitude_floor
        {
            return None;
        }

        let representative =
            Self::representative_themes(&ledger, &convergences, policy.max_representative_themes);

        let mut theme_tokens: Vec<String> = vec![format!("{}{}", WINDOW_MARKER_PREFIX, window.id)];
        let ordered: BTreeSet<&'static str> = representative.iter().map(Theme::as_str).collect();
        theme_tokens.extend(ordered.into_iter().map(str::to_string));
        if !divergences.is_empty() {
            theme_tokens.push(TENSION_MARKER.to_string());
        }

        let conflicts = divergences.len();
        let alignments = convergences.len();
        let agreement =
            1.0 - (conflicts as f64 / (alignments + conflicts).max(1) as f64).min(1.0);
        let confidence =
            clamp01(systems_present.len() as f64 / 3.0 * 0.6 + agreement * 0.4);

        let mut evidence: Vec<Evidence> = contributions
            .iter()
            .map(|c| Self::evidence_entry(c, confidence))
            .collect();
        evidence.sort_by(|a, b| Self::evidence_sort_key(a).cmp(&Self::evidence_sort_key(b)));

        Some(Cycle {
            cycle_id: CycleId::derive(&[
                "intersection",
                "window",
                window.id.as_str(),
                granularity.as_str(),
            ]),
            system: SignalSystem::Intersection,
            kind: "window".to_string(),
            domain: LifeDomain::Growth,
            themes: theme_tokens,
            start: window.start.format("%Y-%m-%d").to_string(),
            end: window.end.format("%Y-%m-%d").to_string(),
            intensity,
            polarity,
            evidence,
            confidence: Some(confidence),
            peak: None,
            age_start: None,
            age_end: None,
            notes: Vec::new(),
        })
    }

    /// Up to `limit` representative themes: convergences ordered by
    /// descending support weight (ties alphabetical), or the strongest
    /// themes by absolute net score when nothing converged.
    fn representative_themes(
        ledger: &ThemeLedger,
        convergences: &[Theme],
        limit: usize,
    ) -> Vec<Theme> {
        let mut themes: Vec<Theme> = if convergences.is_empty() {
            ledger.strongest_themes()
        } else {
            let mut ranked = convergences.to_vec();
            ranked.sort_by(|a, b| {
                ledger
                    .support_weight(*b)
                    .partial_cmp(&ledger.support_weight(*a))
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.as_str().cmp(b.as_str()))
            });
            ranked
        };
        themes.truncate(limit);
        themes
    }

    fn evidence_entry(contribution: &Contribution<'_>, confidence: f64) -> Evidence {
        let cycle = contribution.cycle;
        let sign_char = match contribution.sign {
            s if s > 0 => '+',
            s if s < 0 => '-',
            _ => '0',
        };
        Evidence {
            source: "timeline.cycle".to_string(),
            value: EvidenceValue::Cycle(CycleEvidence {
                system: cycle.system,
                cycle_id: cycle.cycle_id.clone(),
                kind: cycle.kind.clone(),
                themes: cycle.themes.clone(),
                polarity: cycle.polarity,
                intensity: cycle.intensity,
            }),
            weight: clamp01(contribution.weight),
            note: format!(
                "contribution={}{:.2}; confidence={:.2}",
                sign_char, contribution.weight, confidence
            ),
        }
    }

    fn evidence_sort_key(entry: &Evidence) -> (&str, &str) {
        match &entry.value {
            EvidenceValue::Cycle(cycle) => (cycle.system.as_str(), cycle.cycle_id.as_str()),
            EvidenceValue::Text(_) => ("", ""),
        }
    }
}
