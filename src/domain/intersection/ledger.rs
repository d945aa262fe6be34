//! Per-window theme accumulation.
//!
//! Scores accumulate over the canonical theme vocabulary with default-zero
//! semantics. All maps are ordered so downstream iteration is deterministic.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::intersection::policy::IntersectionPolicy;
use crate::domain::timeline::{SignalSystem, Theme};

/// Accumulated per-theme evidence for one window.
#[derive(Debug, Default)]
pub struct ThemeLedger {
    scores: BTreeMap<Theme, f64>,
    support: BTreeMap<Theme, f64>,
    challenge: BTreeMap<Theme, f64>,
    support_systems: BTreeMap<Theme, BTreeSet<SignalSystem>>,
    challenge_systems: BTreeMap<Theme, BTreeSet<SignalSystem>>,
}

impl ThemeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one weighted, signed contribution to a theme.
    ///
    /// A system only counts toward the distinct-system sets when its
    /// contribution clears the policy's meaningful-contribution threshold.
    pub fn record(
        &mut self,
        theme: Theme,
        system: SignalSystem,
        weight: f64,
        sign: i32,
        policy: &IntersectionPolicy,
    ) {
        *self.scores.entry(theme).or_insert(0.0) += weight * f64::from(sign);
        if sign > 0 {
            *self.support.entry(theme).or_insert(0.0) += weight;
            let systems = self.support_systems.entry(theme).or_default();
            if weight >= policy.meaningful_contribution {
                systems.insert(system);
            }
        } else if sign < 0 {
            *self.challenge.entry(theme).or_insert(0.0) += weight;
            let systems = self.challenge_systems.entry(theme).or_default();
            if weight >= policy.meaningful_contribution {
                systems.insert(system);
            }
        }
    }

    /// Net signed score for a theme (zero if never recorded).
    pub fn score(&self, theme: Theme) -> f64 {
        self.scores.get(&theme).copied().unwrap_or(0.0)
    }

    /// Accumulated supporting weight for a theme.
    pub fn support_weight(&self, theme: Theme) -> f64 {
        self.support.get(&theme).copied().unwrap_or(0.0)
    }

    /// Accumulated challenging weight for a theme.
    pub fn challenge_weight(&self, theme: Theme) -> f64 {
        self.challenge.get(&theme).copied().unwrap_or(0.0)
    }

    /// Themes where at least two distinct systems contribute meaningful
    /// support and the net score clears the convergence threshold.
    pub fn convergences(&self, policy: &IntersectionPolicy) -> Vec<Theme> {
        self.scores
            .iter()
            .filter(|&(theme, score)| {
                let supporters = self
                    .support_systems
                    .get(theme)
                    .map(BTreeSet::len)
                    .unwrap_or(0);
                supporters >= 2 && *score > policy.convergence_net_threshold
            })
            .map(|(theme, _)| *theme)
            .collect()
    }

    /// Themes where support and challenge weight are each above the
    /// divergence threshold: the systems meaningfully disagree on valence.
    pub fn divergences(&self, policy: &IntersectionPolicy) -> Vec<Theme> {
        self.scores
            .keys()
            .filter(|theme| {
                self.support_weight(**theme) >= policy.divergence_weight_threshold
                    && self.challenge_weight(**theme) >= policy.divergence_weight_threshold
            })
            .copied()
            .collect()
    }

    /// All recorded themes ordered by descending absolute net score, ties
    /// broken alphabetically by token.
    pub fn strongest_themes(&self) -> Vec<Theme> {
        let mut themes: Vec<Theme> = self.scores.keys().copied().collect();
        themes.sort_by(|a, b| {
            self.score(*b)
                .abs()
                .partial_cmp(&self.score(*a).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.as_str().cmp(b.as_str()))
        });
        themes
    }

    /// True when no contribution was ever recorded.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
