//! Aggregation policy: baseline system weights and scoring thresholds.
//!
//! The default values are inherited policy, not derived physics; they model
//! relative trust per subsystem and the sensitivity of convergence and
//! divergence detection. Callers may deserialize an adjusted policy, but the
//! defaults are the supported tuning.

use serde::{Deserialize, Serialize};

use crate::domain::timeline::SignalSystem;

/// Tunable weights and thresholds for the intersection aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntersectionPolicy {
    /// Baseline trust weight per upstream system. The weights sum to <= 1
    /// but need not sum to exactly 1.
    pub solar_system_weight: f64,
    pub period_cycle_weight: f64,
    pub sexagenary_weight: f64,
    pub numerology_weight: f64,

    /// Minimum weighted contribution for a system to count as meaningful
    /// support or challenge of a theme.
    pub meaningful_contribution: f64,
    /// Minimum net theme score for a multi-system theme to converge.
    pub convergence_net_threshold: f64,
    /// Minimum support and challenge weight for a theme to diverge.
    pub divergence_weight_threshold: f64,
    /// Windows below this magnitude emit nothing unless a convergence or
    /// divergence is present.
    pub emission_magnitude_floor: f64,
    /// Net score band around zero that reads as neutral polarity.
    pub polarity_band: f64,
    /// Maximum representative themes carried on an emitted cycle.
    pub max_representative_themes: usize,
}

impl Default for IntersectionPolicy {
    fn default() -> Self {
        Self {
            solar_system_weight: 0.30,
            period_cycle_weight: 0.35,
            sexagenary_weight: 0.25,
            numerology_weight: 0.10,
            meaningful_contribution: 0.15,
            convergence_net_threshold: 0.10,
            divergence_weight_threshold: 0.20,
            emission_magnitude_floor: 0.20,
            polarity_band: 0.10,
            max_representative_themes: 3,
        }
    }
}

impl IntersectionPolicy {
    /// Baseline weight for a system, or `None` for systems excluded from
    /// aggregation (the synthetic `intersection` system).
    pub fn baseline_weight(&self, system: SignalSystem) -> Option<f64> {
        match system {
            SignalSystem::SolarSystem => Some(self.solar_system_weight),
            SignalSystem::PeriodCycle => Some(self.period_cycle_weight),
            SignalSystem::Sexagenary => Some(self.sexagenary_weight),
            SignalSystem::Numerology => Some(self.numerology_weight),
            SignalSystem::Intersection => None,
        }
    }
}
