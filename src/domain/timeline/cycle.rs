//! The cycle record: an immutable time-bounded signal from one subsystem.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::domain::foundation::{calendar, CycleId, LifeDomain};

/// The upstream subsystem a cycle originates from.
///
/// Closed enumeration: baseline trust weights are looked up per system in
/// [`IntersectionPolicy`](crate::domain::intersection::IntersectionPolicy),
/// and systems without a weight (the synthetic `intersection` system) never
/// contribute to aggregation.
///
/// Variants are declared in lexical token order so the derived `Ord` matches
/// alphabetical ordering of the wire tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalSystem {
    Intersection,
    Numerology,
    PeriodCycle,
    Sexagenary,
    SolarSystem,
}

impl SignalSystem {
    /// Returns the wire token for this system.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalSystem::Intersection => "intersection",
            SignalSystem::Numerology => "numerology",
            SignalSystem::PeriodCycle => "period-cycle",
            SignalSystem::Sexagenary => "sexagenary",
            SignalSystem::SolarSystem => "solar-system",
        }
    }

    /// The four upstream systems that carry baseline trust weight.
    pub const UPSTREAM: [SignalSystem; 4] = [
        SignalSystem::SolarSystem,
        SignalSystem::PeriodCycle,
        SignalSystem::Sexagenary,
        SignalSystem::Numerology,
    ];
}

impl fmt::Display for SignalSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Valence of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Supporting,
    Challenging,
    Neutral,
}

impl Polarity {
    /// Sign used in weighted aggregation: supporting +1, challenging -1,
    /// neutral 0.
    pub fn sign(&self) -> i32 {
        match self {
            Polarity::Supporting => 1,
            Polarity::Challenging => -1,
            Polarity::Neutral => 0,
        }
    }

    /// Returns the wire token for this polarity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Supporting => "supporting",
            Polarity::Challenging => "challenging",
            Polarity::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured reference to a source cycle inside an evidence entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleEvidence {
    pub system: SignalSystem,
    pub cycle_id: CycleId,
    pub kind: String,
    pub themes: Vec<String>,
    pub polarity: Polarity,
    pub intensity: f64,
}

/// Payload of an evidence entry: either a plain text value from an upstream
/// computation or a structured reference to a contributing cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvidenceValue {
    Cycle(CycleEvidence),
    Text(String),
}

/// One (source, value, weight, note) tuple justifying a signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub source: String,
    pub value: EvidenceValue,
    pub weight: f64,
    pub note: String,
}

/// An immutable time-bounded signal emitted by one upstream system.
///
/// `start` and `end` are inclusive `YYYY-MM` or `YYYY-MM-DD` boundary
/// strings; records whose boundaries do not parse are skipped during overlap
/// testing rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    pub cycle_id: CycleId,
    pub system: SignalSystem,
    pub kind: String,
    pub domain: LifeDomain,
    pub themes: Vec<String>,
    pub start: String,
    pub end: String,
    pub intensity: f64,
    pub polarity: Polarity,
    pub evidence: Vec<Evidence>,
    /// Precomputed confidence, set by the aggregator on intersection cycles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Peak date within the cycle, if the producing system knows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak: Option<String>,
    /// Subject age at cycle start, for age-indexed systems.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_start: Option<f64>,
    /// Subject age at cycle end, for age-indexed systems.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_end: Option<f64>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl Cycle {
    /// Resolves the inclusive date interval this cycle covers, or `None` when
    /// either boundary string is unparseable.
    pub fn interval(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = calendar::parse_bound(&self.start, false)?;
        let end = calendar::parse_bound(&self.end, true)?;
        Some((start, end))
    }

    /// Inclusive-inclusive overlap test against a window interval.
    pub fn overlaps(&self, window_start: NaiveDate, window_end: NaiveDate) -> bool {
        match self.interval() {
            Some((start, end)) => start <= window_end && end >= window_start,
            None => false,
        }
    }
}

/// The one comparator for cycle collections:
/// `(start, end, system, cycleId)` ascending.
pub fn chronological(a: &Cycle, b: &Cycle) -> Ordering {
    a.start
        .cmp(&b.start)
        .then_with(|| a.end.cmp(&b.end))
        .then_with(|| a.system.as_str().cmp(b.system.as_str()))
        .then_with(|| a.cycle_id.as_str().cmp(b.cycle_id.as_str()))
}

/// Sorts cycles by the chronological comparator.
pub fn sort_cycles(cycles: &mut [Cycle]) {
    cycles.sort_by(chronological);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cycle(system: SignalSystem, start: &str, end: &str) -> Cycle {
        Cycle {
            cycle_id: CycleId::derive(&[system.as_str(), "test", start, end]),
            system,
            kind: "test".to_string(),
            domain: LifeDomain::Growth,
            themes: vec!["discipline".to_string()],
            start: start.to_string(),
            end: end.to_string(),
            intensity: 0.5,
            polarity: Polarity::Supporting,
            evidence: Vec::new(),
            confidence: None,
            peak: None,
            age_start: None,
            age_end: None,
            notes: Vec::new(),
        }
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn system_tokens_round_trip_through_serde() {
        for (system, token) in [
            (SignalSystem::SolarSystem, "\"solar-system\""),
            (SignalSystem::PeriodCycle, "\"period-cycle\""),
            (SignalSystem::Sexagenary, "\"sexagenary\""),
            (SignalSystem::Numerology, "\"numerology\""),
            (SignalSystem::Intersection, "\"intersection\""),
        ] {
            assert_eq!(serde_json::to_string(&system).unwrap(), token);
            let back: SignalSystem = serde_json::from_str(token).unwrap();
            assert_eq!(back, system);
        }
    }

    #[test]
    fn system_ord_matches_token_order() {
        let mut systems = vec![
            SignalSystem::SolarSystem,
            SignalSystem::Intersection,
            SignalSystem::Sexagenary,
            SignalSystem::Numerology,
            SignalSystem::PeriodCycle,
        ];
        systems.sort();
        let tokens: Vec<_> = systems.iter().map(|s| s.as_str()).collect();
        let mut by_string = tokens.clone();
        by_string.sort();
        assert_eq!(tokens, by_string);
    }

    #[test]
    fn polarity_signs() {
        assert_eq!(Polarity::Supporting.sign(), 1);
        assert_eq!(Polarity::Challenging.sign(), -1);
        assert_eq!(Polarity::Neutral.sign(), 0);
    }

    #[test]
    fn interval_resolves_month_boundaries_inclusively() {
        let cycle = test_cycle(SignalSystem::SolarSystem, "2026-01", "2026-04");
        assert_eq!(
            cycle.interval(),
            Some((ymd(2026, 1, 1), ymd(2026, 4, 30)))
        );
    }

    #[test]
    fn overlap_covers_exactly_the_spanned_months() {
        let cycle = test_cycle(SignalSystem::SolarSystem, "2026-01", "2026-04");
        assert!(cycle.overlaps(ymd(2026, 1, 1), ymd(2026, 1, 31)));
        assert!(cycle.overlaps(ymd(2026, 4, 1), ymd(2026, 4, 30)));
        assert!(!cycle.overlaps(ymd(2025, 12, 1), ymd(2025, 12, 31)));
        assert!(!cycle.overlaps(ymd(2026, 5, 1), ymd(2026, 5, 31)));
    }

    #[test]
    fn malformed_boundaries_never_overlap() {
        let mut cycle = test_cycle(SignalSystem::Sexagenary, "2026-01", "2026-04");
        cycle.end = "not-a-date".to_string();
        assert!(cycle.interval().is_none());
        assert!(!cycle.overlaps(ymd(2026, 1, 1), ymd(2026, 12, 31)));
    }

    #[test]
    fn chronological_orders_by_start_end_system_id() {
        let mut cycles = vec![
            test_cycle(SignalSystem::SolarSystem, "2026-03", "2026-05"),
            test_cycle(SignalSystem::Sexagenary, "2026-01", "2026-06"),
            test_cycle(SignalSystem::PeriodCycle, "2026-01", "2026-02"),
        ];
        sort_cycles(&mut cycles);
        assert_eq!(cycles[0].start, "2026-01");
        assert_eq!(cycles[0].end, "2026-02");
        assert_eq!(cycles[1].system, SignalSystem::Sexagenary);
        assert_eq!(cycles[2].start, "2026-03");
    }

    #[test]
    fn chronological_breaks_ties_on_system_token() {
        let mut cycles = vec![
            test_cycle(SignalSystem::SolarSystem, "2026-01", "2026-02"),
            test_cycle(SignalSystem::PeriodCycle, "2026-01", "2026-02"),
        ];
        sort_cycles(&mut cycles);
        // "period-cycle" < "solar-system" lexicographically
        assert_eq!(cycles[0].system, SignalSystem::PeriodCycle);
        assert_eq!(cycles[1].system, SignalSystem::SolarSystem);
    }

    #[test]
    fn cycle_serializes_with_camel_case_fields() {
        let cycle = test_cycle(SignalSystem::Numerology, "2026-01", "2026-02");
        let json = serde_json::to_string(&cycle).unwrap();
        assert!(json.contains("\"cycleId\""));
        assert!(json.contains("\"system\":\"numerology\""));
        assert!(json.contains("\"polarity\":\"supporting\""));
        assert!(!json.contains("\"confidence\""));
        assert!(!json.contains("\"peak\""));
    }

    #[test]
    fn evidence_value_deserializes_both_shapes() {
        let text: EvidenceValue = serde_json::from_str("\"placeholder\"").unwrap();
        assert_eq!(text, EvidenceValue::Text("placeholder".to_string()));

        let json = r#"{
            "system": "solar-system",
            "cycleId": "cycle-abc123def456",
            "kind": "transit",
            "themes": ["discipline"],
            "polarity": "supporting",
            "intensity": 0.8
        }"#;
        let cycle_ref: EvidenceValue = serde_json::from_str(json).unwrap();
        match cycle_ref {
            EvidenceValue::Cycle(inner) => {
                assert_eq!(inner.system, SignalSystem::SolarSystem);
                assert_eq!(inner.cycle_id.as_str(), "cycle-abc123def456");
            }
            EvidenceValue::Text(_) => panic!("expected structured cycle reference"),
        }
    }
}
