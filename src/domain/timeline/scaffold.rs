//! Placeholder timeline scaffolding.
//!
//! Produces one neutral zero-intensity cycle per weighted upstream system so
//! callers can exercise the timeline contract before real producers are
//! wired in.

use crate::domain::foundation::{calendar, CycleId, LifeDomain, ValidationError};
use crate::domain::timeline::cycle::{
    sort_cycles, Cycle, Evidence, EvidenceValue, Polarity, SignalSystem,
};

/// Builds placeholder cycles covering the normalized `[range_from, range_to]`
/// month range, sorted by the chronological cycle comparator.
pub fn placeholder_cycles(range_from: &str, range_to: &str) -> Result<Vec<Cycle>, ValidationError> {
    let start = calendar::normalize_iso_ym(range_from)
        .ok_or_else(|| ValidationError::invalid_format("range_from", "expected YYYY-MM"))?;
    let end = calendar::normalize_iso_ym(range_to)
        .ok_or_else(|| ValidationError::invalid_format("range_to", "expected YYYY-MM"))?;

    let mut cycles = Vec::with_capacity(SignalSystem::UPSTREAM.len());
    for system in SignalSystem::UPSTREAM {
        cycles.push(Cycle {
            cycle_id: CycleId::derive(&[system.as_str(), "scaffold", &start, &end]),
            system,
            kind: "scaffold".to_string(),
            domain: LifeDomain::Growth,
            themes: vec!["scaffold".to_string()],
            start: start.clone(),
            end: end.clone(),
            intensity: 0.0,
            polarity: Polarity::Neutral,
            evidence: vec![Evidence {
                source: format!("{}.scaffold", system.as_str()),
                value: EvidenceValue::Text("placeholder".to_string()),
                weight: 0.0,
                note: "Scaffold placeholder.".to_string(),
            }],
            confidence: None,
            peak: None,
            age_start: None,
            age_end: None,
            notes: vec!["scaffold".to_string()],
        });
    }
    sort_cycles(&mut cycles);
    Ok(cycles)
}
