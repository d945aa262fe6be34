//! Summary bullet text for the top windows.

use std::collections::BTreeMap;

use crate::domain::forecast::summary::WindowSummary;
use crate::domain::timeline::cycle::Polarity;

/// Fixed fallback bullets when no window qualifies.
const FALLBACK_BULLETS: [&str; 3] = [
    "No strong cross-system windows in this range.",
    "Signals are diffuse; treat this period as neutral.",
    "Consider a wider range for clearer patterns.",
];

/// Builds 2-4 human-readable bullet strings for the selected top windows.
///
/// Deterministic for the same input: the dominant theme resolves ties
/// alphabetically and counts come straight from the selection.
pub fn build_summary_bullets(
    top_windows: &[WindowSummary],
    range_from: &str,
    range_to: &str,
) -> Vec<String> {
    if top_windows.is_empty() {
        return FALLBACK_BULLETS.iter().map(|b| b.to_string()).collect();
    }

    let mut bullets = Vec::with_capacity(4);

    let best = &top_windows[0];
    if best.ui.is_continuation {
        bullets.push(format!(
            "Strongest window: {} continues the {} theme (confidence {:.2}).",
            best.window_id, best.ui.primary_theme, best.confidence
        ));
    } else {
        bullets.push(format!(
            "Strongest window: {} ({}, confidence {:.2}).",
            best.window_id, best.ui.primary_theme, best.confidence
        ));
    }

    if let Some(theme) = dominant_theme(top_windows) {
        bullets.push(format!(
            "Dominant theme across {} windows: {}.",
            top_windows.len(),
            theme
        ));
    }

    let supporting = count_polarity(top_windows, Polarity::Supporting);
    let challenging = count_polarity(top_windows, Polarity::Challenging);
    let neutral = top_windows.len() - supporting - challenging;
    bullets.push(format!(
        "Polarity balance: {} supporting, {} challenging, {} neutral.",
        supporting, challenging, neutral
    ));

    bullets.push(format!("Range covered: {} to {}.", range_from, range_to));
    bullets
}

/// Most common primary theme, ties broken alphabetically.
fn dominant_theme(windows: &[WindowSummary]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for window in windows {
        *counts.entry(window.ui.primary_theme.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(theme, _)| theme.to_string())
}

fn count_polarity(windows: &[WindowSummary], polarity: Polarity) -> usize {
    windows.iter().filter(|w| w.polarity == polarity).count()
}
