//! Ranking and top-N selection with thematic diversity.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::domain::forecast::summary::WindowSummary;

/// The one comparator for summary collections:
/// `(-confidence, -intensity, start, windowId)`.
pub fn ranking(a: &WindowSummary, b: &WindowSummary) -> Ordering {
    b.confidence
        .partial_cmp(&a.confidence)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            b.intensity
                .partial_cmp(&a.intensity)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.start.cmp(&b.start))
        .then_with(|| a.window_id.cmp(&b.window_id))
}

/// Sorts summaries by the ranking comparator.
pub fn sort_ranked(summaries: &mut [WindowSummary]) {
    summaries.sort_by(ranking);
}

/// Selects up to `top_n` summaries, diversity first.
///
/// The first pass walks the ranked list and picks windows introducing a
/// primary theme not seen yet; the second pass fills any remaining slots from
/// the ranked list regardless of repeated themes. The result keeps picking
/// order, so the diverse picks lead.
pub fn select_top(summaries: &[WindowSummary], top_n: usize) -> Vec<WindowSummary> {
    let mut ranked: Vec<WindowSummary> = summaries.to_vec();
    sort_ranked(&mut ranked);

    let mut picked: Vec<usize> = Vec::new();
    let mut seen_themes: BTreeSet<&str> = BTreeSet::new();
    for (index, summary) in ranked.iter().enumerate() {
        if picked.len() >= top_n {
            break;
        }
        if seen_themes.insert(summary.ui.primary_theme.as_str()) {
            picked.push(index);
        }
    }
    for index in 0..ranked.len() {
        if picked.len() >= top_n {
            break;
        }
        if !picked.contains(&index) {
            picked.push(index);
        }
    }

    picked.into_iter().map(|index| ranked[index].clone()).collect()
}

/// Marks thematic continuation between adjacent selected windows.
///
/// Adjacency is judged in time order over the selected set, not in ranking
/// order. A continuation window gets `isContinuation = true` and its first
/// non-primary display theme promoted to the front, so it surfaces a
/// secondary angle instead of repeating the headline.
pub fn mark_continuations(selected: &mut [WindowSummary]) {
    let mut order: Vec<usize> = (0..selected.len()).collect();
    order.sort_by(|&a, &b| {
        selected[a]
            .start
            .cmp(&selected[b].start)
            .then_with(|| selected[a].window_id.cmp(&selected[b].window_id))
    });

    let mut previous_theme: Option<String> = None;
    for &index in &order {
        let primary = selected[index].ui.primary_theme.clone();
        if previous_theme.as_deref() == Some(primary.as_str()) {
            let ui = &mut selected[index].ui;
            ui.is_continuation = true;
            if let Some(position) = ui.display_themes.iter().position(|t| *t != primary) {
                let promoted = ui.display_themes.remove(position);
                ui.display_themes.insert(0, promoted);
            }
        }
        previous_theme = Some(primary);
    }
}
