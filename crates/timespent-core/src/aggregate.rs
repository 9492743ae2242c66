use serde::Serialize;

use crate::color::ColorKey;
use crate::format::format_duration;
use crate::geometry::ScreenMode;
use crate::keywords::KeywordRegistry;
use crate::merge::{group_by_color, merge_past_event_colors};
use crate::page::EventChip;

/// Matching events shorter than this count for nothing in keyword totals.
pub const KEYWORD_MIN_EVENT_MINUTES: f64 = 15.0;

/// One legend entry handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub label: String,
    /// Dot color: a page color key or a named CSS color for keywords.
    pub color: ColorKey,
    pub duration_minutes: f64,
    pub formatted_duration: String,
}

/// Total time per calendar color, past-event shades folded into their
/// category, longest first.
pub fn compute_color_rows(chips: &[EventChip], mode: ScreenMode) -> Vec<Row> {
    let groups = group_by_color(chips.iter(), |chip| chip.color_key());
    let merged = merge_past_event_colors(groups);

    let mut rows: Vec<Row> = merged
        .into_iter()
        .map(|group| {
            let duration_minutes: f64 = group.events.iter().map(|chip| chip.minutes(mode)).sum();
            let formatted_duration = format_duration(duration_minutes);
            Row {
                label: formatted_duration.clone(),
                color: group.key,
                duration_minutes,
                formatted_duration,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.duration_minutes.total_cmp(&a.duration_minutes));
    rows
}

/// Total time of events whose text contains each registered keyword, in
/// registration order. Keywords with nothing counted are left out.
///
/// Each matching event counts in whole minutes and only from 15 minutes up.
/// An event matching several keywords counts toward each of them.
pub fn compute_keyword_rows(chips: &[EventChip], mode: ScreenMode, registry: &KeywordRegistry) -> Vec<Row> {
    let mut totals: Vec<f64> = vec![0.0; registry.len()];

    for chip in chips {
        for (index, keyword) in registry.iter().enumerate() {
            if !chip.text.contains(keyword.text.as_str()) {
                continue;
            }
            let mut minutes = chip.minutes(mode).trunc();
            if minutes < KEYWORD_MIN_EVENT_MINUTES {
                minutes = 0.0;
            }
            totals[index] += minutes;
        }
    }

    registry
        .iter()
        .zip(totals)
        .filter(|(_, total)| *total != 0.0)
        .map(|(keyword, total)| {
            let formatted_duration = format_duration(total);
            Row {
                label: format!("{} - {}", keyword.text, formatted_duration),
                color: ColorKey::new(keyword.color.clone()),
                duration_minutes: total,
                formatted_duration,
            }
        })
        .collect()
}
