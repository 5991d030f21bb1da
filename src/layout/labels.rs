use crate::config::LayoutConfig;
use crate::grid::CalendarGrid;

use super::TextLabel;

/// Weekday rows that carry a label (Sunday is row 0).
const LABELED_WEEKDAYS: [(i32, &str); 3] = [(1, "Mon"), (3, "Wed"), (5, "Fri")];

pub(super) fn month_labels(
    grid: &CalendarGrid,
    cells_x: i32,
    step: i32,
    config: &LayoutConfig,
) -> Vec<TextLabel> {
    grid.month_boundaries()
        .into_iter()
        .map(|boundary| TextLabel {
            x: cells_x + boundary.column as i32 * step,
            y: config.month_label_y,
            text: boundary.date.format("%b").to_string(),
        })
        .collect()
}

pub(super) fn day_labels(step: i32, config: &LayoutConfig) -> Vec<TextLabel> {
    LABELED_WEEKDAYS
        .iter()
        .map(|(row, text)| TextLabel {
            x: config.day_label_x,
            y: config.top_margin + row * step + config.day_label_baseline,
            text: (*text).to_string(),
        })
        .collect()
}
