mod labels;
mod types;

pub use types::*;

use labels::{day_labels, month_labels};

use crate::config::LayoutConfig;
use crate::grid::CalendarGrid;
use crate::options::RenderOptions;
use crate::theme::Theme;

/// Computes pixel geometry for `grid` under one set of render options.
pub fn compute_layout(
    grid: &CalendarGrid,
    handle: &str,
    options: &RenderOptions,
    theme: Theme,
    config: &LayoutConfig,
) -> Layout {
    let cell_size = options.cell_size as i32;
    let step = cell_size + config.cell_margin;
    let cells_x = if options.hide_labels {
        config.compact_margin
    } else {
        config.label_margin
    };
    let cells_y = config.top_margin;

    let cells_width = grid.columns as i32 * step;
    let cells_height = grid.rows() as i32 * step;

    let mut width = cells_x + cells_width + config.right_padding;
    if !options.hide_legend {
        width = width.max(config.legend_min_width);
    }
    let bottom = if options.hide_total && options.hide_legend {
        config.compact_bottom_margin
    } else {
        config.bottom_margin
    };
    let height = cells_y + cells_height + bottom;

    let cells = grid
        .days
        .iter()
        .map(|day| GridCell {
            column: day.column,
            row: day.row,
            x: day.column as i32 * step,
            y: day.row as i32 * step,
            width: options.cell_size,
            height: options.cell_size,
            radius: options.cell_radius,
            color: theme.color_for(day.level).to_string(),
            date: day.date.format("%Y-%m-%d").to_string(),
            label: day.date.format("%b %-d, %Y").to_string(),
            count: day.count,
        })
        .collect();

    let (month_labels, day_labels) = if options.hide_labels {
        (Vec::new(), Vec::new())
    } else {
        (
            month_labels(grid, cells_x, step, config),
            day_labels(step, config),
        )
    };

    let grid_bottom = cells_y + cells_height;
    let total_count = grid.total_count();

    let footer = (!options.hide_total).then(|| FooterLayout {
        x: cells_x,
        y: grid_bottom + config.footer_offset,
        text: match options.title() {
            Some(title) => title.to_string(),
            None => format!("@{handle} Activity • {total_count} total"),
        },
    });

    let legend = (!options.hide_legend).then(|| legend_layout(&theme, width, grid_bottom, config));

    Layout {
        width,
        height,
        background_radius: config.background_radius,
        cells_x,
        cells_y,
        cells,
        month_labels,
        day_labels,
        legend,
        footer,
        font_family: options.font_family().to_string(),
        font_sizes: FontSizes {
            month: config.font_size,
            day: config.day_label_font_size,
            title: config.title_font_size,
            legend: config.legend_font_size,
        },
        theme,
        total_count,
    }
}

fn legend_layout(theme: &Theme, width: i32, grid_bottom: i32, config: &LayoutConfig) -> LegendLayout {
    let swatches = theme
        .colors
        .iter()
        .enumerate()
        .map(|(idx, color)| LegendSwatch {
            x: idx as i32 * config.legend_swatch_step,
            y: 0,
            size: config.legend_swatch_size,
            radius: config.legend_swatch_radius,
            color: color.clone(),
        })
        .collect();
    LegendLayout {
        x: width - config.legend_inset,
        y: grid_bottom + config.legend_offset,
        less: TextLabel {
            x: config.legend_less_x,
            y: config.legend_caption_y,
            text: "Less".to_string(),
        },
        more: TextLabel {
            x: config.legend_more_x,
            y: config.legend_caption_y,
            text: "More".to_string(),
        },
        swatches,
    }
}
