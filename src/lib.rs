pub mod activity;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
pub mod layout;
pub mod level;
pub mod options;
pub mod render;
pub mod service;
pub mod source;
pub mod theme;

pub use activity::{ActivityEvent, ActivityReport, Breakdown, DailyActivity, EventKind};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use error::{FetchError, HeatmapError};
pub use grid::{CalendarGrid, build_grid};
pub use layout::{Layout, compute_layout};
pub use level::{Level, Leveler};
pub use options::{RenderOptions, parse_options};
pub use render::{render_json, render_svg};
pub use service::{HeatmapService, layout_records};
pub use source::{ActivitySource, JsonFileSource, StaticSource};
pub use theme::{Theme, ThemeRegistry};

/// Renders `records` straight to SVG with default configuration.
pub fn render_heatmap_svg(
    records: &[DailyActivity],
    handle: &str,
    options: &RenderOptions,
    today: chrono::NaiveDate,
) -> String {
    let options = options.clone().normalized();
    let layout = layout_records(records, handle, &options, today, &Config::default());
    render_svg(&layout)
}
