use crate::activity::{ActivityReport, DailyActivity, index_by_date};
use crate::config::Config;
use crate::error::HeatmapError;
use crate::grid::{build_grid, clamp_window};
use crate::layout::{Layout, compute_layout};
use crate::options::RenderOptions;
use crate::render::{render_json, render_svg, render_themes_json};
use crate::source::ActivitySource;
use crate::theme::ThemeRegistry;
use chrono::{NaiveDate, Utc};

/// Rendering entry points over an injected activity source.
///
/// Holds no mutable state; share it across threads behind an `Arc` when the
/// source allows.
pub struct HeatmapService<S> {
    source: S,
    config: Config,
    today: Option<NaiveDate>,
}

impl<S: ActivitySource> HeatmapService<S> {
    pub fn new(source: S, config: Config) -> Self {
        Self {
            source,
            config,
            today: None,
        }
    }

    /// Pins "today" instead of reading the UTC clock on every render.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn themes(&self) -> &ThemeRegistry {
        &self.config.themes
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    fn fetch(&self, handle: &str, days: u32) -> Result<Vec<DailyActivity>, HeatmapError> {
        self.source
            .fetch_daily_activity(handle, days)
            .map_err(|source| {
                tracing::warn!(handle, days, error = %source, "activity fetch failed");
                HeatmapError::Upstream {
                    handle: handle.to_string(),
                    source,
                }
            })
    }

    /// Fetches activity and computes the layout without serializing it.
    pub fn layout(&self, handle: &str, options: &RenderOptions) -> Result<Layout, HeatmapError> {
        let options = options.clone().normalized();
        let records = self.fetch(handle, options.days)?;
        Ok(layout_records(&records, handle, &options, self.today(), &self.config))
    }

    pub fn render_svg(&self, handle: &str, options: &RenderOptions) -> Result<Vec<u8>, HeatmapError> {
        let layout = self.layout(handle, options)?;
        tracing::debug!(
            handle,
            theme = %layout.theme.id,
            cells = layout.cells.len(),
            total = layout.total_count,
            width = layout.width,
            height = layout.height,
            "rendered svg heatmap"
        );
        Ok(render_svg(&layout).into_bytes())
    }

    pub fn render_json(&self, handle: &str, days: u32) -> Result<Vec<u8>, HeatmapError> {
        let days = clamp_window(days);
        let records = self.fetch(handle, days)?;
        let report = ActivityReport::new(handle, days, self.today(), &records);
        tracing::debug!(handle, days, records = report.activity.len(), "rendered activity json");
        render_json(&report)
    }

    pub fn list_themes(&self) -> Vec<&str> {
        self.config.themes.ids()
    }

    pub fn themes_json(&self) -> Result<Vec<u8>, HeatmapError> {
        render_themes_json(&self.config.themes)
    }
}

/// Pure pipeline from fetched records to layout: grid, theme, geometry.
pub fn layout_records(
    records: &[DailyActivity],
    handle: &str,
    options: &RenderOptions,
    today: NaiveDate,
    config: &Config,
) -> Layout {
    let activity = index_by_date(records);
    let grid = build_grid(&activity, options.days, today, &config.leveler);
    let theme = config.themes.resolve_options(options);
    compute_layout(&grid, handle, options, theme, &config.layout)
}
