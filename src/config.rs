use crate::level::Leveler;
use crate::theme::{RAMP_STEPS, Theme, ThemeRegistry};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Pixel constants for the heatmap. Embed snippets depend on these staying
/// stable, so the defaults mirror the published image geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub cell_margin: i32,
    pub label_margin: i32,
    pub compact_margin: i32,
    pub right_padding: i32,
    pub top_margin: i32,
    pub bottom_margin: i32,
    pub compact_bottom_margin: i32,
    pub background_radius: i32,
    pub month_label_y: i32,
    pub day_label_x: i32,
    pub day_label_baseline: i32,
    pub footer_offset: i32,
    pub legend_offset: i32,
    pub legend_inset: i32,
    pub legend_min_width: i32,
    pub legend_swatch_size: i32,
    pub legend_swatch_step: i32,
    pub legend_swatch_radius: i32,
    pub legend_less_x: i32,
    pub legend_more_x: i32,
    pub legend_caption_y: i32,
    pub font_size: u32,
    pub day_label_font_size: u32,
    pub title_font_size: u32,
    pub legend_font_size: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_margin: 3,
            label_margin: 40,
            compact_margin: 10,
            right_padding: 20,
            top_margin: 25,
            bottom_margin: 30,
            compact_bottom_margin: 10,
            background_radius: 6,
            month_label_y: 15,
            day_label_x: 5,
            day_label_baseline: 8,
            footer_offset: 18,
            legend_offset: 5,
            legend_inset: 120,
            legend_min_width: 150,
            legend_swatch_size: 11,
            legend_swatch_step: 14,
            legend_swatch_radius: 2,
            legend_less_x: -25,
            legend_more_x: 75,
            legend_caption_y: 10,
            font_size: 10,
            day_label_font_size: 9,
            title_font_size: 11,
            legend_font_size: 9,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Raster scale factor for PNG output.
    pub scale: f32,
    /// Font used when rasterizing text that names no installed family.
    pub fallback_font: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 2.0,
            fallback_font: "Helvetica".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub themes: ThemeRegistry,
    pub leveler: Leveler,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            themes: ThemeRegistry::builtin(),
            leveler: Leveler::default(),
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeFile {
    name: Option<String>,
    bg_color: Option<String>,
    text_color: Option<String>,
    colors: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    cell_margin: Option<i32>,
    label_margin: Option<i32>,
    compact_margin: Option<i32>,
    right_padding: Option<i32>,
    top_margin: Option<i32>,
    bottom_margin: Option<i32>,
    compact_bottom_margin: Option<i32>,
    background_radius: Option<i32>,
    legend_min_width: Option<i32>,
    font_size: Option<u32>,
    day_label_font_size: Option<u32>,
    title_font_size: Option<u32>,
    legend_font_size: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    scale: Option<f32>,
    fallback_font: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    default_theme: Option<String>,
    #[serde(default)]
    themes: BTreeMap<String, ThemeFile>,
    level_bounds: Option<[u64; 3]>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("invalid config {}", path.display()))
}

/// Strict JSON first, then JSON5 for hand-written files with comments.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents).map_err(|json5_err| {
            anyhow::anyhow!("not JSON ({json_err}) or JSON5 ({json5_err})")
        })?,
    };

    let mut config = Config::default();

    for (id, file) in parsed.themes {
        let count = file.colors.len();
        let colors: [String; RAMP_STEPS] = file.colors.try_into().map_err(|_| {
            anyhow::anyhow!("theme '{id}' needs exactly {RAMP_STEPS} colors, got {count}")
        })?;
        let default = config.themes.default_theme();
        let theme = Theme {
            id: id.clone(),
            name: file.name.unwrap_or_else(|| id.clone()),
            background: file.bg_color.unwrap_or_else(|| default.background.clone()),
            text_color: file.text_color.unwrap_or_else(|| default.text_color.clone()),
            colors,
        };
        config.themes = config.themes.with_theme(theme);
    }

    if let Some(id) = parsed.default_theme.as_deref() {
        if config.themes.get(id).is_none() {
            anyhow::bail!("default theme '{id}' is not defined");
        }
        config.themes = config.themes.with_default(id);
    }

    if let Some(bounds) = parsed.level_bounds {
        config.leveler = Leveler::new(bounds)?;
    }

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        if let Some(v) = layout.cell_margin {
            target.cell_margin = v.max(0);
        }
        if let Some(v) = layout.label_margin {
            target.label_margin = v.max(0);
        }
        if let Some(v) = layout.compact_margin {
            target.compact_margin = v.max(0);
        }
        if let Some(v) = layout.right_padding {
            target.right_padding = v.max(0);
        }
        if let Some(v) = layout.top_margin {
            target.top_margin = v.max(0);
        }
        if let Some(v) = layout.bottom_margin {
            target.bottom_margin = v.max(0);
        }
        if let Some(v) = layout.compact_bottom_margin {
            target.compact_bottom_margin = v.max(0);
        }
        if let Some(v) = layout.background_radius {
            target.background_radius = v.max(0);
        }
        if let Some(v) = layout.legend_min_width {
            target.legend_min_width = v.max(0);
        }
        if let Some(v) = layout.font_size {
            target.font_size = v;
        }
        if let Some(v) = layout.day_label_font_size {
            target.day_label_font_size = v;
        }
        if let Some(v) = layout.title_font_size {
            target.title_font_size = v;
        }
        if let Some(v) = layout.legend_font_size {
            target.legend_font_size = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.scale {
            if v.is_finite() && v > 0.0 {
                config.render.scale = v;
            }
        }
        if let Some(v) = render.fallback_font {
            config.render.fallback_font = v;
        }
    }

    Ok(config)
}
