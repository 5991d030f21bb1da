use crate::grid::{MAX_WINDOW_DAYS, clamp_window};
use crate::theme::{CUSTOM_THEME_ID, DEFAULT_THEME_ID, RAMP_STEPS};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_CELL_SIZE: u32 = 11;
pub const MAX_CELL_SIZE: u32 = 20;
pub const DEFAULT_CELL_RADIUS: u32 = 2;
pub const DEFAULT_FONT_FAMILY: &str =
    "-apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif";

static LEADING_INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").unwrap());

/// Per-request presentation options, always in range once normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub theme: String,
    pub days: u32,
    pub cell_size: u32,
    pub cell_radius: u32,
    pub hide_legend: bool,
    pub hide_total: bool,
    pub hide_labels: bool,
    pub title: Option<String>,
    pub font_family: Option<String>,
    pub bg_color: Option<String>,
    pub text_color: Option<String>,
    pub custom_colors: Option<[String; RAMP_STEPS]>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME_ID.to_string(),
            days: MAX_WINDOW_DAYS,
            cell_size: DEFAULT_CELL_SIZE,
            cell_radius: DEFAULT_CELL_RADIUS,
            hide_legend: false,
            hide_total: false,
            hide_labels: false,
            title: None,
            font_family: None,
            bg_color: None,
            text_color: None,
            custom_colors: None,
        }
    }
}

impl RenderOptions {
    pub fn normalized(mut self) -> Self {
        self.days = clamp_window(self.days);
        self.cell_size = clamp_cell_size(i64::from(self.cell_size));
        self.theme = self.theme.trim().to_ascii_lowercase();
        if self.theme.is_empty() {
            self.theme = DEFAULT_THEME_ID.to_string();
        }
        self
    }

    pub fn font_family(&self) -> &str {
        self.font_family
            .as_deref()
            .filter(|family| !family.trim().is_empty())
            .unwrap_or(DEFAULT_FONT_FAMILY)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|title| !title.is_empty())
    }
}

fn clamp_cell_size(value: i64) -> u32 {
    if value <= 0 {
        DEFAULT_CELL_SIZE
    } else {
        value.min(i64::from(MAX_CELL_SIZE)) as u32
    }
}

/// Read access to a string-to-string parameter map.
pub trait QueryParams {
    fn param(&self, key: &str) -> Option<&str>;
}

impl QueryParams for HashMap<String, String> {
    fn param(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl QueryParams for BTreeMap<String, String> {
    fn param(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Later pairs win, matching how query strings are usually folded.
impl QueryParams for [(String, String)] {
    fn param(&self, key: &str) -> Option<&str> {
        self.iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

impl QueryParams for Vec<(String, String)> {
    fn param(&self, key: &str) -> Option<&str> {
        self.as_slice().param(key)
    }
}

/// Parses the leading integer of `value`, ignoring any trailing text.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let caps = LEADING_INT_RE.captures(value)?;
    let digits = caps.get(1)?.as_str();
    match digits.parse::<i64>() {
        Ok(number) => Some(number),
        // Too many digits for i64: saturate in the direction of the sign.
        Err(_) if digits.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(value, Some("true") | Some("1"))
}

/// Builds clamped options from raw query parameters. Never fails.
pub fn parse_options<P: QueryParams + ?Sized>(params: &P) -> RenderOptions {
    let mut options = RenderOptions::default();

    if let Some(theme) = params.param("theme") {
        options.theme = theme.to_ascii_lowercase();
    }

    let days = params
        .param("days")
        .and_then(parse_leading_int)
        .unwrap_or(i64::from(MAX_WINDOW_DAYS));
    options.days = if (1..=i64::from(MAX_WINDOW_DAYS)).contains(&days) {
        days as u32
    } else {
        MAX_WINDOW_DAYS
    };

    if let Some(size) = params.param("cell_size").and_then(parse_leading_int) {
        options.cell_size = clamp_cell_size(size);
    }

    if let Some(radius) = params.param("radius").and_then(parse_leading_int) {
        options.cell_radius = if radius < 0 {
            DEFAULT_CELL_RADIUS
        } else {
            radius.min(i64::from(u32::MAX)) as u32
        };
    }

    options.hide_legend = parse_flag(params.param("hide_legend"));
    options.hide_total = parse_flag(params.param("hide_total"));
    options.hide_labels = parse_flag(params.param("hide_labels"));

    options.title = params.param("title").map(str::to_string);
    options.bg_color = params.param("bg_color").map(str::to_string);
    options.text_color = params.param("text_color").map(str::to_string);

    let colors: Vec<String> = (0..RAMP_STEPS)
        .filter_map(|idx| params.param(&format!("color{idx}")).map(str::to_string))
        .collect();
    if let Ok(colors) = <[String; RAMP_STEPS]>::try_from(colors) {
        options.custom_colors = Some(colors);
        options.theme = CUSTOM_THEME_ID.to_string();
    }

    options.normalized()
}
