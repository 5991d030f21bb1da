use crate::theme::Theme;

/// One day's square, positioned relative to the cell group origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub column: u32,
    pub row: u32,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub radius: u32,
    pub color: String,
    /// ISO-8601 date.
    pub date: String,
    /// Human-readable date, e.g. "Jan 2, 2006".
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLabel {
    pub x: i32,
    pub y: i32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendSwatch {
    pub x: i32,
    pub y: i32,
    pub size: i32,
    pub radius: i32,
    pub color: String,
}

/// Legend group; child coordinates are relative to `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendLayout {
    pub x: i32,
    pub y: i32,
    pub less: TextLabel,
    pub more: TextLabel,
    pub swatches: Vec<LegendSwatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterLayout {
    pub x: i32,
    pub y: i32,
    /// Raw text. May carry the account handle or a caller-supplied title, so
    /// anything serializing it must escape it first.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSizes {
    pub month: u32,
    pub day: u32,
    pub title: u32,
    pub legend: u32,
}

/// Complete geometry for one render. Text fields hold unescaped input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub width: i32,
    pub height: i32,
    pub background_radius: i32,
    pub cells_x: i32,
    pub cells_y: i32,
    pub cells: Vec<GridCell>,
    pub month_labels: Vec<TextLabel>,
    pub day_labels: Vec<TextLabel>,
    pub legend: Option<LegendLayout>,
    pub footer: Option<FooterLayout>,
    pub theme: Theme,
    pub font_family: String,
    pub font_sizes: FontSizes,
    pub total_count: u64,
}
