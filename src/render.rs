use crate::activity::ActivityReport;
use crate::error::HeatmapError;
use crate::layout::{Layout, LegendLayout, TextLabel};
use crate::theme::ThemeRegistry;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SvgSizing {
    /// `width="100%"`, height follows the viewBox aspect ratio.
    #[default]
    Responsive,
    /// Pixel width and height equal to the viewBox.
    Fixed,
}

pub fn render_svg(layout: &Layout) -> String {
    render_svg_sized(layout, SvgSizing::Responsive)
}

pub fn render_svg_sized(layout: &Layout, sizing: SvgSizing) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;
    let theme = &layout.theme;

    match sizing {
        SvgSizing::Responsive => svg.push_str(&format!(
            "<svg width=\"100%\" height=\"auto\" viewBox=\"0 0 {width} {height}\" preserveAspectRatio=\"xMidYMid meet\" xmlns=\"http://www.w3.org/2000/svg\">",
        )),
        SvgSizing::Fixed => svg.push_str(&format!(
            "<svg width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" xmlns=\"http://www.w3.org/2000/svg\">",
        )),
    }

    let text_color = css_value(&theme.text_color);
    let font_family = css_value(&layout.font_family);
    let sizes = &layout.font_sizes;
    svg.push_str("<style>");
    svg.push_str(".day { shape-rendering: geometricPrecision; outline: 1px solid rgba(27, 31, 35, 0.06); outline-offset: -1px; }");
    svg.push_str(&format!(
        ".month-label {{ font-size: {}px; fill: {text_color}; font-family: {font_family}; }}",
        sizes.month
    ));
    svg.push_str(&format!(
        ".day-label {{ font-size: {}px; fill: {text_color}; font-family: {font_family}; }}",
        sizes.day
    ));
    svg.push_str(&format!(
        ".title {{ font-size: {}px; fill: {text_color}; font-family: {font_family}; font-weight: 600; }}",
        sizes.title
    ));
    svg.push_str(&format!(
        ".legend-label {{ font-size: {}px; fill: {text_color}; font-family: {font_family}; }}",
        sizes.legend
    ));
    svg.push_str("</style>");

    svg.push_str(&format!(
        "<rect width=\"{width}\" height=\"{height}\" fill=\"{}\" rx=\"{}\"/>",
        escape_xml(&theme.background),
        layout.background_radius
    ));

    for label in &layout.month_labels {
        svg.push_str(&text_svg(label, "month-label"));
    }
    for label in &layout.day_labels {
        svg.push_str(&text_svg(label, "day-label"));
    }

    svg.push_str(&format!(
        "<g transform=\"translate({}, {})\">",
        layout.cells_x, layout.cells_y
    ));
    for cell in &layout.cells {
        svg.push_str(&format!(
            "<rect class=\"day\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"{}\" data-date=\"{}\" data-count=\"{}\"><title>{}: {} activities</title></rect>",
            cell.x,
            cell.y,
            cell.width,
            cell.height,
            escape_xml(&cell.color),
            cell.radius,
            cell.date,
            cell.count,
            escape_xml(&cell.label),
            cell.count
        ));
    }
    svg.push_str("</g>");

    if let Some(footer) = &layout.footer {
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" class=\"title\">{}</text>",
            footer.x,
            footer.y,
            escape_xml(&footer.text)
        ));
    }

    if let Some(legend) = &layout.legend {
        svg.push_str(&legend_svg(legend));
    }

    svg.push_str("</svg>");
    svg
}

fn text_svg(label: &TextLabel, class: &str) -> String {
    format!(
        "<text x=\"{}\" y=\"{}\" class=\"{class}\">{}</text>",
        label.x,
        label.y,
        escape_xml(&label.text)
    )
}

fn legend_svg(legend: &LegendLayout) -> String {
    let mut out = format!("<g transform=\"translate({}, {})\">", legend.x, legend.y);
    out.push_str(&text_svg(&legend.less, "legend-label"));
    for swatch in &legend.swatches {
        out.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"{}\"/>",
            swatch.x,
            swatch.y,
            swatch.size,
            swatch.size,
            escape_xml(&swatch.color),
            swatch.radius
        ));
    }
    out.push_str(&text_svg(&legend.more, "legend-label"));
    out.push_str("</g>");
    out
}

pub fn render_json(report: &ActivityReport) -> Result<Vec<u8>, HeatmapError> {
    let mut bytes = serde_json::to_vec_pretty(report)?;
    bytes.push(b'\n');
    Ok(bytes)
}

#[derive(Serialize)]
struct ThemeEntry<'a> {
    id: &'a str,
    name: &'a str,
    bg_color: &'a str,
    text_color: &'a str,
    colors: &'a [String],
}

#[derive(Serialize)]
struct ThemeList<'a> {
    themes: Vec<ThemeEntry<'a>>,
}

pub fn render_themes_json(registry: &ThemeRegistry) -> Result<Vec<u8>, HeatmapError> {
    let list = ThemeList {
        themes: registry
            .themes()
            .map(|theme| ThemeEntry {
                id: &theme.id,
                name: &theme.name,
                bg_color: &theme.background,
                text_color: &theme.text_color,
                colors: &theme.colors,
            })
            .collect(),
    };
    let mut bytes = serde_json::to_vec_pretty(&list)?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn write_output(bytes: &[u8], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, bytes)?;
        }
        None => {
            use std::io::Write;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    layout: &Layout,
    output: &Path,
    render_cfg: &crate::config::RenderConfig,
) -> Result<()> {
    let svg = render_svg_sized(layout, SvgSizing::Fixed);
    let mut opt = usvg::Options::default();
    opt.font_family = render_cfg.fallback_font.clone();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(&svg, &opt)?;
    let size = tree.size().to_int_size();
    let scale = render_cfg.scale;
    let width = ((size.width() as f32) * scale).ceil().max(1.0) as u32;
    let height = ((size.height() as f32) * scale).ceil().max(1.0) as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate {width}x{height} pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

/// Escapes text for XML content and attribute values.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Values inside the `<style>` block cannot open or close rules.
fn css_value(input: &str) -> String {
    let stripped: String = input
        .chars()
        .filter(|ch| !matches!(ch, '{' | '}' | ';'))
        .collect();
    escape_xml(&stripped)
}
