use std::path::{Path, PathBuf};

use activity_heatmap::source::parse_activity_json;
use activity_heatmap::{
    ActivityReport, Config, DailyActivity, HeatmapService, JsonFileSource, Leveler, layout_records, load_config,
    parse_options, render_json, render_svg,
};
use chrono::NaiveDate;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 5).expect("valid date")
}

fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn assert_valid_svg(svg: &str, case: &str) {
    assert!(svg.starts_with("<svg"), "{case}: missing <svg tag");
    assert!(svg.ends_with("</svg>"), "{case}: missing </svg tag");
    assert_eq!(
        svg.matches("<g ").count(),
        svg.matches("</g>").count(),
        "{case}: unbalanced groups"
    );
}

fn day_cells(svg: &str) -> usize {
    svg.matches("class=\"day\"").count()
}

#[test]
fn renders_daily_fixture_for_full_year() {
    let service = HeatmapService::new(
        JsonFileSource::new(fixture("daily.json"), Leveler::default()),
        Config::default(),
    )
    .with_today(today());
    let svg = service
        .render_svg("alice", &parse_options(&params(&[])))
        .expect("render");
    let svg = String::from_utf8(svg).expect("utf8");

    assert_valid_svg(&svg, "daily");
    assert!(day_cells(&svg) >= 365);
    // The 2023 record sits outside the trailing year.
    assert!(svg.contains("@alice Activity • 24 total"));
    assert!(!svg.contains("data-date=\"2023-01-15\""));
    assert!(svg.contains("fill=\"#39d353\" rx=\"2\" data-date=\"2024-06-04\" data-count=\"12\""));
    assert!(svg.contains("fill=\"#006d32\" rx=\"2\" data-date=\"2024-05-28\" data-count=\"4\""));
    assert!(svg.contains("<title>Jun 4, 2024: 12 activities</title>"));
}

#[test]
fn short_window_is_padded_to_sunday() {
    let records =
        parse_activity_json(&std::fs::read_to_string(fixture("daily.json")).expect("read"), &Leveler::default())
            .expect("parse");
    let options = parse_options(&params(&[("days", "7"), ("hide_legend", "true")]));
    let layout = layout_records(&records, "alice", &options, today(), &Config::default());
    let svg = render_svg(&layout);

    assert_valid_svg(&svg, "week");
    assert_eq!(day_cells(&svg), 11);
    assert!(svg.contains("data-date=\"2024-05-26\""));
    assert!(svg.contains("data-date=\"2024-06-05\""));
    assert!(!svg.contains("data-date=\"2024-06-06\""));
    assert!(!svg.contains("Less"));
}

#[test]
fn events_fixture_with_json5_config() {
    let config = load_config(Some(fixture("config.json5").as_path())).expect("config loads");
    let service = HeatmapService::new(
        JsonFileSource::new(fixture("events.json"), config.leveler),
        config,
    )
    .with_today(today());

    let svg = service
        .render_svg("alice", &parse_options(&params(&[("days", "30"), ("theme", "Brand")])))
        .expect("render");
    let svg = String::from_utf8(svg).expect("utf8");
    // Unknown ids fall back to the configured default.
    let fallback = service
        .render_svg("alice", &parse_options(&params(&[("days", "30"), ("theme", "nope")])))
        .expect("render");
    assert_eq!(svg.as_bytes(), fallback.as_slice());

    assert_valid_svg(&svg, "events");
    assert!(svg.contains("fill=\"#101010\""));
    assert!(svg.contains("fill: #fafafa;"));
    assert!(svg.contains("@alice Activity • 17 total"));
    assert!(svg.contains("fill=\"#50a050\" rx=\"2\" data-date=\"2024-06-03\" data-count=\"4\""));
    assert!(svg.contains("fill=\"#407040\" rx=\"2\" data-date=\"2024-06-04\" data-count=\"2\""));
    assert!(svg.contains("fill=\"#60e060\" rx=\"2\" data-date=\"2024-06-05\" data-count=\"11\""));
    assert_eq!(service.list_themes().len(), 17);
}

#[test]
fn query_parameters_drive_every_toggle() {
    let records: Vec<DailyActivity> = Vec::new();
    let options = parse_options(&params(&[
        ("theme", "github-light"),
        ("cell_size", "99"),
        ("hide_labels", "1"),
        ("hide_total", "true"),
        ("hide_legend", "yes"),
        ("title", "Deploys <prod>"),
    ]));
    let layout = layout_records(&records, "alice", &options, today(), &Config::default());
    let svg = render_svg(&layout);

    assert_valid_svg(&svg, "toggles");
    assert!(svg.contains("fill=\"#ffffff\""));
    assert!(svg.contains("width=\"20\" height=\"20\""));
    assert!(!svg.contains("class=\"day-label\""));
    assert!(!svg.contains("class=\"month-label\""));
    assert!(!svg.contains("class=\"title\">"));
    // "yes" is not a recognised truthy value.
    assert!(svg.contains("Less"));
}

#[test]
fn json_report_matches_window() {
    let records =
        parse_activity_json(&std::fs::read_to_string(fixture("daily.json")).expect("read"), &Leveler::default())
            .expect("parse");
    let report = ActivityReport::new("alice", 365, today(), &records);
    let bytes = render_json(&report).expect("serializes");
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");

    assert_eq!(value["username"], "alice");
    assert_eq!(value["totals"]["activities"], 24);
    assert_eq!(value["totals"]["pushes"], 16);
    assert_eq!(value["activity"].as_array().map(Vec::len), Some(4));
    assert!(bytes.ends_with(b"\n"));
}

#[test]
fn renders_are_deterministic_across_instances() {
    let render = || {
        let service = HeatmapService::new(
            JsonFileSource::new(fixture("daily.json"), Leveler::default()),
            Config::default(),
        )
        .with_today(today());
        service
            .render_svg("alice", &parse_options(&params(&[("theme", "dracula")])))
            .expect("render")
    };
    assert_eq!(render(), render());
}

#[cfg(feature = "png")]
#[test]
fn png_output_has_signature() {
    let records =
        parse_activity_json(&std::fs::read_to_string(fixture("daily.json")).expect("read"), &Leveler::default())
            .expect("parse");
    let config = Config::default();
    let options = parse_options(&params(&[("days", "30")]));
    let layout = layout_records(&records, "alice", &options, today(), &config);
    let path = std::env::temp_dir().join(format!("heatmap-suite-{}.png", std::process::id()));

    activity_heatmap::render::write_output_png(&layout, &path, &config.render).expect("png");
    let bytes = std::fs::read(&path).expect("png written");
    let _ = std::fs::remove_file(&path);
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}
