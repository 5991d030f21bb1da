use std::collections::BTreeMap;

use activity_heatmap::source::parse_activity_json;
use activity_heatmap::{Config, Leveler, parse_options, render_heatmap_svg};
use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

fn to_js(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Query-style options arrive as a flat JSON object; non-string values are
/// stringified so `{"days": 30}` and `{"days": "30"}` agree.
fn parse_params(raw: Option<String>) -> Result<BTreeMap<String, String>, String> {
    let Some(raw) = raw else {
        return Ok(BTreeMap::new());
    };
    let values: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(&raw).map_err(|error| error.to_string())?;
    Ok(values
        .into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(text) => (key, text),
            other => (key, other.to_string()),
        })
        .collect())
}

fn render(
    activity_json: &str,
    handle: &str,
    today: &str,
    options_json: Option<String>,
) -> Result<String, String> {
    let today = NaiveDate::parse_from_str(today, "%Y-%m-%d").map_err(|error| error.to_string())?;
    let records =
        parse_activity_json(activity_json, &Leveler::default()).map_err(|error| error.to_string())?;
    let options = parse_options(&parse_params(options_json)?);
    Ok(render_heatmap_svg(&records, handle, &options, today))
}

/// Renders an activity heatmap. `today` is `YYYY-MM-DD`; the browser clock is
/// never consulted.
#[wasm_bindgen]
pub fn render_activity_svg(
    activity_json: &str,
    handle: &str,
    today: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    render(activity_json, handle, today, options_json).map_err(to_js)
}

#[wasm_bindgen]
pub fn list_themes() -> Vec<String> {
    Config::default()
        .themes
        .ids()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{parse_params, render};

    #[test]
    fn renders_events_with_numeric_options() {
        let activity = r#"[{"kind":"push","date":"2024-06-05","count":4}]"#;
        let svg = render(
            activity,
            "alice",
            "2024-06-05",
            Some(r#"{"days": 30, "theme": "nord", "hide_legend": true}"#.to_string()),
        )
        .expect("renders");

        assert!(svg.contains("<svg"));
        assert!(svg.contains("@alice Activity • 4 total"));
        assert!(!svg.contains("Less"));
    }

    #[test]
    fn rejects_bad_dates_and_options() {
        assert!(render("[]", "alice", "June 5", None).is_err());
        assert!(render("[]", "alice", "2024-06-05", Some("[1]".to_string())).is_err());
        assert!(parse_params(None).expect("empty").is_empty());
    }
}
