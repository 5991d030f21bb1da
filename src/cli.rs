use crate::config::load_config;
use crate::options::parse_options;
use crate::render::write_output;
use crate::service::HeatmapService;
use crate::source::{ActivitySource, JsonFileSource, StaticSource, parse_activity_json};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "heatmap", version, about = "Render daily activity as a calendar heatmap")]
pub struct Args {
    /// Activity JSON (daily records or raw events), or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (themes, level bounds, geometry)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Account handle shown in the footer
    #[arg(short = 'u', long = "user", default_value = "user")]
    pub user: String,

    /// Render option as KEY=VALUE, same keys as the query string (theme, days, cell_size, ...)
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Last day of the chart (YYYY-MM-DD). Defaults to today in UTC.
    #[arg(long = "today")]
    pub today: Option<NaiveDate>,

    /// Print the available theme ids and exit
    #[arg(long = "list-themes")]
    pub list_themes: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Json,
    Png,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    if args.list_themes {
        let ids = config.themes.ids().join("\n");
        return write_output(format!("{ids}\n").as_bytes(), args.output.as_deref());
    }

    let source = open_source(args.input.as_deref(), &args.user, &config)?;
    let mut service = HeatmapService::new(source, config);
    if let Some(today) = args.today {
        service = service.with_today(today);
    }

    let options = parse_options(&args.params);
    info!(user = %args.user, format = ?args.output_format, theme = %options.theme, days = options.days, "rendering heatmap");

    match args.output_format {
        OutputFormat::Svg => {
            let svg = service.render_svg(&args.user, &options)?;
            write_output(&svg, args.output.as_deref())?;
        }
        OutputFormat::Json => {
            let json = service.render_json(&args.user, options.days)?;
            write_output(&json, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&service, &args.user, &options, &output)?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn open_source(
    input: Option<&Path>,
    user: &str,
    config: &crate::config::Config,
) -> Result<Box<dyn ActivitySource>> {
    match input {
        Some(path) if path != Path::new("-") => {
            Ok(Box::new(JsonFileSource::new(path, config.leveler)))
        }
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            let records = parse_activity_json(&buf, &config.leveler)?;
            Ok(Box::new(StaticSource::new().with_account(user, records)))
        }
    }
}

#[cfg(feature = "png")]
fn write_png<S: ActivitySource>(
    service: &HeatmapService<S>,
    user: &str,
    options: &crate::options::RenderOptions,
    output: &Path,
) -> Result<()> {
    let layout = service.layout(user, options)?;
    crate::render::write_output_png(&layout, output, &service.config().render)
}

#[cfg(not(feature = "png"))]
fn write_png<S: ActivitySource>(
    _service: &HeatmapService<S>,
    _user: &str,
    _options: &crate::options::RenderOptions,
    _output: &Path,
) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
