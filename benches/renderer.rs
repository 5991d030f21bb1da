use activity_heatmap::activity::{DailyActivity, index_by_date};
use activity_heatmap::config::Config;
use activity_heatmap::grid::build_grid;
use activity_heatmap::layout::compute_layout;
use activity_heatmap::options::parse_options;
use activity_heatmap::render::render_svg;
use activity_heatmap::service::layout_records;
use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const WINDOWS: [u32; 4] = [7, 30, 90, 365];

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 28).expect("valid date")
}

// Deterministic pseudo-random counts with some idle days.
fn synthetic_activity(days: u64) -> Vec<DailyActivity> {
    let mut state = 0x2545_f491_u64;
    (0..days)
        .filter_map(|offset| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let count = state >> 59;
            if count == 0 {
                return None;
            }
            let date = today().checked_sub_days(Days::new(offset))?;
            let mut record = DailyActivity::empty(date);
            record.count = count;
            record.breakdown.pushes = count;
            Some(record)
        })
        .collect()
}

fn window_params(days: u32) -> Vec<(String, String)> {
    vec![("days".to_string(), days.to_string())]
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");
    let activity = index_by_date(&synthetic_activity(400));
    let config = Config::default();
    for days in WINDOWS {
        group.bench_with_input(BenchmarkId::from_parameter(days), &days, |b, &days| {
            b.iter(|| {
                let grid = build_grid(black_box(&activity), days, today(), &config.leveler);
                black_box(grid.days.len());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let activity = index_by_date(&synthetic_activity(400));
    let config = Config::default();
    for days in WINDOWS {
        let options = parse_options(&window_params(days));
        let grid = build_grid(&activity, options.days, today(), &config.leveler);
        let theme = config.themes.resolve_options(&options);
        group.bench_with_input(BenchmarkId::from_parameter(days), &grid, |b, grid| {
            b.iter(|| {
                let layout = compute_layout(
                    black_box(grid),
                    "bench",
                    &options,
                    theme.clone(),
                    &config.layout,
                );
                black_box(layout.cells.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let records = synthetic_activity(400);
    let config = Config::default();
    for days in WINDOWS {
        let options = parse_options(&window_params(days));
        let layout = layout_records(&records, "bench", &options, today(), &config);
        group.bench_with_input(BenchmarkId::from_parameter(days), &layout, |b, layout| {
            b.iter(|| {
                let svg = render_svg(black_box(layout));
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let records = synthetic_activity(400);
    let config = Config::default();
    for days in WINDOWS {
        let params = window_params(days);
        group.bench_with_input(BenchmarkId::from_parameter(days), &params, |b, params| {
            b.iter(|| {
                let options = parse_options(black_box(params));
                let layout = layout_records(&records, "bench", &options, today(), &config);
                let svg = render_svg(&layout);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grid, bench_layout, bench_render, bench_end_to_end);
criterion_main!(benches);
