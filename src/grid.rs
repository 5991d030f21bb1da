use crate::activity::DailyActivity;
use crate::level::{Level, Leveler};
use chrono::{Datelike, Days, NaiveDate};
use std::collections::BTreeMap;

pub const MAX_WINDOW_DAYS: u32 = 365;
pub const DAYS_PER_WEEK: u32 = 7;

/// Window sizes outside `1..=365` fall back to a full year.
pub fn clamp_window(days: u32) -> u32 {
    if days == 0 || days > MAX_WINDOW_DAYS {
        MAX_WINDOW_DAYS
    } else {
        days
    }
}

/// First day of the trailing window, before week alignment.
pub fn window_start(today: NaiveDate, days: u32) -> NaiveDate {
    let days = clamp_window(days);
    today
        .checked_sub_days(Days::new(u64::from(days - 1)))
        .unwrap_or(NaiveDate::MIN)
}

/// Walks back to the Sunday that opens the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday();
    date.checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridDay {
    pub date: NaiveDate,
    /// Week index, 0 is the oldest week.
    pub column: u32,
    /// Weekday index, 0 is Sunday.
    pub row: u32,
    pub count: u64,
    pub level: Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBoundary {
    pub column: u32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct CalendarGrid {
    /// Week-aligned first day of the grid.
    pub start: NaiveDate,
    /// First day of the requested window.
    pub window_start: NaiveDate,
    pub today: NaiveDate,
    pub columns: u32,
    pub days: Vec<GridDay>,
}

impl CalendarGrid {
    pub fn rows(&self) -> u32 {
        DAYS_PER_WEEK
    }

    pub fn total_count(&self) -> u64 {
        self.days
            .iter()
            .fold(0u64, |total, day| total.saturating_add(day.count))
    }

    /// Columns where a new calendar month begins, plus column 0.
    pub fn month_boundaries(&self) -> Vec<MonthBoundary> {
        let mut boundaries = Vec::new();
        let mut current_month = None;
        for column in 0..self.columns {
            let Some(date) = self
                .start
                .checked_add_days(Days::new(u64::from(column * DAYS_PER_WEEK)))
            else {
                break;
            };
            let month = (date.year(), date.month());
            if current_month != Some(month) {
                current_month = Some(month);
                boundaries.push(MonthBoundary { column, date });
            }
        }
        boundaries
    }
}

/// Lays out every day from the week-aligned window start through `today`.
///
/// Padding days before the window start are drawn empty, so the grid total
/// matches the window total.
pub fn build_grid(
    activity: &BTreeMap<NaiveDate, DailyActivity>,
    window_days: u32,
    today: NaiveDate,
    leveler: &Leveler,
) -> CalendarGrid {
    let window_start = window_start(today, window_days);
    let start = week_start(window_start);

    let mut days = Vec::with_capacity((MAX_WINDOW_DAYS + DAYS_PER_WEEK) as usize);
    let mut column = 0;
    for date in start.iter_days().take_while(|date| *date <= today) {
        let row = date.weekday().num_days_from_sunday();
        let record = if date < window_start {
            None
        } else {
            activity.get(&date)
        };
        let (count, level) = match record {
            Some(record) => (record.count, leveler.classify(record.count, &record.breakdown)),
            None => (0, Level::NONE),
        };
        days.push(GridDay {
            date,
            column,
            row,
            count,
            level,
        });
        if row == DAYS_PER_WEEK - 1 {
            column += 1;
        }
    }

    let columns = days.last().map(|day| day.column + 1).unwrap_or(0);
    CalendarGrid {
        start,
        window_start,
        today,
        columns,
        days,
    }
}
