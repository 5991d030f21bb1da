use crate::activity::{ActivityEvent, DailyActivity, aggregate_events};
use crate::error::FetchError;
use crate::level::Leveler;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Supplies per-day aggregates for an account.
///
/// Implementations return every record they have for the trailing window;
/// records outside it are tolerated and clipped by the caller. Any failure
/// aborts the render, so partial results must be reported as errors.
pub trait ActivitySource {
    fn fetch_daily_activity(
        &self,
        handle: &str,
        window_days: u32,
    ) -> Result<Vec<DailyActivity>, FetchError>;
}

impl<T: ActivitySource + ?Sized> ActivitySource for &T {
    fn fetch_daily_activity(
        &self,
        handle: &str,
        window_days: u32,
    ) -> Result<Vec<DailyActivity>, FetchError> {
        (**self).fetch_daily_activity(handle, window_days)
    }
}

impl<T: ActivitySource + ?Sized> ActivitySource for Box<T> {
    fn fetch_daily_activity(
        &self,
        handle: &str,
        window_days: u32,
    ) -> Result<Vec<DailyActivity>, FetchError> {
        (**self).fetch_daily_activity(handle, window_days)
    }
}

/// In-memory records keyed by account handle.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    accounts: HashMap<String, Vec<DailyActivity>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, handle: &str, records: Vec<DailyActivity>) -> Self {
        self.accounts.insert(handle.to_string(), records);
        self
    }
}

impl ActivitySource for StaticSource {
    fn fetch_daily_activity(
        &self,
        handle: &str,
        _window_days: u32,
    ) -> Result<Vec<DailyActivity>, FetchError> {
        self.accounts
            .get(handle)
            .cloned()
            .ok_or_else(|| FetchError::UnknownAccount(handle.to_string()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ActivityFile {
    // Events first: a daily record never carries `kind`, an event always does.
    Events(Vec<ActivityEvent>),
    Daily(Vec<DailyActivity>),
}

/// Parses either daily records or raw events from a JSON array.
pub fn parse_activity_json(input: &str, leveler: &Leveler) -> Result<Vec<DailyActivity>, FetchError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<ActivityFile>(trimmed) {
        Ok(ActivityFile::Events(events)) => Ok(aggregate_events(&events, leveler)),
        Ok(ActivityFile::Daily(records)) => Ok(records),
        // Re-parse as the shape the input looks like so the error names the
        // offending field.
        Err(_) if looks_like_events(trimmed) => {
            let events = serde_json::from_str::<Vec<ActivityEvent>>(trimmed)?;
            Ok(aggregate_events(&events, leveler))
        }
        Err(_) => Ok(serde_json::from_str::<Vec<DailyActivity>>(trimmed)?),
    }
}

fn looks_like_events(input: &str) -> bool {
    input.contains("\"kind\"") || input.contains("\"event_type\"")
}

/// Reads one account's activity from a JSON file. Every handle maps to it.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    leveler: Leveler,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>, leveler: Leveler) -> Self {
        Self {
            path: path.into(),
            leveler,
        }
    }
}

impl ActivitySource for JsonFileSource {
    fn fetch_daily_activity(
        &self,
        handle: &str,
        window_days: u32,
    ) -> Result<Vec<DailyActivity>, FetchError> {
        tracing::debug!(path = %self.path.display(), handle, window_days, "reading activity file");
        let contents = std::fs::read_to_string(&self.path)?;
        parse_activity_json(&contents, &self.leveler)
    }
}
