use crate::level::{Level, Leveler};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Push,
    Pull,
    Build,
}

/// Per-kind counts for a single day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    #[serde(default)]
    pub pushes: u64,
    #[serde(default)]
    pub pulls: u64,
    #[serde(default)]
    pub builds: u64,
}

impl Breakdown {
    pub fn total(&self) -> u64 {
        self.pushes
            .saturating_add(self.pulls)
            .saturating_add(self.builds)
    }

    pub fn add(&mut self, kind: EventKind, count: u64) {
        let slot = match kind {
            EventKind::Push => &mut self.pushes,
            EventKind::Pull => &mut self.pulls,
            EventKind::Build => &mut self.builds,
        };
        *slot = slot.saturating_add(count);
    }

    fn merge(&mut self, other: &Breakdown) {
        self.pushes = self.pushes.saturating_add(other.pushes);
        self.pulls = self.pulls.saturating_add(other.pulls);
        self.builds = self.builds.saturating_add(other.builds);
    }
}

/// Aggregated activity for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub count: u64,
    #[serde(flatten)]
    pub breakdown: Breakdown,
    #[serde(default)]
    pub level: Level,
}

impl DailyActivity {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            count: 0,
            breakdown: Breakdown::default(),
            level: Level::NONE,
        }
    }
}

/// One raw event as recorded upstream, before aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    #[serde(alias = "event_type")]
    pub kind: EventKind,
    #[serde(alias = "event_date")]
    pub date: NaiveDate,
    #[serde(default = "default_event_count")]
    pub count: u64,
}

fn default_event_count() -> u64 {
    1
}

/// Folds raw events into one record per date, ordered by date.
pub fn aggregate_events(events: &[ActivityEvent], leveler: &Leveler) -> Vec<DailyActivity> {
    let mut days: BTreeMap<NaiveDate, Breakdown> = BTreeMap::new();
    for event in events {
        days.entry(event.date)
            .or_default()
            .add(event.kind, event.count);
    }
    days.into_iter()
        .map(|(date, breakdown)| {
            let count = breakdown.total();
            DailyActivity {
                date,
                count,
                breakdown,
                level: leveler.classify(count, &breakdown),
            }
        })
        .collect()
}

/// Indexes records by date. Duplicate dates are merged rather than dropped.
pub fn index_by_date(records: &[DailyActivity]) -> BTreeMap<NaiveDate, DailyActivity> {
    let mut map: BTreeMap<NaiveDate, DailyActivity> = BTreeMap::new();
    for record in records {
        map.entry(record.date)
            .and_modify(|existing| {
                existing.count = existing.count.saturating_add(record.count);
                existing.breakdown.merge(&record.breakdown);
                existing.level = existing.level.max(record.level);
            })
            .or_insert_with(|| record.clone());
    }
    map
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub activities: u64,
    pub pushes: u64,
    pub pulls: u64,
    pub builds: u64,
}

/// Machine-readable summary of an account's activity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityReport {
    pub username: String,
    pub days: u32,
    pub totals: Totals,
    pub activity: Vec<DailyActivity>,
}

impl ActivityReport {
    /// Keeps the records inside the trailing `days` window ending at `today`.
    pub fn new(username: &str, days: u32, today: NaiveDate, records: &[DailyActivity]) -> Self {
        let first = crate::grid::window_start(today, days);
        let activity: Vec<DailyActivity> = index_by_date(records)
            .into_values()
            .filter(|record| record.date >= first && record.date <= today)
            .collect();
        let totals = activity.iter().fold(Totals::default(), |mut totals, record| {
            totals.activities = totals.activities.saturating_add(record.count);
            totals.pushes = totals.pushes.saturating_add(record.breakdown.pushes);
            totals.pulls = totals.pulls.saturating_add(record.breakdown.pulls);
            totals.builds = totals.builds.saturating_add(record.breakdown.builds);
            totals
        });
        Self {
            username: username.to_string(),
            days,
            totals,
            activity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn aggregates_events_per_day_and_kind() {
        let events = vec![
            ActivityEvent { kind: EventKind::Push, date: date(2024, 3, 2), count: 2 },
            ActivityEvent { kind: EventKind::Pull, date: date(2024, 3, 1), count: 1 },
            ActivityEvent { kind: EventKind::Push, date: date(2024, 3, 2), count: 3 },
            ActivityEvent { kind: EventKind::Build, date: date(2024, 3, 2), count: 7 },
        ];
        let days = aggregate_events(&events, &Leveler::default());
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date(2024, 3, 1));
        assert_eq!(days[0].count, 1);
        assert_eq!(days[0].level.value(), 1);
        assert_eq!(days[1].breakdown, Breakdown { pushes: 5, pulls: 0, builds: 7 });
        assert_eq!(days[1].count, 12);
        assert_eq!(days[1].level, Level::MAX);
    }

    #[test]
    fn daily_record_json_shape() {
        let record: DailyActivity =
            serde_json::from_str(r#"{"date":"2024-02-29","count":4,"pushes":3,"builds":1}"#)
                .expect("record parses");
        assert_eq!(record.date, date(2024, 2, 29));
        assert_eq!(record.breakdown.pulls, 0);
        assert_eq!(record.level, Level::NONE);
        let json = serde_json::to_value(&record).expect("record serializes");
        assert_eq!(json["date"], "2024-02-29");
        assert_eq!(json["pushes"], 3);
        assert_eq!(json["level"], 0);
    }

    #[test]
    fn event_accepts_upstream_field_names() {
        let event: ActivityEvent =
            serde_json::from_str(r#"{"event_type":"build","event_date":"2024-01-05"}"#)
                .expect("event parses");
        assert_eq!(event.kind, EventKind::Build);
        assert_eq!(event.count, 1);
    }

    #[test]
    fn duplicate_dates_are_merged() {
        let mut first = DailyActivity::empty(date(2024, 1, 1));
        first.count = 2;
        let mut second = first.clone();
        second.count = 3;
        second.level = Level::new(2);
        let map = index_by_date(&[first, second]);
        assert_eq!(map.len(), 1);
        assert_eq!(map[&date(2024, 1, 1)].count, 5);
        assert_eq!(map[&date(2024, 1, 1)].level.value(), 2);
    }

    #[test]
    fn report_clips_to_window() {
        let today = date(2024, 1, 10);
        let mut inside = DailyActivity::empty(date(2024, 1, 8));
        inside.count = 4;
        inside.breakdown.pulls = 4;
        let mut outside = DailyActivity::empty(date(2023, 12, 1));
        outside.count = 9;
        let mut future = DailyActivity::empty(date(2024, 1, 11));
        future.count = 1;
        let report = ActivityReport::new("alice", 7, today, &[outside, inside.clone(), future]);
        assert_eq!(report.activity, vec![inside]);
        assert_eq!(report.totals.activities, 4);
        assert_eq!(report.totals.pulls, 4);
    }
}
