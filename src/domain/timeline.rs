use std::collections::BTreeMap;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::{cycle::Record, dates::date_for_day};

/// Shortest timeline ever drawn, one nominal cycle.
pub const MIN_TIMELINE_DAYS: usize = 28;
/// Width of the compact window in days.
pub const WINDOW_DAYS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Five-day window ending at the latest reading.
    #[default]
    Short,
    /// Every day of the timeline.
    Full,
}

/// One day slot of the dense timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEntry<'a> {
    Real {
        record: &'a Record,
        date: Option<NaiveDate>,
    },
    Placeholder {
        cycle_day: i64,
        date: Option<NaiveDate>,
    },
}

impl<'a> TimelineEntry<'a> {
    pub fn cycle_day(&self) -> i64 {
        match self {
            Self::Real { record, .. } => record.cycle_day,
            Self::Placeholder { cycle_day, .. } => *cycle_day,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Real { date, .. } | Self::Placeholder { date, .. } => *date,
        }
    }

    pub fn record(&self) -> Option<&'a Record> {
        match self {
            Self::Real { record, .. } => Some(*record),
            Self::Placeholder { .. } => None,
        }
    }

    /// Temperature reading, if the day has a usable one.
    pub fn temperature(&self) -> Option<f64> {
        match self {
            Self::Real { record, .. } if record.has_temperature() => record.temperature,
            Self::Real { .. } | Self::Placeholder { .. } => None,
        }
    }

    pub fn mucus_appearance(&self) -> Option<&'a str> {
        self.record().and_then(|r| r.mucus_appearance.as_deref())
    }

    pub fn mucus_sensation(&self) -> Option<&'a str> {
        self.record().and_then(|r| r.mucus_sensation.as_deref())
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

/// Number of days the timeline for `records` must span.
pub fn timeline_length(records: &[Record]) -> usize {
    records
        .iter()
        .filter_map(|r| usize::try_from(r.cycle_day).ok())
        .fold(MIN_TIMELINE_DAYS, usize::max)
}

/// Expands sparse records into one entry per day in `1..=total_days`.
///
/// Records are matched by cycle day; when two share a day the later one in
/// `records` wins. Records outside the range have no slot and are skipped.
pub fn build_timeline(records: &[Record], total_days: usize) -> Vec<TimelineEntry<'_>> {
    let by_day = records
        .iter()
        .map(|r| (r.cycle_day, r))
        .collect::<BTreeMap<_, _>>();
    let anchor = date_anchor(records);

    (1..=total_days as i64)
        .map(|day| {
            let date = anchor.and_then(|(anchor_date, anchor_day)| {
                date_for_day(anchor_date, anchor_day, day)
            });
            match by_day.get(&day) {
                Some(&record) => TimelineEntry::Real { record, date },
                None => TimelineEntry::Placeholder {
                    cycle_day: day,
                    date,
                },
            }
        })
        .collect()
}

/// Earliest dated record and its cycle day; every other day's date is counted from it.
fn date_anchor(records: &[Record]) -> Option<(NaiveDate, i64)> {
    records
        .iter()
        .filter_map(|r| r.date.map(|date| (date, r.cycle_day)))
        .min()
}

/// Picks the slice of `timeline` to draw.
pub fn select_window<'t, 'a>(
    timeline: &'t [TimelineEntry<'a>],
    mode: DisplayMode,
    force_full: bool,
) -> &'t [TimelineEntry<'a>] {
    if mode == DisplayMode::Full || force_full {
        return timeline;
    }

    let start = timeline
        .iter()
        .rposition(|entry| entry.temperature().is_some())
        .map_or(0, |last| last.saturating_sub(WINDOW_DAYS - 1));
    let end = (start + WINDOW_DAYS).min(timeline.len());
    &timeline[start..end]
}
