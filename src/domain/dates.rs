use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Weekday};

/// Label styles used for calendar dates across the chart, record list and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `05/03`
    #[default]
    DayMonth,
    /// `5 March`
    DayMonthLong,
    /// `5 March 2024`
    Long,
}

impl DateStyle {
    fn pattern(self) -> &'static str {
        match self {
            Self::DayMonth => "%d/%m",
            Self::DayMonthLong => "%-d %B",
            Self::Long => "%-d %B %Y",
        }
    }
}

/// Parses a calendar date as entered in a form or stored by the cycle store.
///
/// Date-only input resolves to that calendar day. Timestamps keep the calendar day
/// they were written in, so an offset never shifts the result to a neighbouring day.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Some(stamp.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(value, pattern).ok())
        .map(|stamp| stamp.date())
}

pub fn day_of_week(date: NaiveDate) -> Weekday {
    date.weekday()
}

#[must_use]
pub fn weekday_label(date: NaiveDate) -> &'static str {
    const DAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    DAYS[day_of_week(date).num_days_from_sunday() as usize]
}

/// Formats a date, or a dash when the date is unknown.
pub fn format_date(date: Option<NaiveDate>, style: DateStyle) -> String {
    date.map_or_else(
        || "-".to_string(),
        |d| d.format(style.pattern()).to_string(),
    )
}

/// 1-based day of the cycle that `record_date` falls on.
///
/// Values below 1 mean the record predates the cycle; writers must reject them.
pub fn calculate_cycle_day(
    record_date: Option<NaiveDate>,
    cycle_start: Option<NaiveDate>,
) -> Option<i64> {
    let (record_date, cycle_start) = (record_date?, cycle_start?);
    Some(record_date.signed_duration_since(cycle_start).num_days() + 1)
}

/// Calendar date of `cycle_day`, counted from a known anchor day.
pub(crate) fn date_for_day(anchor: NaiveDate, anchor_day: i64, cycle_day: i64) -> Option<NaiveDate> {
    let offset = cycle_day.checked_sub(anchor_day)?;
    anchor.checked_add_signed(chrono::TimeDelta::try_days(offset)?)
}
