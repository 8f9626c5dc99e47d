use std::fmt;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::domain::dates::{calculate_cycle_day, parse_date};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

macro_rules! display_id {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    )*};
}

display_id!(UserId, CycleId, RecordId);

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("record date is required")]
    MissingDate,
    #[error("record date {date} is before the cycle start {start}")]
    DateBeforeCycleStart { date: NaiveDate, start: NaiveDate },
    #[error("no record with id {0}")]
    RecordNotFound(RecordId),
    #[error("temperature {0:?} is not a number")]
    InvalidTemperature(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum CycleError {
    #[error("no active cycle; start one with `basal new-cycle`")]
    NoActiveCycle,
    #[error("no cycle with id {0}")]
    CycleNotFound(CycleId),
    #[error("record {record} on {date} would fall before the new start date {start}")]
    StartAfterRecords {
        record: RecordId,
        date: NaiveDate,
        start: NaiveDate,
    },
}

/// One day's observation inside a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    pub cycle_day: i64,
    #[serde(default, deserialize_with = "lenient_temperature")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub mucus_appearance: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub mucus_sensation: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub observations: Option<String>,
}

impl Record {
    #[must_use]
    pub fn has_temperature(&self) -> bool {
        self.temperature.is_some_and(f64::is_finite)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    pub id: CycleId,
    pub user_id: UserId,
    #[serde(deserialize_with = "strict_date")]
    pub start_date: NaiveDate,
    #[serde(default)]
    pub records: Vec<Record>,
}

/// Field values for a new or edited record, as typed by the user.
///
/// `None` on edit keeps the stored value; on add it means "not observed".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordInput {
    pub date: Option<NaiveDate>,
    pub temperature: Option<String>,
    pub mucus_appearance: Option<String>,
    pub mucus_sensation: Option<String>,
    pub observations: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleSummary {
    pub record_count: usize,
    pub duration_days: Option<i64>,
    pub mean_temperature: Option<f64>,
}

impl Cycle {
    pub fn new(id: CycleId, user_id: UserId, start_date: NaiveDate) -> Self {
        Self {
            id,
            user_id,
            start_date,
            records: Vec::new(),
        }
    }

    pub fn record(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Cycle day that `date` falls on, validated for writing.
    pub fn checked_cycle_day(&self, date: Option<NaiveDate>) -> Result<i64, RecordError> {
        let date = date.ok_or(RecordError::MissingDate)?;
        match calculate_cycle_day(Some(date), Some(self.start_date)) {
            Some(day) if day >= 1 => Ok(day),
            _ => Err(RecordError::DateBeforeCycleStart {
                date,
                start: self.start_date,
            }),
        }
    }

    pub fn add_record(&mut self, id: RecordId, input: RecordInput) -> Result<&Record, RecordError> {
        let cycle_day = self.checked_cycle_day(input.date)?;
        let record = Record {
            id: id.clone(),
            date: input.date,
            cycle_day,
            temperature: parse_temperature(input.temperature.as_deref())?,
            mucus_appearance: non_blank(input.mucus_appearance),
            mucus_sensation: non_blank(input.mucus_sensation),
            observations: non_blank(input.observations),
        };
        self.records.push(record);
        self.sort_records();
        self.record(&id).ok_or(RecordError::RecordNotFound(id))
    }

    pub fn edit_record(&mut self, id: &RecordId, input: RecordInput) -> Result<&Record, RecordError> {
        let current = self
            .record(id)
            .ok_or_else(|| RecordError::RecordNotFound(id.clone()))?;
        let date = input.date.or(current.date);
        let cycle_day = self.checked_cycle_day(date)?;
        let temperature = match input.temperature.as_deref() {
            Some(raw) => parse_temperature(Some(raw))?,
            None => current.temperature,
        };

        if let Some(record) = self.records.iter_mut().find(|r| &r.id == id) {
            record.date = date;
            record.cycle_day = cycle_day;
            record.temperature = temperature;
            if let Some(value) = input.mucus_appearance {
                record.mucus_appearance = non_blank(Some(value));
            }
            if let Some(value) = input.mucus_sensation {
                record.mucus_sensation = non_blank(Some(value));
            }
            if let Some(value) = input.observations {
                record.observations = non_blank(Some(value));
            }
        }
        self.sort_records();
        self.record(id)
            .ok_or_else(|| RecordError::RecordNotFound(id.clone()))
    }

    pub fn delete_record(&mut self, id: &RecordId) -> Result<Record, RecordError> {
        let index = self
            .records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| RecordError::RecordNotFound(id.clone()))?;
        Ok(self.records.remove(index))
    }

    /// Moves the start date and re-derives every record's cycle day.
    ///
    /// Leaves the cycle untouched if any dated record would land before day 1.
    pub fn correct_start_date(&mut self, start: NaiveDate) -> Result<(), CycleError> {
        if let Some(record) = self
            .records
            .iter()
            .find(|r| r.date.is_some_and(|date| date < start))
        {
            return Err(CycleError::StartAfterRecords {
                record: record.id.clone(),
                date: record.date.unwrap_or(start),
                start,
            });
        }
        self.start_date = start;
        for record in &mut self.records {
            if let Some(day) = calculate_cycle_day(record.date, Some(start)) {
                record.cycle_day = day;
            }
        }
        Ok(())
    }

    pub fn summary(&self) -> CycleSummary {
        let temps = self
            .records
            .iter()
            .filter_map(|r| r.temperature.filter(|t| t.is_finite()))
            .collect::<Vec<_>>();
        let mean_temperature = if temps.is_empty() {
            None
        } else {
            let mean = temps.iter().sum::<f64>() / temps.len() as f64;
            Some((mean * 100.0).round() / 100.0)
        };
        CycleSummary {
            record_count: self.records.len(),
            duration_days: self.records.iter().map(|r| r.cycle_day).max(),
            mean_temperature,
        }
    }

    fn sort_records(&mut self) {
        // Unknown dates sort first, matching how they load from the store.
        self.records.sort_by_key(|r| r.date);
    }
}

/// Millisecond wall-clock id, bumped past any id already taken.
pub fn next_id<'a>(taken: impl IntoIterator<Item = &'a str>) -> String {
    let mut candidate = Utc::now().timestamp_millis();
    let taken = taken.into_iter().collect::<Vec<_>>();
    while taken.contains(&candidate.to_string().as_str()) {
        candidate += 1;
    }
    candidate.to_string()
}

pub fn parse_temperature(raw: Option<&str>) -> Result<Option<f64>, RecordError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .map(Some)
        .ok_or_else(|| RecordError::InvalidTemperature(raw.to_string()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn strict_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date {raw:?}")))
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

fn lenient_temperature<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(value)) => Some(value).filter(|t| t.is_finite()),
        Some(Raw::Text(text)) => parse_temperature(Some(&text)).ok().flatten(),
        None => None,
    })
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(non_blank(Option::<String>::deserialize(deserializer)?))
}
