use chrono::NaiveDate;
use ratatui::buffer::Buffer;

use crate::domain::{
    cycle::{Cycle, CycleId, Record, RecordId, UserId},
    dates::parse_date,
};

pub(crate) fn date(value: &str) -> NaiveDate {
    parse_date(value).expect("valid date fixture")
}

pub(crate) fn reading(day: i64, date_value: &str, temperature: Option<f64>) -> Record {
    Record {
        id: RecordId(format!("r{day}")),
        date: parse_date(date_value),
        cycle_day: day,
        temperature,
        mucus_appearance: None,
        mucus_sensation: None,
        observations: None,
    }
}

/// Cycle from 1 March 2024 with readings on days 1, 2 and 5.
pub(crate) fn march_cycle() -> Cycle {
    let mut cycle = Cycle::new(CycleId::from("c1"), UserId::from("ana"), date("2024-03-01"));
    cycle.records = vec![
        Record {
            mucus_appearance: Some("Clear".to_string()),
            mucus_sensation: Some("Wet".to_string()),
            ..reading(1, "2024-03-01", Some(36.10))
        },
        reading(2, "2024-03-02", Some(36.20)),
        reading(5, "2024-03-05", Some(36.50)),
    ];
    cycle
}

pub(crate) fn empty_cycle() -> Cycle {
    Cycle::new(CycleId::from("c2"), UserId::from("ana"), date("2024-04-01"))
}

pub(crate) fn row_text(buf: &Buffer, y: u16) -> String {
    (buf.area.left()..buf.area.right())
        .map(|x| buf.cell((x, y)).map_or(" ", |cell| cell.symbol()))
        .collect()
}

pub(crate) fn buffer_text(buf: &Buffer) -> String {
    (buf.area.top()..buf.area.bottom())
        .map(|y| row_text(buf, y))
        .collect::<Vec<_>>()
        .join("\n")
}
