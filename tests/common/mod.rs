#![allow(dead_code)]

use basal_chart::{
    cli::Cli,
    domain::{
        cycle::{Cycle, CycleId, Record, RecordId, UserId},
        dates::parse_date,
    },
};
use chrono::NaiveDate;
use clap::Parser;
use ratatui::buffer::Buffer;

pub fn date(value: &str) -> NaiveDate {
    parse_date(value).expect("valid date fixture")
}

pub fn cli(args: &[&str]) -> Cli {
    Cli::parse_from(std::iter::once("basal").chain(args.iter().copied()))
}

pub fn record(day: i64, temperature: Option<f64>) -> Record {
    Record {
        id: RecordId(format!("r{day}")),
        date: None,
        cycle_day: day,
        temperature,
        mucus_appearance: None,
        mucus_sensation: None,
        observations: None,
    }
}

pub fn dated_record(day: i64, date_value: &str, temperature: Option<f64>) -> Record {
    Record {
        date: parse_date(date_value),
        ..record(day, temperature)
    }
}

/// Starts 2024-03-01 with readings 36.10, 36.20 and 36.50 on days 1, 2 and 5.
pub fn march_cycle() -> Cycle {
    let mut cycle = Cycle::new(CycleId::from("c1"), UserId::from("ana"), date("2024-03-01"));
    cycle.records = vec![
        dated_record(1, "2024-03-01", Some(36.10)),
        dated_record(2, "2024-03-02", Some(36.20)),
        dated_record(5, "2024-03-05", Some(36.50)),
    ];
    cycle
}

pub fn fresh_cycle() -> Cycle {
    Cycle::new(CycleId::from("c2"), UserId::from("ana"), date("2024-04-01"))
}

pub fn buffer_text(buf: &Buffer) -> String {
    (buf.area.top()..buf.area.bottom())
        .map(|y| {
            (buf.area.left()..buf.area.right())
                .map(|x| buf.cell((x, y)).map_or(" ", |cell| cell.symbol()))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
