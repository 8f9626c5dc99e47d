use std::fmt::Write as _;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::{
    app::{settings::RuntimeSettings, tracker::Tracker},
    cli::Command,
    data::store::CycleStore,
    domain::{
        cycle::{Cycle, CycleId, Record, RecordId},
        dates::{DateStyle, calculate_cycle_day, format_date, weekday_label},
        plot::ChartModel,
    },
    export::{svg::render_svg, text::render_text_chart},
};

/// Runs a one-shot subcommand and returns what to print.
pub fn run_command<S: CycleStore>(
    command: Command,
    tracker: &mut Tracker<S>,
    settings: &RuntimeSettings,
    today: NaiveDate,
) -> Result<String> {
    match command {
        Command::Dashboard => anyhow::bail!("the dashboard is interactive and has no text output"),
        Command::NewCycle { start } => {
            let cycle = tracker.start_new_cycle(start.unwrap_or(today))?;
            Ok(format!(
                "Started cycle {} on {}.",
                cycle.id,
                format_date(Some(cycle.start_date), DateStyle::Long)
            ))
        }
        Command::Add { fields, cycle } => {
            let cycle = cycle.map(CycleId);
            let record = tracker.add_record(cycle.as_ref(), fields.into_input())?;
            Ok(format!(
                "Saved day {} ({}) as record {}.",
                record.cycle_day,
                format_date(record.date, DateStyle::Long),
                record.id
            ))
        }
        Command::Edit {
            record,
            fields,
            cycle,
        } => {
            let cycle = cycle.map(CycleId);
            let record = tracker.edit_record(cycle.as_ref(), &RecordId(record), fields.into_input())?;
            Ok(format!("Updated day {} (record {}).", record.cycle_day, record.id))
        }
        Command::Delete { record, cycle } => {
            let cycle = cycle.map(CycleId);
            let record = tracker.delete_record(cycle.as_ref(), &RecordId(record))?;
            Ok(format!("Deleted record {} (day {}).", record.id, record.cycle_day))
        }
        Command::CorrectStart { cycle, date } => {
            let cycle = tracker.correct_start(&CycleId(cycle), date)?;
            Ok(format!(
                "Cycle {} now starts {}.",
                cycle.id,
                format_date(Some(cycle.start_date), DateStyle::Long)
            ))
        }
        Command::History => Ok(history_text(&tracker.cycles()?)),
        Command::Show { cycle } => {
            let cycle = tracker.cycle(cycle.map(CycleId).as_ref())?;
            Ok(show_text(&cycle, settings, today))
        }
        Command::ExportSvg { out, cycle } => {
            let cycle = tracker.cycle(cycle.map(CycleId).as_ref())?;
            let model = ChartModel::new(&cycle, settings.display_mode, false, settings.scale());
            std::fs::write(&out, render_svg(&model))
                .with_context(|| format!("writing {} failed", out.display()))?;
            Ok(format!("Wrote {}.", out.display()))
        }
    }
}

pub fn history_text(cycles: &[Cycle]) -> String {
    if cycles.is_empty() {
        return format!("{NO_CYCLES_MESSAGE}\n");
    }
    let mut out = String::new();
    for cycle in cycles {
        let _ = writeln!(out, "{}", cycle_summary_line(cycle));
    }
    out
}

pub const NO_CYCLES_MESSAGE: &str = "No cycles yet. Finished cycles will show up here.";

/// `<id>  1 March 2024  12 records  length 28 days  mean 36.41°C`
pub fn cycle_summary_line(cycle: &Cycle) -> String {
    let summary = cycle.summary();
    let duration = summary
        .duration_days
        .map_or_else(|| "n/a".to_string(), |d| format!("{d} days"));
    let mean = summary
        .mean_temperature
        .map_or_else(|| "n/a".to_string(), |t| format!("{t:.2}°C"));
    format!(
        "{}  {}  {} records  length {}  mean {}",
        cycle.id,
        format_date(Some(cycle.start_date), DateStyle::Long),
        summary.record_count,
        duration,
        mean
    )
}

fn show_text(cycle: &Cycle, settings: &RuntimeSettings, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Cycle {} started {}",
        cycle.id,
        format_date(Some(cycle.start_date), DateStyle::Long)
    );
    if let Some(day) = calculate_cycle_day(Some(today), Some(cycle.start_date)).filter(|d| *d >= 1) {
        let _ = writeln!(out, "Today is day {day} of this cycle.");
    }
    let _ = writeln!(out);

    if cycle.records.is_empty() {
        let _ = writeln!(out, "No records yet.");
    }
    for record in &cycle.records {
        let _ = writeln!(out, "{}", record_line(record));
    }
    let _ = writeln!(out);

    let model = ChartModel::new(cycle, settings.display_mode, false, settings.scale());
    out.push_str(&render_text_chart(&model));
    out
}

/// `Tue, 5 March - Day 5  36.45°C  look: ...  feel: ...  notes`
pub fn record_line(record: &Record) -> String {
    let when = record.date.map_or_else(
        || "unknown date".to_string(),
        |d| format!("{}, {}", weekday_label(d), format_date(Some(d), DateStyle::DayMonthLong)),
    );
    let temperature = record
        .temperature
        .map_or_else(|| "--".to_string(), |t| format!("{t:.2}°C"));
    let mut line = format!("[{}] {when} - Day {}  {temperature}", record.id, record.cycle_day);
    if let Some(look) = &record.mucus_appearance {
        let _ = write!(line, "  look: {look}");
    }
    if let Some(feel) = &record.mucus_sensation {
        let _ = write!(line, "  feel: {feel}");
    }
    if let Some(notes) = &record.observations {
        let _ = write!(line, "  {notes}");
    }
    line
}
