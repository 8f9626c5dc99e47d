use std::fmt::Write as _;

use crate::{
    domain::{
        dates::{DateStyle, format_date},
        plot::{ChartModel, Plot, VisiblePoint},
        timeline::TimelineEntry,
    },
    export::NO_DATA_MESSAGE,
};

const CELL: usize = 7;

/// Plain-text chart: one row per 0.1 °C, one cell per visible day.
pub fn render_text_chart(model: &ChartModel<'_>) -> String {
    let window = model.window();
    let Plot::Points { points, .. } = model.plot() else {
        return format!("{NO_DATA_MESSAGE}\n");
    };
    let gridlines = model.scale.gridlines();
    let (Some(bottom), Some(top)) = (gridlines.first(), gridlines.last()) else {
        return format!("{NO_DATA_MESSAGE}\n");
    };
    let rows = point_rows(&points, tenths_of(bottom.temperature), tenths_of(top.temperature));

    let mut out = String::new();
    for line in gridlines.iter().rev() {
        let tenths = tenths_of(line.temperature);
        let gutter = if line.weight.is_labelled() {
            format!("{:>5.1} |", line.temperature)
        } else {
            "      |".to_string()
        };
        let mut row = gutter;
        for plotted in &rows {
            let mark = match plotted {
                Some((t, glyph)) if *t == tenths => *glyph,
                _ if line.weight.is_labelled() => "·",
                _ => " ",
            };
            let _ = write!(row, "{mark:^width$}", width = CELL);
        }
        let _ = writeln!(out, "{}", row.trim_end());
    }

    let _ = writeln!(out, "      +{}", "-".repeat(CELL * window.len()));
    write_label_row(&mut out, "Date", window, |e| {
        format_date(e.date(), DateStyle::DayMonth)
    });
    write_label_row(&mut out, "Day", window, |e| e.cycle_day().to_string());
    write_label_row(&mut out, "Look", window, |e| {
        e.mucus_appearance().unwrap_or("-").to_string()
    });
    write_label_row(&mut out, "Feel", window, |e| {
        e.mucus_sensation().unwrap_or("-").to_string()
    });
    out
}

/// Row (in tenths of a degree) each visible day's reading falls on.
fn tenths_of(temperature: f64) -> i64 {
    (temperature * 10.0).round() as i64
}

/// Row and glyph per column. Readings outside the domain are pinned to the
/// edge row and marked with an arrow.
fn point_rows(
    points: &[Option<VisiblePoint<'_, '_>>],
    bottom: i64,
    top: i64,
) -> Vec<Option<(i64, &'static str)>> {
    points
        .iter()
        .map(|p| {
            p.as_ref().map(|p| match tenths_of(p.temperature) {
                t if t > top => (top, "▲"),
                t if t < bottom => (bottom, "▼"),
                t => (t, "●"),
            })
        })
        .collect()
}

fn write_label_row(
    out: &mut String,
    title: &str,
    window: &[TimelineEntry<'_>],
    label: impl Fn(&TimelineEntry<'_>) -> String,
) {
    let mut row = format!("{title:<6} ");
    for entry in window {
        let text = label(entry).chars().take(CELL - 1).collect::<String>();
        let _ = write!(row, "{text:^width$}", width = CELL);
    }
    let _ = writeln!(out, "{}", row.trim_end());
}
