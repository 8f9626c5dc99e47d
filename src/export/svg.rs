use std::fmt::Write as _;

use html_escape::encode_text;

use crate::{
    domain::{
        dates::{DateStyle, format_date},
        plot::{
            ChartModel, GridWeight, LABEL_WIDTH, PLOT_HEIGHT, Plot, VisiblePoint, column_center,
            svg_path_data, view_width,
        },
        timeline::TimelineEntry,
    },
    export::NO_DATA_MESSAGE,
};

const AXIS_BAND: f64 = 60.0;
const MUCUS_BAND: f64 = 80.0;
const BOTTOM_MARGIN: f64 = 30.0;
const FONT: &str = "font-family='Inter, Segoe UI, sans-serif'";
const PRIMARY: &str = "#d9467b";
const MUTED: &str = "#6b7280";
const FOREGROUND: &str = "#1f2937";
const BORDER: &str = "#d1d5db";

/// Standalone SVG document for the model's current window.
pub fn render_svg(model: &ChartModel<'_>) -> String {
    let window = model.window();
    let Plot::Points { points, segments } = model.plot() else {
        return empty_svg();
    };

    let width = view_width(window.len());
    let height = PLOT_HEIGHT + AXIS_BAND + MUCUS_BAND + BOTTOM_MARGIN;
    let mut svg = String::new();

    let _ = writeln!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 {width:.0} {height:.0}' role='img'>"
    );
    let _ = writeln!(svg, "  <rect width='{width:.0}' height='{height:.0}' fill='#ffffff'/>");

    write_row_titles(&mut svg);
    write_gridlines(&mut svg, model, width);

    for idx in 0..window.len() {
        let x = column_center(idx);
        let _ = writeln!(
            svg,
            "  <line x1='{x:.1}' y1='0' x2='{x:.1}' y2='{PLOT_HEIGHT:.0}' stroke='{BORDER}' stroke-opacity='0.3' stroke-width='0.5'/>"
        );
    }

    let _ = writeln!(
        svg,
        "  <path d='{}' stroke='{PRIMARY}' stroke-width='2' fill='none'/>",
        svg_path_data(&segments)
    );

    for point in points.iter().flatten() {
        write_marker(&mut svg, point);
    }
    for (idx, entry) in window.iter().enumerate() {
        write_column_labels(&mut svg, idx, entry);
    }

    let _ = writeln!(svg, "</svg>");
    svg
}

fn empty_svg() -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 340 80' role='img'>"
    );
    let _ = writeln!(
        svg,
        "  <text x='170' y='44' text-anchor='middle' {FONT} font-size='12' fill='{MUTED}'>{}</text>",
        encode_text(NO_DATA_MESSAGE)
    );
    let _ = writeln!(svg, "</svg>");
    svg
}

fn write_row_titles(svg: &mut String) {
    let x = LABEL_WIDTH / 2.0;
    let rows = [
        ("Date", PLOT_HEIGHT + 35.0),
        ("Cycle day", PLOT_HEIGHT + 50.0),
        ("Appearance", PLOT_HEIGHT + AXIS_BAND + 15.0),
        ("Sensation", PLOT_HEIGHT + AXIS_BAND + 30.0),
    ];
    for (title, y) in rows {
        let _ = writeln!(
            svg,
            "  <text x='{x:.0}' y='{y:.0}' text-anchor='middle' {FONT} font-size='8' font-weight='bold' fill='{MUTED}'>{title}</text>"
        );
    }
}

fn write_gridlines(svg: &mut String, model: &ChartModel<'_>, width: f64) {
    for line in model.scale.gridlines() {
        let (stroke_width, opacity) = match line.weight {
            GridWeight::Whole => (1.2, 0.8),
            GridWeight::Half => (0.8, 0.8),
            GridWeight::Minor => (0.3, 0.5),
        };
        let y = line.y;
        let _ = writeln!(
            svg,
            "  <line x1='{LABEL_WIDTH:.0}' y1='{y:.1}' x2='{width:.0}' y2='{y:.1}' stroke='{BORDER}' stroke-width='{stroke_width}' opacity='{opacity}'/>"
        );
        if line.weight.is_labelled() {
            let _ = writeln!(
                svg,
                "  <text x='{:.0}' y='{:.1}' text-anchor='end' {FONT} font-size='10' fill='{MUTED}'>{:.1}</text>",
                LABEL_WIDTH - 5.0,
                y + 3.0,
                line.temperature
            );
        }
    }
}

fn write_marker(svg: &mut String, point: &VisiblePoint<'_, '_>) {
    let _ = writeln!(
        svg,
        "  <circle cx='{:.1}' cy='{:.1}' r='3' fill='{PRIMARY}'><title>{}</title></circle>",
        point.x,
        point.y,
        encode_text(&point.tooltip())
    );
}

fn write_column_labels(svg: &mut String, idx: usize, entry: &TimelineEntry<'_>) {
    let x = column_center(idx);
    let rows = [
        (
            format_date(entry.date(), DateStyle::DayMonth),
            PLOT_HEIGHT + 35.0,
            "font-size='10'",
            FOREGROUND,
        ),
        (
            format!("Day {}", entry.cycle_day()),
            PLOT_HEIGHT + 50.0,
            "font-size='9'",
            MUTED,
        ),
        (
            entry.mucus_appearance().unwrap_or("-").to_string(),
            PLOT_HEIGHT + AXIS_BAND + 15.0,
            "font-size='9' font-weight='bold'",
            FOREGROUND,
        ),
        (
            entry.mucus_sensation().unwrap_or("-").to_string(),
            PLOT_HEIGHT + AXIS_BAND + 30.0,
            "font-size='9' font-weight='bold'",
            FOREGROUND,
        ),
    ];
    for (text, y, font, fill) in rows {
        let _ = writeln!(
            svg,
            "  <text x='{x:.1}' y='{y:.0}' text-anchor='middle' {FONT} {font} fill='{fill}'>{}</text>",
            encode_text(&text)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        cycle::{Cycle, CycleId, RecordId, RecordInput, UserId},
        dates::parse_date,
        plot::TemperatureScale,
        timeline::DisplayMode,
    };

    fn cycle_with(readings: &[(&str, &str, Option<&str>)]) -> Cycle {
        let mut cycle = Cycle::new(
            CycleId::from("c1"),
            UserId::from("ana"),
            parse_date("2024-03-01").expect("date"),
        );
        for (idx, (date, temp, appearance)) in readings.iter().enumerate() {
            cycle
                .add_record(
                    RecordId(format!("r{idx}")),
                    RecordInput {
                        date: parse_date(date),
                        temperature: Some((*temp).to_string()),
                        mucus_appearance: appearance.map(str::to_string),
                        ..RecordInput::default()
                    },
                )
                .expect("add");
        }
        cycle
    }

    #[test]
    fn svg_contains_segmented_path_and_tooltips() {
        let cycle = cycle_with(&[
            ("2024-03-01", "36.10", None),
            ("2024-03-02", "36.20", Some("Egg white & stretchy")),
            ("2024-03-05", "36.50", None),
        ]);
        let model = ChartModel::new(&cycle, DisplayMode::Short, false, TemperatureScale::default());
        let svg = render_svg(&model);

        assert!(svg.starts_with("<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 340 470'"));
        assert!(svg.contains("d='M 70.0 165.6 L 130.0 155.2 M 310.0 124.0'"));
        assert!(svg.contains("<title>36.50°C · 05/03</title>"));
        assert!(svg.contains("Egg white &amp; stretchy"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains(">Day 4</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn full_mode_draws_every_column() {
        let cycle = cycle_with(&[("2024-03-01", "36.10", None)]);
        let model = ChartModel::new(&cycle, DisplayMode::Full, false, TemperatureScale::default());
        let svg = render_svg(&model);
        assert!(svg.contains("viewBox='0 0 1720 470'"));
        assert!(svg.contains(">Day 28</text>"));
        assert!(svg.contains(">28/03</text>"));
    }

    #[test]
    fn empty_window_renders_message_not_chart() {
        let cycle = cycle_with(&[("2024-03-02", "", None)]);
        let model = ChartModel::new(&cycle, DisplayMode::Short, false, TemperatureScale::default());
        let svg = render_svg(&model);
        assert!(svg.contains(NO_DATA_MESSAGE));
        assert!(!svg.contains("<path"));
    }
}
