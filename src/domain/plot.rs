//! Pixel mapping for the temperature chart.
//!
//! Coordinates live in a fixed view box: a label gutter on the left, one
//! equal-width column per visible day, and a plot band of fixed height with
//! padding above and below the temperature domain.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::domain::{
    cycle::Cycle,
    dates::{DateStyle, format_date},
    timeline::{DisplayMode, TimelineEntry, build_timeline, select_window, timeline_length},
};

pub const LABEL_WIDTH: f64 = 40.0;
pub const COLUMN_WIDTH: f64 = 60.0;
pub const PLOT_HEIGHT: f64 = 300.0;
pub const PLOT_PADDING: f64 = 20.0;
/// Widest temperature domain a chart accepts, in °C.
pub const MAX_DOMAIN_SPAN: f64 = 10.0;

/// Temperature domain mapped onto the plot band, in °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureScale {
    pub min: f64,
    pub max: f64,
}

impl Default for TemperatureScale {
    fn default() -> Self {
        Self { min: 35.0, max: 37.5 }
    }
}

impl TemperatureScale {
    /// Builds a scale, or `None` when the bounds cannot span a plot or are
    /// wider than [`MAX_DOMAIN_SPAN`].
    pub fn new(min: f64, max: f64) -> Option<Self> {
        let span = max - min;
        (min.is_finite() && max.is_finite() && span > 0.0 && span <= MAX_DOMAIN_SPAN)
            .then_some(Self { min, max })
    }

    /// Linear map of a temperature to a y coordinate. Values outside the
    /// domain land outside the padded band; nothing is clamped.
    pub fn y_for(&self, temperature: f64) -> f64 {
        let usable = PLOT_HEIGHT - 2.0 * PLOT_PADDING;
        PLOT_HEIGHT - PLOT_PADDING - (temperature - self.min) / (self.max - self.min) * usable
    }

    /// Horizontal rules every 0.1 °C across the domain.
    pub fn gridlines(&self) -> Vec<Gridline> {
        let first = (self.min * 10.0).round() as i64;
        let last = (self.max * 10.0).round() as i64;
        (first..=last)
            .map(|tenths| {
                let temperature = tenths as f64 / 10.0;
                let weight = if tenths % 10 == 0 {
                    GridWeight::Whole
                } else if tenths % 5 == 0 {
                    GridWeight::Half
                } else {
                    GridWeight::Minor
                };
                Gridline {
                    temperature,
                    y: self.y_for(temperature),
                    weight,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridWeight {
    Minor,
    Half,
    Whole,
}

impl GridWeight {
    /// Labelled rules are the half and whole degree ones.
    pub fn is_labelled(self) -> bool {
        matches!(self, Self::Half | Self::Whole)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gridline {
    pub temperature: f64,
    pub y: f64,
    pub weight: GridWeight,
}

/// X coordinate of the centre of column `index`.
pub fn column_center(index: usize) -> f64 {
    LABEL_WIDTH + index as f64 * COLUMN_WIDTH + COLUMN_WIDTH / 2.0
}

/// Total view box width for `columns` day columns.
pub fn view_width(columns: usize) -> f64 {
    LABEL_WIDTH + columns as f64 * COLUMN_WIDTH
}

/// A plotted temperature reading.
#[derive(Debug, Clone, PartialEq)]
pub struct VisiblePoint<'e, 'a> {
    pub index: usize,
    pub day: i64,
    pub x: f64,
    pub y: f64,
    pub temperature: f64,
    pub entry: &'e TimelineEntry<'a>,
}

impl VisiblePoint<'_, '_> {
    /// Hover text shared by every renderer, e.g. `36.50°C · 05/03`.
    pub fn tooltip(&self) -> String {
        format!(
            "{:.2}°C · {}",
            self.temperature,
            format_date(self.entry.date(), DateStyle::DayMonth)
        )
    }
}

/// Maps each visible day to a point, or `None` where the day has no reading.
pub fn map_to_points<'e, 'a>(
    visible: &'e [TimelineEntry<'a>],
    scale: &TemperatureScale,
) -> Vec<Option<VisiblePoint<'e, 'a>>> {
    visible
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry.temperature().map(|temperature| VisiblePoint {
                index,
                day: entry.cycle_day(),
                x: column_center(index),
                y: scale.y_for(temperature),
                temperature,
                entry,
            })
        })
        .collect()
}

/// Splits `items` into maximal runs of consecutive elements matching `keep`.
pub fn contiguous_runs<T>(items: &[T], keep: impl Fn(&T) -> bool) -> Vec<&[T]> {
    let mut runs = Vec::new();
    let mut start = None;
    for (idx, item) in items.iter().enumerate() {
        match (keep(item), start) {
            (true, None) => start = Some(idx),
            (false, Some(from)) => {
                runs.push(&items[from..idx]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(from) = start {
        runs.push(&items[from..]);
    }
    runs
}

/// A stroke through adjacent readings; a single point is a segment of one.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub points: Vec<(f64, f64)>,
}

/// Joins adjacent readings only. A missing day always breaks the line.
pub fn build_path(points: &[Option<VisiblePoint<'_, '_>>]) -> Vec<PathSegment> {
    contiguous_runs(points, Option::is_some)
        .into_iter()
        .map(|run| PathSegment {
            points: run.iter().flatten().map(|p| (p.x, p.y)).collect(),
        })
        .collect()
}

/// SVG path data: `M` opens each segment, `L` continues it.
pub fn svg_path_data(segments: &[PathSegment]) -> String {
    let mut data = String::new();
    for segment in segments {
        for (idx, (x, y)) in segment.points.iter().enumerate() {
            let command = if idx == 0 { 'M' } else { 'L' };
            if !data.is_empty() {
                data.push(' ');
            }
            let _ = write!(data, "{command} {x:.1} {y:.1}");
        }
    }
    data
}

/// Result of plotting a window.
#[derive(Debug, Clone, PartialEq)]
pub enum Plot<'e, 'a> {
    /// No visible day has a reading; show an empty state, not a chart.
    NoData,
    Points {
        points: Vec<Option<VisiblePoint<'e, 'a>>>,
        segments: Vec<PathSegment>,
    },
}

pub fn plot_window<'e, 'a>(visible: &'e [TimelineEntry<'a>], scale: &TemperatureScale) -> Plot<'e, 'a> {
    let points = map_to_points(visible, scale);
    if points.iter().all(Option::is_none) {
        return Plot::NoData;
    }
    let segments = build_path(&points);
    Plot::Points { points, segments }
}

/// Timeline and window for one cycle, built fresh from its records.
#[derive(Debug, Clone)]
pub struct ChartModel<'a> {
    pub timeline: Vec<TimelineEntry<'a>>,
    pub mode: DisplayMode,
    pub force_full: bool,
    pub scale: TemperatureScale,
}

impl<'a> ChartModel<'a> {
    pub fn new(cycle: &'a Cycle, mode: DisplayMode, force_full: bool, scale: TemperatureScale) -> Self {
        let total_days = timeline_length(&cycle.records);
        Self {
            timeline: build_timeline(&cycle.records, total_days),
            mode,
            force_full,
            scale,
        }
    }

    pub fn window(&self) -> &[TimelineEntry<'a>] {
        select_window(&self.timeline, self.mode, self.force_full)
    }

    pub fn plot(&self) -> Plot<'_, 'a> {
        plot_window(self.window(), &self.scale)
    }

    /// Whether the compact window is showing and an expand can be offered.
    pub fn is_expandable(&self) -> bool {
        self.mode == DisplayMode::Short && !self.force_full
    }
}
