mod common;

use basal_chart::{
    domain::{
        dates::calculate_cycle_day,
        plot::{ChartModel, Plot, TemperatureScale, build_path, map_to_points, svg_path_data},
        timeline::{DisplayMode, build_timeline, select_window},
    },
    export::{NO_DATA_MESSAGE, svg::render_svg, text::render_text_chart},
};
use common::{date, fresh_cycle, march_cycle};

#[test]
fn sparse_march_cycle_end_to_end() {
    let cycle = march_cycle();
    let timeline = build_timeline(&cycle.records, 28);
    assert_eq!(timeline.len(), 28);

    let placeholders = timeline
        .iter()
        .filter(|e| e.is_placeholder())
        .map(|e| e.cycle_day())
        .collect::<Vec<_>>();
    let expected = [3, 4].into_iter().chain(6..=28).collect::<Vec<_>>();
    assert_eq!(placeholders, expected);
    assert!(timeline.iter().filter(|e| e.is_placeholder()).all(|e| e.temperature().is_none()));

    let window = select_window(&timeline, DisplayMode::Short, false);
    assert_eq!(
        window.iter().map(|e| e.cycle_day()).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5]
    );

    let points = map_to_points(window, &TemperatureScale::default());
    let segments = build_path(&points);
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].points.len(), 2);
    assert_eq!(segments[1].points.len(), 1);
    assert_eq!(svg_path_data(&segments), "M 70.0 165.6 L 130.0 155.2 M 310.0 124.0");

    // Placeholder dates are counted from the recorded ones.
    assert_eq!(timeline[2].date(), Some(date("2024-03-03")));
    assert_eq!(timeline[27].date(), Some(date("2024-03-28")));
}

#[test]
fn fresh_cycle_has_placeholder_window_and_no_plot() {
    let cycle = fresh_cycle();
    let model = ChartModel::new(&cycle, DisplayMode::Short, false, TemperatureScale::default());
    assert_eq!(model.window().len(), 5);
    assert!(model.window().iter().all(|e| e.is_placeholder()));
    assert_eq!(model.plot(), Plot::NoData);

    assert!(render_svg(&model).contains(NO_DATA_MESSAGE));
    assert_eq!(render_text_chart(&model).trim_end(), NO_DATA_MESSAGE);
}

#[test]
fn expanding_shows_every_day_without_touching_records() {
    let cycle = march_cycle();
    let short = ChartModel::new(&cycle, DisplayMode::Short, false, TemperatureScale::default());
    let full = ChartModel::new(&cycle, DisplayMode::Short, true, TemperatureScale::default());
    assert!(short.is_expandable());
    assert!(!full.is_expandable());
    assert_eq!(full.window().len(), 28);
    assert_eq!(cycle, march_cycle());
}

#[test]
fn cycle_day_counts_calendar_days() {
    let start = Some(date("2024-03-05"));
    assert_eq!(calculate_cycle_day(Some(date("2024-03-05")), start), Some(1));
    assert_eq!(calculate_cycle_day(Some(date("2024-03-06")), start), Some(2));
    assert_eq!(calculate_cycle_day(Some(date("2024-03-04")), start), Some(0));
    assert_eq!(calculate_cycle_day(None, start), None);
}
