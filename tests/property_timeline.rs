mod common;

use basal_chart::domain::{
    cycle::Record,
    plot::{COLUMN_WIDTH, TemperatureScale, build_path, map_to_points},
    timeline::{DisplayMode, build_timeline, select_window, timeline_length},
};
use common::record;
use proptest::prelude::*;

fn records_strategy() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(
        (-3i64..70, prop::option::of(35.0f64..38.0)),
        0..24,
    )
    .prop_map(|days| {
        days.into_iter()
            .map(|(day, temperature)| record(day, temperature))
            .collect()
    })
}

proptest! {
    #[test]
    fn timeline_has_one_entry_per_day(records in records_strategy(), total in 28usize..90) {
        let timeline = build_timeline(&records, total);
        prop_assert_eq!(timeline.len(), total);
        for (idx, entry) in timeline.iter().enumerate() {
            prop_assert_eq!(entry.cycle_day(), idx as i64 + 1);
        }
    }

    #[test]
    fn timeline_reaches_the_latest_recorded_day(records in records_strategy()) {
        prop_assume!(!records.is_empty());
        let total = timeline_length(&records);
        let timeline = build_timeline(&records, total);
        let max_input = records.iter().map(|r| r.cycle_day).max().unwrap_or_default();
        let max_day = timeline.iter().map(|e| e.cycle_day()).max().unwrap_or_default();
        prop_assert!(max_day >= max_input);
    }

    #[test]
    fn short_window_is_five_days_holding_the_last_reading(records in records_strategy()) {
        let timeline = build_timeline(&records, timeline_length(&records));
        let window = select_window(&timeline, DisplayMode::Short, false);
        prop_assert_eq!(window.len(), timeline.len().min(5));

        if let Some(last) = timeline.iter().rposition(|e| e.temperature().is_some()) {
            let last_day = timeline[last].cycle_day();
            prop_assert!(window.iter().any(|e| e.cycle_day() == last_day));
            if last >= 4 {
                prop_assert_eq!(window.last().map(|e| e.cycle_day()), Some(last_day));
            }
        } else {
            prop_assert_eq!(window.first().map(|e| e.cycle_day()), Some(1));
        }
    }

    #[test]
    fn path_never_bridges_a_missing_day(temperatures in prop::collection::vec(prop::option::of(35.0f64..38.0), 1..40)) {
        let records = temperatures
            .iter()
            .enumerate()
            .filter_map(|(idx, t)| t.map(|t| record(idx as i64 + 1, Some(t))))
            .collect::<Vec<_>>();
        let timeline = build_timeline(&records, temperatures.len());
        let points = map_to_points(&timeline, &TemperatureScale::default());
        let segments = build_path(&points);

        let plotted = temperatures.iter().flatten().count();
        prop_assert_eq!(segments.iter().map(|s| s.points.len()).sum::<usize>(), plotted);
        for segment in &segments {
            for pair in segment.points.windows(2) {
                prop_assert!((pair[1].0 - pair[0].0 - COLUMN_WIDTH).abs() < 1e-9);
            }
        }
        let runs = temperatures
            .windows(2)
            .filter(|w| w[0].is_none() && w[1].is_some())
            .count()
            + usize::from(temperatures[0].is_some());
        prop_assert_eq!(segments.len(), runs);
    }

    #[test]
    fn timeline_is_deterministic(records in records_strategy(), total in 28usize..60) {
        prop_assert_eq!(build_timeline(&records, total), build_timeline(&records, total));
    }
}
