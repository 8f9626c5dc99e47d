mod common;

use basal_chart::{
    app::{
        commands::run_command,
        settings::{CYCLES_FILE, RuntimeSettings, load_runtime_settings, save_runtime_settings},
        tracker::Tracker,
    },
    data::store::{CycleStore, JsonFileCycleStore},
    domain::{cycle::UserId, timeline::DisplayMode},
};
use common::{cli, date};
use tempfile::tempdir;

fn run(tracker: &mut Tracker<JsonFileCycleStore>, args: &[&str]) -> anyhow::Result<String> {
    let cli = cli(args);
    let settings = RuntimeSettings::from_cli_defaults(&cli);
    run_command(cli.command(), tracker, &settings, date("2024-03-06"))
}

#[test]
fn recording_a_cycle_persists_camel_case_json() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(CYCLES_FILE);
    let mut tracker = Tracker::new(JsonFileCycleStore::new(&path), UserId::from("ana"));

    run(&mut tracker, &["new-cycle", "--start", "2024-03-01"]).expect("start");
    run(&mut tracker, &["add", "--date", "2024-03-01", "--temp", "36.10"]).expect("day 1");
    run(&mut tracker, &["add", "--date", "2024-03-02", "--temp", "36,20", "--appearance", "Clear"])
        .expect("day 2");
    run(&mut tracker, &["add", "--date", "2024-03-05", "--temp", "36.5"]).expect("day 5");

    let raw = std::fs::read_to_string(&path).expect("store written");
    assert!(raw.contains("\"startDate\": \"2024-03-01\""));
    assert!(raw.contains("\"userId\": \"ana\""));
    assert!(raw.contains("\"cycleDay\": 5"));
    assert!(raw.contains("\"mucusAppearance\": \"Clear\""));

    let reopened = Tracker::new(JsonFileCycleStore::new(&path), UserId::from("ana"));
    let cycle = reopened.current_cycle().expect("read").expect("cycle");
    let days = cycle.records.iter().map(|r| r.cycle_day).collect::<Vec<_>>();
    assert_eq!(days, vec![1, 2, 5]);
    assert_eq!(cycle.records[1].temperature, Some(36.2));
}

#[test]
fn export_writes_segmented_svg() {
    let dir = tempdir().expect("tempdir");
    let mut tracker = Tracker::new(
        JsonFileCycleStore::new(dir.path().join(CYCLES_FILE)),
        UserId::from("ana"),
    );
    run(&mut tracker, &["new-cycle", "--start", "2024-03-01"]).expect("start");
    for (day, temp) in [("2024-03-01", "36.10"), ("2024-03-02", "36.20"), ("2024-03-05", "36.50")] {
        run(&mut tracker, &["add", "--date", day, "--temp", temp]).expect("add");
    }

    let out = dir.path().join("chart.svg");
    let message = run(&mut tracker, &["export-svg", "--out", out.to_str().expect("utf-8 path")])
        .expect("export");
    assert!(message.starts_with("Wrote "));

    let svg = std::fs::read_to_string(&out).expect("svg written");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("d='M 70.0 165.6 L 130.0 155.2 M 310.0 124.0'"));
    assert!(svg.contains("36.50°C · 05/03"));
}

#[test]
fn correcting_the_start_rederives_cycle_days() {
    let dir = tempdir().expect("tempdir");
    let mut tracker = Tracker::new(
        JsonFileCycleStore::new(dir.path().join(CYCLES_FILE)),
        UserId::from("ana"),
    );
    run(&mut tracker, &["new-cycle", "--start", "2024-03-01"]).expect("start");
    run(&mut tracker, &["add", "--date", "2024-03-05", "--temp", "36.5"]).expect("add");
    let cycle_id = tracker.current_cycle().expect("read").expect("cycle").id;

    run(&mut tracker, &["correct-start", &cycle_id.0, "2024-03-03"]).expect("correct");
    let cycle = tracker.current_cycle().expect("read").expect("cycle");
    assert_eq!(cycle.records[0].cycle_day, 3);

    let err = run(&mut tracker, &["correct-start", &cycle_id.0, "2024-03-06"]).expect_err("after record");
    assert!(!err.to_string().is_empty());
    let unchanged = tracker.current_cycle().expect("read").expect("cycle");
    assert_eq!(unchanged.start_date, date("2024-03-03"));
}

#[test]
fn hand_edited_store_loads_leniently() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(CYCLES_FILE);
    std::fs::write(
        &path,
        r#"[{
            "id": "c1",
            "userId": "ana",
            "startDate": "2024-03-01",
            "records": [
                {"id": "a", "date": "2024-03-01T06:30:00Z", "cycleDay": 1, "temperature": "36.4"},
                {"id": "b", "date": "2024-03-02", "cycleDay": 2, "temperature": "", "mucusSensation": ""},
                {"id": "c", "cycleDay": 3, "temperature": 36.55}
            ]
        }]"#,
    )
    .expect("write fixture");

    let store = JsonFileCycleStore::new(&path);
    let cycles = store.cycles_for_user(&UserId::from("ana")).expect("lenient load");
    let records = &cycles[0].records;
    assert_eq!(records[0].date, Some(date("2024-03-01")));
    assert_eq!(records[0].temperature, Some(36.4));
    assert_eq!(records[1].temperature, None);
    assert_eq!(records[1].mucus_sensation, None);
    assert_eq!(records[2].date, None);
    assert!(store.cycles_for_user(&UserId::from("bea")).expect("read").is_empty());
}

#[test]
fn saved_settings_are_layered_under_cli_flags() {
    let dir = tempdir().expect("tempdir");
    let (mut settings, path) = load_runtime_settings(&cli(&[]), Some(dir.path()));
    settings.display_mode = DisplayMode::Full;
    settings.user_id = Some("ana".to_string());
    save_runtime_settings(path.as_deref().expect("settings path"), &settings).expect("save");

    let (loaded, _) = load_runtime_settings(&cli(&[]), Some(dir.path()));
    assert_eq!(loaded.display_mode, DisplayMode::Full);
    assert_eq!(loaded.user_id.as_deref(), Some("ana"));

    let (overridden, _) = load_runtime_settings(&cli(&["--mode", "short", "--user", "bea"]), Some(dir.path()));
    assert_eq!(overridden.display_mode, DisplayMode::Short);
    assert_eq!(overridden.user_id.as_deref(), Some("bea"));
}
