use clap::Parser;
use tempfile::{NamedTempFile, tempdir};

use super::*;

fn cli(args: &[&str]) -> Cli {
    Cli::parse_from(std::iter::once("basal").chain(args.iter().copied()))
}

#[test]
fn from_cli_defaults_basic_mapping() {
    let settings = RuntimeSettings::from_cli_defaults(&cli(&[
        "--user", "ana", "--mode", "full", "--temp-min", "35.5", "--theme", "nord",
    ]));

    assert_eq!(settings.user_id.as_deref(), Some("ana"));
    assert_eq!(settings.display_mode, DisplayMode::Full);
    assert!((settings.temp_min - 35.5).abs() < f64::EPSILON);
    assert!((settings.temp_max - 37.5).abs() < f64::EPSILON);
    assert_eq!(settings.theme, ThemeArg::Nord);

    let defaults = RuntimeSettings::from_cli_defaults(&cli(&[]));
    assert_eq!(defaults, RuntimeSettings::default());
}

#[test]
fn invalid_domain_falls_back_to_default_scale() {
    let settings = RuntimeSettings {
        temp_min: 37.0,
        temp_max: 36.0,
        ..RuntimeSettings::default()
    };
    assert_eq!(settings.scale(), TemperatureScale::default());

    let settings = RuntimeSettings {
        temp_min: 35.5,
        temp_max: 37.0,
        ..RuntimeSettings::default()
    };
    assert_eq!(settings.scale(), TemperatureScale { min: 35.5, max: 37.0 });
}

#[test]
fn runtime_settings_roundtrip() {
    let settings = RuntimeSettings {
        user_id: Some("ana".to_string()),
        display_mode: DisplayMode::Full,
        ..RuntimeSettings::default()
    };

    let file = NamedTempFile::new().expect("create temp settings file");
    let path = file.path();
    save_runtime_settings(path, &settings).expect("save settings");
    let content = std::fs::read_to_string(path).expect("read settings");
    let restored: RuntimeSettings = serde_json::from_str(&content).expect("parse settings");

    assert_eq!(restored, settings);
    assert!(content.contains("\"display_mode\": \"full\""));
}

#[test]
fn load_without_dir_returns_cli_defaults() {
    let (settings, path) = load_runtime_settings(&cli(&["--mode", "full"]), None);
    assert!(path.is_none());
    assert_eq!(settings.display_mode, DisplayMode::Full);
}

#[test]
fn load_reads_saved_and_cli_overrides_win() {
    let dir = tempdir().expect("create temp dir");
    let saved = RuntimeSettings {
        user_id: Some("bea".to_string()),
        display_mode: DisplayMode::Full,
        theme: ThemeArg::Mono,
        ..RuntimeSettings::default()
    };
    save_runtime_settings(&dir.path().join(SETTINGS_FILE), &saved).expect("save settings");

    let (loaded, path) = load_runtime_settings(&cli(&[]), Some(dir.path()));
    assert_eq!(path, Some(dir.path().join(SETTINGS_FILE)));
    assert_eq!(loaded, saved);

    let (loaded, _) = load_runtime_settings(&cli(&["--user", "ana", "--mode", "short"]), Some(dir.path()));
    assert_eq!(loaded.user_id.as_deref(), Some("ana"));
    assert_eq!(loaded.display_mode, DisplayMode::Short);
    assert_eq!(loaded.theme, ThemeArg::Mono);
}

#[test]
fn partial_or_corrupt_settings_files_are_tolerated() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join(SETTINGS_FILE);

    std::fs::write(&path, r#"{"user_id": "ana"}"#).expect("write");
    let (loaded, _) = load_runtime_settings(&cli(&[]), Some(dir.path()));
    assert_eq!(loaded.user_id.as_deref(), Some("ana"));
    assert_eq!(loaded.display_mode, DisplayMode::Short);

    std::fs::write(&path, "not json").expect("write");
    let (loaded, _) = load_runtime_settings(&cli(&[]), Some(dir.path()));
    assert_eq!(loaded, RuntimeSettings::default());
}

#[test]
fn invalid_saved_domain_is_replaced_on_load() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join(SETTINGS_FILE);
    std::fs::write(&path, r#"{"temp_min": 37.0, "temp_max": 36.0, "display_mode": "full"}"#)
        .expect("write");

    let (loaded, _) = load_runtime_settings(&cli(&[]), Some(dir.path()));
    let defaults = RuntimeSettings::default();
    assert!((loaded.temp_min - defaults.temp_min).abs() < f64::EPSILON);
    assert!((loaded.temp_max - defaults.temp_max).abs() < f64::EPSILON);
    assert_eq!(loaded.display_mode, DisplayMode::Full);

    save_runtime_settings(&path, &loaded).expect("save settings");
    let content = std::fs::read_to_string(&path).expect("read settings");
    let restored: RuntimeSettings = serde_json::from_str(&content).expect("parse settings");
    assert_eq!(restored.scale(), TemperatureScale::default());
    assert!((restored.temp_min - 35.0).abs() < f64::EPSILON);

    let (loaded, _) = load_runtime_settings(&cli(&["--temp-max", "60"]), Some(dir.path()));
    assert!((loaded.temp_max - defaults.temp_max).abs() < f64::EPSILON);
}

#[test]
fn data_dir_prefers_explicit_flag() {
    let cli = cli(&["--data-dir", "/tmp/basal-test"]);
    assert_eq!(data_dir(&cli), Some(PathBuf::from("/tmp/basal-test")));
}
