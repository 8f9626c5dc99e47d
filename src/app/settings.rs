use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    cli::{Cli, ThemeArg},
    domain::{plot::TemperatureScale, timeline::DisplayMode},
};

pub const SETTINGS_FILE: &str = "settings.json";
pub const CYCLES_FILE: &str = "cycles.json";
pub const LOG_FILE: &str = "basal.log";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub user_id: Option<String>,
    pub display_mode: DisplayMode,
    pub temp_min: f64,
    pub temp_max: f64,
    pub theme: ThemeArg,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        let scale = TemperatureScale::default();
        Self {
            user_id: None,
            display_mode: DisplayMode::Short,
            temp_min: scale.min,
            temp_max: scale.max,
            theme: ThemeArg::Auto,
        }
    }
}

impl RuntimeSettings {
    pub fn from_cli_defaults(cli: &Cli) -> Self {
        let mut settings = Self::default();
        settings.apply_cli(cli);
        settings.normalize_domain();
        settings
    }

    /// Replaces an unusable temperature domain with the default one so it is
    /// never written back to disk.
    fn normalize_domain(&mut self) {
        if TemperatureScale::new(self.temp_min, self.temp_max).is_none() {
            warn!(
                min = self.temp_min,
                max = self.temp_max,
                "invalid temperature domain, using default"
            );
            let scale = TemperatureScale::default();
            self.temp_min = scale.min;
            self.temp_max = scale.max;
        }
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(user) = &cli.user {
            self.user_id = Some(user.clone());
        }
        if let Some(mode) = cli.mode {
            self.display_mode = mode;
        }
        if let Some(min) = cli.temp_min {
            self.temp_min = min;
        }
        if let Some(max) = cli.temp_max {
            self.temp_max = max;
        }
        if cli.theme != ThemeArg::Auto {
            self.theme = cli.theme;
        }
    }

    /// Configured temperature domain, or the default one if the bounds are unusable.
    pub fn scale(&self) -> TemperatureScale {
        TemperatureScale::new(self.temp_min, self.temp_max).unwrap_or_default()
    }

    /// User from settings, falling back to the login name.
    pub fn user_or_login(&self) -> Option<String> {
        self.user_id
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .or_else(|| std::env::var("USERNAME").ok())
    }
}

/// Loads saved settings from `dir` and layers explicit CLI flags on top.
pub fn load_runtime_settings(cli: &Cli, dir: Option<&Path>) -> (RuntimeSettings, Option<PathBuf>) {
    let Some(dir) = dir else {
        return (RuntimeSettings::from_cli_defaults(cli), None);
    };
    let path = dir.join(SETTINGS_FILE);

    let mut settings = RuntimeSettings::default();
    if let Ok(content) = fs::read_to_string(&path) {
        match serde_json::from_str::<RuntimeSettings>(&content) {
            Ok(saved) => settings = saved,
            Err(err) => warn!(path = %path.display(), error = %err, "ignoring unreadable settings"),
        }
    }
    settings.apply_cli(cli);
    settings.normalize_domain();

    (settings, Some(path))
}

pub fn save_runtime_settings(path: &Path, settings: &RuntimeSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(settings).context("serializing settings payload failed")?;
    fs::write(path, payload).context("writing settings file failed")
}

/// Directory holding settings, cycles and the log.
pub fn data_dir(cli: &Cli) -> Option<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Some(dir.clone());
    }
    if let Some(base) = std::env::var_os("BASAL_CONFIG_DIR") {
        return Some(PathBuf::from(base));
    }

    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".config").join("basal"))
}

#[cfg(test)]
mod tests;
