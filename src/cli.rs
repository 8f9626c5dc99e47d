#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::domain::{
    cycle::RecordInput,
    dates::parse_date,
    plot::{MAX_DOMAIN_SPAN, TemperatureScale},
    timeline::DisplayMode,
};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeArg {
    #[default]
    Auto,
    Rose,
    Nord,
    Mono,
    HighContrast,
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "basal",
    version,
    about = "Basal body temperature tracker with cycle charts"
)]
pub struct Cli {
    /// Active user id (default: saved setting, then $USER)
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Directory for cycles.json, settings.json and basal.log
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Initial chart display mode
    #[arg(long, value_enum, global = true)]
    pub mode: Option<DisplayMode>,

    /// Lower bound of the temperature axis (°C)
    #[arg(long, global = true)]
    pub temp_min: Option<f64>,

    /// Upper bound of the temperature axis (°C)
    #[arg(long, global = true)]
    pub temp_max: Option<f64>,

    /// Theme override
    #[arg(long, value_enum, global = true, default_value_t = ThemeArg::Auto)]
    pub theme: ThemeArg,

    /// Disable colors
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand, PartialEq)]
pub enum Command {
    /// Interactive dashboard (default)
    Dashboard,
    /// Start a new cycle
    NewCycle {
        /// Start date (default: today)
        #[arg(long, value_parser = date_arg)]
        start: Option<NaiveDate>,
    },
    /// Log an observation in the current (or given) cycle
    Add {
        #[command(flatten)]
        fields: RecordFields,
        #[arg(long)]
        cycle: Option<String>,
    },
    /// Change an existing record
    Edit {
        record: String,
        #[command(flatten)]
        fields: RecordFields,
        #[arg(long)]
        cycle: Option<String>,
    },
    /// Remove a record
    Delete {
        record: String,
        #[arg(long)]
        cycle: Option<String>,
    },
    /// Correct a cycle's start date
    CorrectStart {
        cycle: String,
        #[arg(value_parser = date_arg)]
        date: NaiveDate,
    },
    /// List all cycles, newest first
    History,
    /// Print a cycle's records and chart
    Show { cycle: Option<String> },
    /// Write a cycle chart as SVG
    ExportSvg {
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        cycle: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Args, PartialEq)]
pub struct RecordFields {
    /// Observation date, YYYY-MM-DD
    #[arg(long, value_parser = date_arg)]
    pub date: Option<NaiveDate>,

    /// Temperature in °C; pass an empty value to clear it
    #[arg(long = "temp")]
    pub temperature: Option<String>,

    /// Mucus appearance
    #[arg(long)]
    pub appearance: Option<String>,

    /// Mucus sensation
    #[arg(long)]
    pub sensation: Option<String>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl RecordFields {
    #[must_use]
    pub fn into_input(self) -> RecordInput {
        RecordInput {
            date: self.date,
            temperature: self.temperature,
            mucus_appearance: self.appearance,
            mucus_sensation: self.sensation,
            observations: self.notes,
        }
    }
}

fn date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("expected a date like 2024-03-05, got {value:?}"))
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        if let (Some(min), Some(max)) = (self.temp_min, self.temp_max)
            && TemperatureScale::new(min, max).is_none()
        {
            anyhow::bail!(
                "--temp-max must be greater than --temp-min and at most {MAX_DOMAIN_SPAN} °C above it"
            );
        }
        if let Command::Add { fields, .. } = self.command()
            && fields.date.is_none()
        {
            anyhow::bail!("add needs --date");
        }
        Ok(())
    }

    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command, ThemeArg};
    use crate::domain::timeline::DisplayMode;

    #[test]
    fn defaults_to_dashboard() {
        let cli = Cli::parse_from(["basal"]);
        assert_eq!(cli.command(), Command::Dashboard);
        assert_eq!(cli.theme, ThemeArg::Auto);
        assert_eq!(cli.mode, None);
    }

    #[test]
    fn parses_add_with_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "basal", "add", "--date", "2024-03-05", "--temp", "36.45", "--user", "ana", "--mode",
            "full",
        ]);
        let Command::Add { fields, cycle } = cli.command() else {
            panic!("expected add");
        };
        assert_eq!(fields.date.map(|d| d.to_string()).as_deref(), Some("2024-03-05"));
        assert_eq!(fields.temperature.as_deref(), Some("36.45"));
        assert_eq!(cycle, None);
        assert_eq!(cli.user.as_deref(), Some("ana"));
        assert_eq!(cli.mode, Some(DisplayMode::Full));
    }

    #[test]
    fn rejects_malformed_dates() {
        let err = Cli::try_parse_from(["basal", "add", "--date", "05/03/2024"])
            .expect_err("expected date error");
        assert!(err.to_string().contains("2024-03-05"));
    }

    #[test]
    fn validate_catches_inverted_domain_and_missing_date() {
        let cli = Cli::parse_from(["basal", "--temp-min", "37", "--temp-max", "36"]);
        assert!(cli.validate().is_err());

        let cli = Cli::parse_from(["basal", "--temp-min", "0", "--temp-max", "1e9"]);
        assert!(cli.validate().is_err());

        let cli = Cli::parse_from(["basal", "add", "--temp", "36.5"]);
        assert!(cli.validate().is_err());

        let cli = Cli::parse_from(["basal", "edit", "123", "--temp", ""]);
        assert!(cli.validate().is_ok());
    }
}
