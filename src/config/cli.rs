use crate::config::toml_config::TomlConfig;
use crate::domain::model::{Dialect, OutputFormat};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_timezone, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "moon-phase")]
#[command(about = "Moon phase, illumination and days until the next phase for a date")]
pub struct CliConfig {
    /// Date to calculate for, e.g. 2021-01-15 or "next tuesday" (defaults to now)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Moon types to count down to, e.g. --next "New Moon,Full Moon"
    #[arg(short, long, value_delimiter = ',')]
    pub next: Vec<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Time zone policy: local, utc or +HH:MM
    #[arg(long)]
    pub timezone: Option<String>,

    #[arg(long, value_enum)]
    pub dialect: Option<Dialect>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 載入設定檔 (若有) 並套用命令列覆蓋
    pub fn merged_config(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(timezone) = &self.timezone {
            config.calculator.timezone = timezone.clone();
        }
        if let Some(dialect) = self.dialect {
            config.calculator.dialect = dialect;
        }
        if !self.next.is_empty() {
            config.report.moon_types = self.next.clone();
        }
        if let Some(format) = self.format {
            config.report.format = format;
        }
        if self.json_logs {
            config.logging.json = true;
        }

        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(timezone) = &self.timezone {
            validate_timezone("--timezone", timezone)?;
        }
        if let Some(date) = &self.date {
            validate_non_empty_string("--date", date)?;
        }
        for moon_type in &self.next {
            validate_non_empty_string("--next", moon_type)?;
        }
        Ok(())
    }
}
