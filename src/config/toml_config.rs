use crate::core::ConfigProvider;
use crate::domain::model::{Dialect, OutputFormat};
use crate::utils::error::{MoonError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_timezone, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MOON_TYPES: [&str; 4] =
    ["New Moon", "First Quarter", "Full Moon", "Third Quarter"];

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub calculator: CalculatorConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub timezone: String, // "local"、"utc" 或 "+08:00"
    pub dialect: Dialect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub moon_types: Vec<String>,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            timezone: "local".to_string(),
            dialect: Dialect::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            moon_types: DEFAULT_MOON_TYPES.iter().map(|s| s.to_string()).collect(),
            format: OutputFormat::default(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MoonError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MoonError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MOON_TZ})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MoonError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_timezone("calculator.timezone", &self.calculator.timezone)?;

        for moon_type in &self.report.moon_types {
            validate_non_empty_string("report.moon_types", moon_type)?;
        }

        if let Some(level) = &self.logging.level {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn timezone(&self) -> &str {
        &self.calculator.timezone
    }

    fn dialect(&self) -> Dialect {
        self.calculator.dialect
    }

    fn moon_types(&self) -> &[String] {
        &self.report.moon_types
    }

    fn output_format(&self) -> OutputFormat {
        self.report.format
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
