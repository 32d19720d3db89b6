use anyhow::Result;
use moon_phase::core::ConfigProvider;
use moon_phase::utils::validation::Validate;
use moon_phase::{MoonCalculator, MoonError, OutputFormat, TomlConfig};
use tempfile::TempDir;

#[test]
fn test_calculator_from_toml_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("moon-phase.toml");
    std::fs::write(
        &config_path,
        r#"
[calculator]
timezone = "utc"
dialect = "us"

[report]
moon_types = ["New Moon", "Harvest Moon"]
format = "json"
"#,
    )?;

    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;
    assert_eq!(config.output_format(), OutputFormat::Json);

    let calculator = MoonCalculator::from_config(Some("2008-12-12 16:37"), &config)?;
    assert_eq!(calculator.timestamp(), 1_229_099_820);

    let report = calculator.report(config.moon_types());
    assert_eq!(report.upcoming.len(), 2);
    assert_eq!(
        report.upcoming[1].message,
        "29.53 days until the next Harvest Moon"
    );
    Ok(())
}

#[test]
fn test_bad_timezone_in_config_is_rejected() -> Result<()> {
    let config = TomlConfig::from_toml_str("[calculator]\ntimezone = \"Atlantis\"\n")?;

    assert!(config.validate().is_err());
    match MoonCalculator::from_config(None, &config) {
        Err(MoonError::TimeZoneError { message }) => assert!(message.contains("Atlantis")),
        other => panic!("expected a time zone error, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_malformed_toml_is_config_error() {
    let result = TomlConfig::from_toml_str("[calculator\ntimezone = ");
    assert!(matches!(result, Err(MoonError::ConfigError { .. })));
}
