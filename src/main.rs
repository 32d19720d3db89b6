use clap::Parser;
use moon_phase::core::ConfigProvider;
use moon_phase::utils::{logger, validation::Validate};
use moon_phase::{CliConfig, MoonCalculator, MoonError, OutputFormat};

fn exit_with(e: &MoonError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, exit code {})",
        e,
        e.category(),
        e.exit_code()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 驗證命令列參數並合併設定檔
    let config = match cli.validate().and_then(|_| cli.merged_config()) {
        Ok(config) => config,
        Err(e) => {
            // 設定檔讀不到時只能用命令列旗標決定日誌格式
            logger::init_logger(cli.json_logs, cli.verbose, None);
            exit_with(&e)
        }
    };

    // 初始化日誌
    logger::init_logger(
        config.logging.json,
        cli.verbose,
        config.logging.level.as_deref(),
    );

    tracing::info!("🌙 Starting moon-phase CLI");
    tracing::debug!("Resolved config: {:?}", config);

    let calculator = match MoonCalculator::from_config(cli.date.as_deref(), &config) {
        Ok(calculator) => calculator,
        Err(e) => exit_with(&e),
    };

    let report = calculator.report(config.moon_types());
    match config.output_format() {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => exit_with(&e),
        },
    }

    Ok(())
}
