use tracing_subscriber::{
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

fn default_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    let directive = match (verbose, level) {
        (true, _) => "moon_phase=debug,info".to_string(),
        (false, Some(level)) => format!("moon_phase={}", level),
        (false, None) => "moon_phase=info".to_string(),
    };

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

pub fn init_cli_logger(verbose: bool, level: Option<&str>) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(default_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
}

pub fn init_json_logger(verbose: bool, level: Option<&str>) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(default_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .json(), // 給日誌收集器使用的結構化輸出
        )
        .try_init()
}

/// Installs the compact or JSON subscriber. Returns `false` when one is
/// already in place; the first one stays.
pub fn init_logger(json: bool, verbose: bool, level: Option<&str>) -> bool {
    let installed = if json {
        init_json_logger(verbose, level)
    } else {
        init_cli_logger(verbose, level)
    };
    installed.is_ok()
}
