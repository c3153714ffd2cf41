use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Overrides the default directives, e.g. `PROTEIN_INTAKE_LOG=trace`.
pub const LOG_ENV_VAR: &str = "PROTEIN_INTAKE_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Short human-readable lines without timestamps.
    Compact,
    Json,
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "protein_intake=debug,warn"
    } else {
        "protein_intake=info,warn"
    }
}

/// 日誌一律寫到 stderr，stdout 只留給指令結果
pub fn init_logger(verbose: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let (compact, json) = match format {
        LogFormat::Compact => (
            Some(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time()
                    .compact(),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .json()
                    .with_current_span(false),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(compact)
        .with(json)
        .init();
}
