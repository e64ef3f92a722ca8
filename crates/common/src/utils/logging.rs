use std::{io, str::FromStr};
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info,sea_orm=warn,sqlx=warn";

/// Output flavour of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Initialize the global tracing subscriber.
/// - `RUST_LOG` wins over `default_filter`
/// - Safe to call more than once; later calls are ignored
pub fn init_logging(format: LogFormat, default_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = fmt().with_env_filter(env_filter).with_target(false);
    let _ = match format {
        LogFormat::Compact => builder.compact().with_writer(io::stdout).try_init(),
        LogFormat::Json => builder.json().with_writer(io::stdout).try_init(),
    };
}

/// Compact stdout logging with [`DEFAULT_FILTER`].
pub fn init_logging_default() {
    init_logging(LogFormat::Compact, DEFAULT_FILTER);
}

/// Logging for the interactive console: compact, written to stderr so the
/// menu on stdout stays readable.
pub fn init_logging_stderr(default_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}
