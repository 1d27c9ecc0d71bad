//! Tracing subscriber setup.
//!
//! Environment variables:
//!   LOG_FORMAT  - "json" or "text" (default: "json" when ENV=PROD, else "text")
//!   LOG_FILE    - path to log file (optional, enables daily-rotated file logging)
//!   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
//!   RUST_LOG    - standard env filter (default depends on ENV)

use std::path::Path;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Environment;

/// Output format of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Resolved logging options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub format: LogFormat,
    pub file: Option<String>,
    pub ansi: Option<bool>,
    pub default_filter: &'static str,
}

impl LogSettings {
    /// Read `LOG_FORMAT`, `LOG_FILE` and `LOG_ANSI`, with defaults for `env`.
    pub fn from_env(env: Environment) -> Self {
        Self::resolve(
            env,
            std::env::var("LOG_FORMAT").ok().as_deref(),
            std::env::var("LOG_FILE").ok(),
            std::env::var("LOG_ANSI").ok().as_deref(),
        )
    }

    fn resolve(
        env: Environment,
        format: Option<&str>,
        file: Option<String>,
        ansi: Option<&str>,
    ) -> Self {
        let format = match (format, env) {
            (Some("json"), _) => LogFormat::Json,
            (Some(_), _) => LogFormat::Text,
            (None, Environment::Prod) => LogFormat::Json,
            (None, Environment::Dev) => LogFormat::Text,
        };
        let default_filter = match env {
            Environment::Prod => "songbook_api=info,songbook_db=info,songbook_enrichment=info,tower_http=info",
            Environment::Dev => "songbook_api=debug,songbook_db=debug,songbook_enrichment=debug,tower_http=debug",
        };
        Self {
            format,
            file: file.filter(|f| !f.is_empty()),
            ansi: ansi.map(|v| v == "true" || v == "1"),
            default_filter,
        }
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// life of the process.
pub fn init_tracing(settings: &LogSettings) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| settings.default_filter.into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let guard = if let Some(ref path) = settings.file {
        let file_dir = Path::new(path).parent().unwrap_or(Path::new("."));
        let file_name = Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("songbook-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        match settings.format {
            LogFormat::Json => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init(),
            LogFormat::Text => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(settings.ansi.unwrap_or(false)), // no ANSI in files
                )
                .init(),
        }
        Some(guard)
    } else {
        // Console-only output
        match settings.format {
            LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
            LogFormat::Text => {
                let mut layer = tracing_subscriber::fmt::layer();
                if let Some(ansi) = settings.ansi {
                    layer = layer.with_ansi(ansi);
                }
                registry.with(layer).init();
            }
        }
        None
    };

    info!(
        subsystem = "api",
        log_format = ?settings.format,
        log_file = settings.file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );
    guard
}
