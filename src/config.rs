//! Command line and environment configuration, and logging setup.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::PlaygroundError;
use crate::server::RouterConfig;

/// Log level used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Serve the test automation playground.
#[derive(Debug, Clone, Parser)]
#[command(name = "playground", version, about)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "PLAYGROUND_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: String,

    /// Directory holding webui.js and webui.css.
    #[arg(long, env = "PLAYGROUND_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Overrides the page title.
    #[arg(long, env = "PLAYGROUND_TITLE")]
    pub title: Option<String>,

    #[arg(long, env = "PLAYGROUND_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Config {
    /// Applies the static directory and title to `router`.
    pub fn apply(&self, router: RouterConfig) -> RouterConfig {
        let router = router.static_dir(self.static_dir.clone());
        match &self.title {
            Some(title) => router.title(title.clone()),
            None => router,
        }
    }
}

/// Installs the global tracing subscriber. `RUST_LOG` takes precedence over
/// [`DEFAULT_LOG_LEVEL`].
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_logging(format: LogFormat) -> Result<(), PlaygroundError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Json => registry.with(fmt::layer().json().with_target(false)).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(false)).try_init(),
    };
    installed.map_err(|err| PlaygroundError::Logging(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["playground"]).unwrap();
        assert_eq!(config.addr, "127.0.0.1:3000");
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.title, None);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = Config::try_parse_from([
            "playground",
            "--addr",
            "0.0.0.0:8080",
            "--static-dir",
            "/srv/assets",
            "--title",
            "QA Sandbox",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(config.addr, "0.0.0.0:8080");
        assert_eq!(config.static_dir, PathBuf::from("/srv/assets"));
        assert_eq!(config.log_format, LogFormat::Json);

        let router = config.apply(RouterConfig::new(|_| {}, ""));
        assert_eq!(router.title, "QA Sandbox");
        assert_eq!(router.static_dir, PathBuf::from("/srv/assets"));
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        assert!(Config::try_parse_from(["playground", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn test_apply_keeps_title_without_override() {
        let config = Config::try_parse_from(["playground"]).unwrap();
        let router = config.apply(RouterConfig::new(|_| {}, "").title("Kept"));
        assert_eq!(router.title, "Kept");
    }
}
