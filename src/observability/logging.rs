//! Logging configuration.

use crate::config::LoggingSettings;
use crate::{Error, Result};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Filter used when nothing else is configured.
const DEFAULT_FILTER: &str = "warn";

/// Filter used with `--verbose`.
const VERBOSE_FILTER: &str = "deckport=debug,info";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(Error::InvalidInput(format!(
                "log format must be 'pretty' or 'json', got '{other}'"
            ))),
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Event filter.
    pub filter: EnvFilter,
    /// Optional log file (appended to).
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Builds the logging configuration.
    ///
    /// Filter precedence: `RUST_LOG`, then `--verbose`, then the configured
    /// filter, then `warn`. An unparsable configured filter falls back to the
    /// default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the format is neither `pretty` nor
    /// `json`.
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Result<Self> {
        let format = settings
            .and_then(|s| s.format.as_deref())
            .map(str::parse)
            .transpose()?
            .unwrap_or_default();
        let file = settings.and_then(|s| s.file.clone());

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = if verbose {
                VERBOSE_FILTER
            } else {
                settings
                    .and_then(|s| s.filter.as_deref())
                    .unwrap_or(DEFAULT_FILTER)
            };
            EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        });

        Ok(Self {
            format,
            filter,
            file,
        })
    }
}
