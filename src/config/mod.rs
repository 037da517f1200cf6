//! Configuration management.
//!
//! Configuration comes from a TOML file, then environment overrides:
//!
//! | Key | Env override | Default |
//! |-----|--------------|---------|
//! | `data_dir` | `DECKPORT_DATA_DIR` | `<platform data dir>/deckport` |
//! | `database` | | `<data_dir>/deckport.db` |
//! | `max_file_size` | `DECKPORT_MAX_FILE_SIZE` | 5 MiB |
//! | `default_description` | | `"Default description"` |
//! | `logging.format` | `DECKPORT_LOG_FORMAT` | `pretty` |
//! | `logging.filter` | `RUST_LOG` | `warn` |
//! | `logging.file` | `DECKPORT_LOG_FILE` | stderr |

use crate::models::DEFAULT_DESCRIPTION;
use crate::observability::LogFormat;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "DECKPORT_CONFIG_PATH";

/// Largest file accepted for import by default (5 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Main configuration for deckport.
#[derive(Debug, Clone)]
pub struct DeckportConfig {
    /// Directory holding the database.
    pub data_dir: PathBuf,
    /// Explicit database path; overrides `<data_dir>/deckport.db`.
    pub database: Option<PathBuf>,
    /// Largest accepted import file, in bytes (measured before base64 encoding).
    pub max_file_size: u64,
    /// Description given to imported study sets.
    pub default_description: String,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Config files that were loaded, in order.
    pub config_sources: Vec<PathBuf>,
}

/// Logging section of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Output format: `pretty` or `json`.
    pub format: Option<String>,
    /// `tracing` filter directive.
    pub filter: Option<String>,
    /// Log file path; logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Data directory.
    pub data_dir: Option<String>,
    /// Database path.
    pub database: Option<String>,
    /// Max import file size in bytes.
    pub max_file_size: Option<u64>,
    /// Study set description.
    pub default_description: Option<String>,
    /// Logging section.
    pub logging: Option<ConfigFileLogging>,
}

/// Logging section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLogging {
    /// Output format.
    pub format: Option<String>,
    /// Filter directive.
    pub filter: Option<String>,
    /// Log file path.
    pub file: Option<String>,
}

impl Default for DeckportConfig {
    fn default() -> Self {
        let data_dir = directories::BaseDirs::new().map_or_else(
            || PathBuf::from(".deckport"),
            |dirs| dirs.data_dir().join("deckport"),
        );
        Self {
            data_dir,
            database: None,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            default_description: DEFAULT_DESCRIPTION.to_string(),
            logging: LoggingSettings::default(),
            config_sources: Vec::new(),
        }
    }
}

impl DeckportConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        let mut config = Self::from_config_file(file);
        config.config_sources.push(path.to_path_buf());
        Ok(config)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the platform config dir (`~/.config/deckport/config.toml` on
    /// Linux) and falls back to defaults when no readable file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let path = base_dirs.config_dir().join("deckport").join("config.toml");
        if path.exists() {
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Loads configuration the way the CLI does.
    ///
    /// An explicit `path` wins, then [`CONFIG_PATH_ENV`], then the default
    /// location. Environment overrides are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be loaded or an
    /// override is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = if let Some(path) = path {
            Self::load_from_file(path)?
        } else {
            match std::env::var(CONFIG_PATH_ENV) {
                Ok(env_path) if !env_path.trim().is_empty() => {
                    Self::load_from_file(Path::new(&env_path))?
                },
                _ => Self::load_default(),
            }
        };

        config.apply_env_overrides()
    }

    /// Applies `DECKPORT_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if an override cannot be parsed.
    pub fn apply_env_overrides(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    ///
    /// Blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if an override cannot be parsed.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get("DECKPORT_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(size) = get("DECKPORT_MAX_FILE_SIZE") {
            self.max_file_size = size.trim().parse().map_err(|_| {
                Error::InvalidInput(format!(
                    "DECKPORT_MAX_FILE_SIZE must be a byte count, got '{size}'"
                ))
            })?;
        }
        if let Some(format) = get("DECKPORT_LOG_FORMAT") {
            format.parse::<LogFormat>().map_err(|_| {
                Error::InvalidInput(format!(
                    "DECKPORT_LOG_FORMAT must be 'pretty' or 'json', got '{format}'"
                ))
            })?;
            self.logging.format = Some(format);
        }
        if let Some(file) = get("DECKPORT_LOG_FILE") {
            self.logging.file = Some(PathBuf::from(file));
        }

        Ok(self)
    }

    /// Converts a `ConfigFile` to `DeckportConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        config.database = file.database.map(PathBuf::from);
        if let Some(max_file_size) = file.max_file_size {
            config.max_file_size = max_file_size;
        }
        if let Some(description) = file.default_description {
            config.default_description = description;
        }
        if let Some(logging) = file.logging {
            config.logging = LoggingSettings {
                format: logging.format,
                filter: logging.filter,
                file: logging.file.map(PathBuf::from),
            };
        }

        config
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Returns the database path.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| self.data_dir.join("deckport.db"))
    }
}
