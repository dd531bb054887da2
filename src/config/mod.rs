//! Configuration management.
//!
//! Configuration is read from an optional TOML file. Every key is optional;
//! anything missing keeps its default.
//!
//! ```toml
//! data_dir = "/var/lib/trophy"
//! database_file = "trophy.db"
//!
//! [backup]
//! pretty = false
//! max_reported_errors = 25
//!
//! [logging]
//! format = "json"
//! level = "info,trophy=debug"
//! file = "/var/log/trophy.log"
//! ```

use crate::backup::DEFAULT_MAX_REPORTED_ERRORS;
use crate::observability::{LogFormat, LoggingConfig};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Directory name used under the platform config dir.
const APP_DIR: &str = "trophy";

/// Main configuration for trophy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrophyConfig {
    /// Directory holding the database.
    pub data_dir: PathBuf,
    /// Database file name inside `data_dir`.
    pub database_file: String,
    /// Backup behavior.
    pub backup: BackupSettings,
    /// Logging setup.
    pub logging: LoggingConfig,
}

/// Backup behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupSettings {
    /// Indent exported documents.
    pub pretty: bool,
    /// Rejection messages kept per import.
    pub max_reported_errors: usize,
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            pretty: true,
            max_reported_errors: DEFAULT_MAX_REPORTED_ERRORS,
        }
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Data directory.
    pub data_dir: Option<String>,
    /// Database file name.
    pub database_file: Option<String>,
    /// Backup section.
    pub backup: Option<ConfigFileBackup>,
    /// Logging section.
    pub logging: Option<ConfigFileLogging>,
}

/// Backup section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileBackup {
    /// Pretty printing.
    pub pretty: Option<bool>,
    /// Error message cap.
    pub max_reported_errors: Option<usize>,
}

/// Logging section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLogging {
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Filter directive.
    pub level: Option<String>,
    /// Log file path.
    pub file: Option<String>,
}

impl Default for TrophyConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".trophy"),
            database_file: "trophy.db".to_string(),
            backup: BackupSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TrophyConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read,
    /// [`Error::OperationFailed`] if it is not valid TOML, and
    /// [`Error::InvalidInput`] for values that cannot be interpreted.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| Error::io("read_config_file", &e))?;
        Self::parse_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Same as [`load_from_file`](Self::load_from_file) minus I/O.
    pub fn parse_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| Error::operation("parse_config_file", e))?;
        Self::from_config_file(file)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/trophy/` on macOS)
    /// 2. XDG config dir (`~/.config/trophy/`)
    ///
    /// Returns the default configuration if no readable file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join(APP_DIR).join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join(APP_DIR)
                .join("config.toml"),
        ];

        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring config file");
                },
            }
        }

        Self::default()
    }

    fn from_config_file(file: ConfigFile) -> Result<Self> {
        let mut config = Self::default();

        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(database_file) = file.database_file {
            config.database_file = database_file;
        }
        if let Some(backup) = file.backup {
            if let Some(v) = backup.pretty {
                config.backup.pretty = v;
            }
            if let Some(v) = backup.max_reported_errors {
                config.backup.max_reported_errors = v;
            }
        }
        if let Some(logging) = file.logging {
            if let Some(format) = logging.format {
                config.logging.format = LogFormat::parse(&format)?;
            }
            if let Some(level) = logging.level {
                config.logging.level = level;
            }
            config.logging.file = logging.file.map(PathBuf::from);
        }

        Ok(config)
    }

    /// Full path of the database file.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Sets the backup settings.
    #[must_use]
    pub const fn with_backup(mut self, backup: BackupSettings) -> Self {
        self.backup = backup;
        self
    }
}
