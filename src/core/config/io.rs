use crate::core::config::data::{path_display, Config};
use directories::ProjectDirs;
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Errors that can occur when loading or saving configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    Read {
        /// Path to the configuration file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the configuration file as valid TOML.
    Parse {
        /// Path to the configuration file with invalid TOML.
        path: PathBuf,
        /// The TOML deserialization error.
        source: toml::de::Error,
    },

    /// Failed to write the configuration file.
    Write { path: PathBuf, source: std::io::Error },

    /// The configuration could not be rendered as TOML.
    Serialize(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "Failed to read config at {}: {}", path_display(path), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Failed to parse config at {}: {}", path_display(path), source)
            }
            ConfigError::Write { path, source } => {
                write!(f, "Failed to write config at {}: {}", path_display(path), source)
            }
            ConfigError::Serialize(source) => write!(f, "Failed to render config: {source}"),
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Write { source, .. } => Some(source),
            ConfigError::Serialize(source) => Some(source),
        }
    }
}

impl Config {
    /// Loads the config from the platform config directory, falling back to
    /// defaults when there is no such directory or no file in it.
    pub fn load() -> Result<Config, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from_path(config_path: &Path) -> Result<Config, ConfigError> {
        if !config_path.exists() {
            debug!(path = %path_display(config_path), "No config file, using defaults");
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })?;
        debug!(path = %path_display(config_path), "Loaded config");
        Ok(config)
    }

    /// Writes the config as TOML, creating missing parent directories.
    ///
    /// The file is written to a sibling temp file and renamed into place, so
    /// readers never see a partial config.
    pub fn save_to_path(&self, config_path: &Path) -> Result<(), ConfigError> {
        let write_error = |source: std::io::Error| ConfigError::Write {
            path: config_path.to_path_buf(),
            source,
        };

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        let dir = match config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(write_error)?;

        let mut staged = NamedTempFile::new_in(dir).map_err(write_error)?;
        staged.write_all(contents.as_bytes()).map_err(write_error)?;
        staged.as_file().sync_all().map_err(write_error)?;
        staged
            .persist(config_path)
            .map_err(|err| write_error(err.error))?;

        debug!(path = %path_display(config_path), "Saved config");
        Ok(())
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "mastosky").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
