use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::default_log_level;
use crate::model::config::{AppConfig, DEFAULT_CONFIG_FILE};

/// Error type for reading todo.toml
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// A parsed config and the directory its relative paths are based on.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub base_dir: PathBuf,
    /// File the config came from (None = built-in defaults)
    pub source: Option<PathBuf>,
}

/// Load the config.
///
/// An explicit path must exist. Without one, `todo.toml` in `cwd` is used
/// when present and defaults apply otherwise.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<LoadedConfig, ConfigError> {
    let path = match explicit {
        Some(p) => cwd.join(p),
        None => {
            let candidate = cwd.join(DEFAULT_CONFIG_FILE);
            if !candidate.is_file() {
                return Ok(LoadedConfig {
                    config: AppConfig::default(),
                    base_dir: cwd.to_path_buf(),
                    source: None,
                });
            }
            candidate
        }
    };

    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let config = parse_config(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;
    let base_dir = path
        .parent()
        .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);

    Ok(LoadedConfig {
        config,
        base_dir,
        source: Some(path),
    })
}

pub fn parse_config(text: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(text)
}

impl LoadedConfig {
    /// Data file: the command-line path (relative to `cwd`) wins over the
    /// config entry (relative to the config file).
    pub fn data_file(&self, flag: Option<&Path>, cwd: &Path) -> PathBuf {
        match flag {
            Some(p) => cwd.join(p),
            None => self.base_dir.join(&self.config.storage.data_file),
        }
    }

    /// Log directory: configured, or the directory holding the data file.
    pub fn log_dir(&self, data_file: &Path) -> PathBuf {
        match &self.config.log.dir {
            Some(dir) => self.base_dir.join(dir),
            None => data_file
                .parent()
                .map_or_else(|| self.base_dir.clone(), Path::to_path_buf),
        }
    }

    pub fn log_level(&self) -> &str {
        self.config
            .log
            .level
            .as_deref()
            .unwrap_or(default_log_level())
    }
}
