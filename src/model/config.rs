use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Data file used when neither the command line nor the config names one
pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "todo.toml";

/// Configuration from todo.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON task file
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_file: default_data_file(),
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    /// trace | debug | info | warn | error (None = build default)
    #[serde(default)]
    pub level: Option<String>,
    /// Directory for log files (None = next to the data file)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UiConfig {
    /// Theme color overrides, e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
