use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub walk: WalkConfig,
    #[serde(default)]
    pub rng: RngConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    /// Side length N of the square grid
    #[serde(default = "default_size")]
    pub size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalkConfig {
    /// Shortest path (in cells, start included) that can be accepted
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Accepted walks per run
    #[serde(default = "default_quota")]
    pub quota: usize,
    /// Attempt cap; 0 retries forever
    #[serde(default)]
    pub max_attempts: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RngConfig {
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_enable_run_log")]
    pub enable_run_log: bool,
    #[serde(default = "default_run_log_file")]
    pub run_log_file: String,
}

// Default values
fn default_size() -> usize { 88 }
fn default_min_length() -> usize { 30 }
fn default_quota() -> usize { 100 }
fn default_data_dir() -> String { "data".to_string() }
fn default_enable_run_log() -> bool { true }
fn default_run_log_file() -> String { "run_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            quota: default_quota(),
            max_attempts: 0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_run_log: default_enable_run_log(),
            run_log_file: default_run_log_file(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            walk: WalkConfig::default(),
            rng: RngConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `config.toml`, or use defaults if it is missing or broken
    pub fn load() -> Self {
        Self::load_or_default(DEFAULT_CONFIG_PATH)
    }

    /// Same as [`Config::load`] for an explicit path
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no config file found, using default configuration");
            return Config::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded configuration");
                config
            }
            Err(e) => {
                warn!(error = %e, "using default configuration");
                Config::default()
            }
        }
    }

    /// Read and parse a config file without any fallback
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.size == 0 {
            return Err(ConfigError::Invalid {
                field: "grid.size",
                reason: "grid must have at least one cell".to_string(),
            });
        }
        if self.walk.quota == 0 {
            return Err(ConfigError::Invalid {
                field: "walk.quota",
                reason: "a run must accept at least one walk".to_string(),
            });
        }
        Ok(())
    }

    /// Attempt cap, `None` when retries are unbounded
    pub fn attempt_limit(&self) -> Option<u64> {
        (self.walk.max_attempts > 0).then_some(self.walk.max_attempts)
    }
}
