use crate::constants::{
    ARCORE_CSV_URL, ARCORE_OUTPUT_PATH, DEFAULT_CONFIG_PATH, LIGAR_CSV_PATH, LIGAR_OUTPUT_PATH,
};
use crate::error::{DeviceListError, Result};
use crate::sources::ModelPolicy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub arcore: ArcoreConfig,
    pub ligar: LigarConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ArcoreConfig {
    pub url: String,
    pub output: PathBuf,
    pub timeout_seconds: Option<u64>,
}

impl Default for ArcoreConfig {
    fn default() -> Self {
        Self {
            url: ARCORE_CSV_URL.to_string(),
            output: PathBuf::from(ARCORE_OUTPUT_PATH),
            timeout_seconds: None,
        }
    }
}

impl ArcoreConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LigarConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub model_policy: ModelPolicy,
}

impl Default for LigarConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(LIGAR_CSV_PATH),
            output: PathBuf::from(LIGAR_OUTPUT_PATH),
            model_policy: ModelPolicy::default(),
        }
    }
}

impl Config {
    /// Load from an explicit path, which must exist.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            DeviceListError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Load `path` if given, else `config.toml` when present, else built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
