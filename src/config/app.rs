use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::warn;

use super::defaults::*;
use crate::consts::{CONFIG_ENV, DATA_DIR_ENV, DEFAULT_CONFIG_FILE};
use crate::error::Result;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub cipher: CipherSettings,
    pub features: Features,
    pub selftest: SelfTestSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CipherSettings {
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Features {
    /// Rewrite the affected file after every successful mutation
    pub autosave: bool,
    /// Reject students whose course does not exist
    pub strict_course_refs: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelfTestSettings {
    pub synthetic_students: usize,
    pub rng_seed: Option<u64>,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Defaults with the data directory pointed at `dir`
    pub fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        let mut conf = Self::default();
        conf.paths.data_dir = dir.into();
        conf
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config at runtime (falls back to defaults if missing or invalid)
pub fn load() -> &'static Config {
    CONFIG.get_or_init(|| {
        let config_path =
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let config_path = Path::new(&config_path);

        let mut conf = if config_path.exists() {
            Config::from_path(config_path).unwrap_or_else(|e| {
                warn!("{}: {e}; using built-in defaults", config_path.display());
                Config::default()
            })
        } else {
            Config::default()
        };

        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            conf.paths.data_dir = dir.into();
        }

        conf
    })
}

impl Default for Paths {
    fn default() -> Self {
        default_paths()
    }
}

impl Default for CipherSettings {
    fn default() -> Self {
        default_cipher()
    }
}

impl Default for Features {
    fn default() -> Self {
        default_features()
    }
}

impl Default for SelfTestSettings {
    fn default() -> Self {
        default_selftest()
    }
}
