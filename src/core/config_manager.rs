// src/core/config_manager.rs
//! Configuration from the environment plus an optional `jobtrack.toml`

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::FsOps;

pub const CONFIG_FILE: &str = "jobtrack.toml";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub storage: StorageSettings,
    pub logo: LogoSettings,
}

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub name: String,
    pub base_dir: PathBuf,
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageSettings {
    pub cookie_quota_bytes: usize,
    pub cookie_expiry_days: i64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            cookie_quota_bytes: 4096,
            cookie_expiry_days: 365,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogoSettings {
    pub api_key: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    storage: StorageSettings,
    logo: LogoSettings,
}

impl ConfigManager {
    /// Load all configuration
    pub fn load() -> Result<Self> {
        let name = std::env::var("JOBTRACK_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string());
        info!("Loading configuration for environment: {}", name);

        let base_dir = if name == "production" {
            PathBuf::from("/app")
        } else {
            std::env::current_dir().context("Failed to get current directory")?
        };

        Self::load_from(
            name,
            &base_dir,
            std::env::var("JOBTRACK_DATA_DIR").ok(),
            std::env::var("LOGO_API_KEY").ok(),
        )
    }

    /// Same as `load` with the environment lookups supplied by the caller
    pub fn load_from(
        name: String,
        base_dir: &Path,
        data_dir_var: Option<String>,
        logo_key_var: Option<String>,
    ) -> Result<Self> {
        let file = Self::load_file(&base_dir.join(CONFIG_FILE))?;

        let data_dir = data_dir_var
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or(file.data_dir)
            .unwrap_or_else(|| PathBuf::from(".jobtrack"));

        let mut logo = file.logo;
        if let Some(key) = logo_key_var.filter(|v| !v.trim().is_empty()) {
            logo.api_key = key;
        }

        Ok(Self {
            environment: EnvironmentConfig {
                name,
                data_dir: FsOps::normalize_path(base_dir, &data_dir),
                base_dir: base_dir.to_path_buf(),
            },
            storage: file.storage,
            logo,
        })
    }

    fn load_file(path: &Path) -> Result<ConfigFile> {
        match FsOps::read_optional(path)? {
            Some(raw) => {
                info!("Reading configuration file: {}", path.display());
                toml::from_str(&raw)
                    .with_context(|| format!("Failed to parse {}", path.display()))
            }
            None => Ok(ConfigFile::default()),
        }
    }

    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.environment.data_dir = FsOps::normalize_path(&self.environment.base_dir, &dir);
        self
    }

    /// Ensure the data directory exists
    pub fn ensure_directories(&self) -> Result<()> {
        FsOps::ensure_dir_exists(&self.environment.data_dir)
    }
}
