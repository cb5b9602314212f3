//! Loads `config.toml` and applies environment overrides.

use crate::paths::PortalPaths;
use portal_core::config::PortalConfig;
use portal_core::{PortalError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable overriding `api_url`.
pub const API_URL_ENV: &str = "PORTAL_API_URL";

pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Service for the default `config.toml`.
    pub fn new(paths: &PortalPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| PortalError::config(e.to_string()))?;
        Ok(Self { path })
    }

    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file. A missing or empty file yields the defaults.
    pub fn load(&self) -> Result<PortalConfig> {
        if !self.path.exists() {
            info!("No config at {:?}, using defaults", self.path);
            return Ok(PortalConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(PortalConfig::default());
        }

        let config: PortalConfig = toml::from_str(&content).map_err(|e| {
            PortalError::config(format!("Failed to parse {:?}: {}", self.path, e))
        })?;
        Ok(config)
    }

    /// Reads the file and applies process environment overrides.
    pub fn load_with_env(&self) -> Result<PortalConfig> {
        let config = self.load()?;
        Ok(apply_env_overrides(config, |key| std::env::var(key).ok()))
    }

    pub fn save(&self, config: &PortalConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(config)?)?;
        Ok(())
    }
}

/// Applies overrides from an environment lookup.
pub fn apply_env_overrides(
    mut config: PortalConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> PortalConfig {
    if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
        config.api_url = url.trim().to_string();
    }
    config
}
