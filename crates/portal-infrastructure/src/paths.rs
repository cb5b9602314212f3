//! Unified path management for portal client files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/edu-portal/        # Config directory
//! ├── config.toml              # Client configuration
//! ├── session.json             # Persisted token + user
//! └── logs/                    # Client logs
//!     └── portal.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "edu-portal";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home/config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves client file locations.
///
/// A base path replaces the platform config directory, which keeps tests
/// inside a temporary directory.
#[derive(Debug, Clone, Default)]
pub struct PortalPaths {
    base: Option<PathBuf>,
}

impl PortalPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("session.json"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_under_base() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = PortalPaths::new(Some(temp.path()));
        assert_eq!(paths.config_file().unwrap(), temp.path().join("config.toml"));
        assert_eq!(paths.session_file().unwrap(), temp.path().join("session.json"));
        assert_eq!(paths.logs_dir().unwrap(), temp.path().join("logs"));
    }
}
