use super::Result;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// API origin used when the front end runs on a developer machine
pub const LOCAL_DEV_API_BASE: &str = "http://localhost:5000";
pub const LOCAL_DEV_HOST: &str = "localhost";

const APP_DIR_NAME: &str = "country-risk";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Base URL for a page served from `host`.
///
/// Local development talks to the API on its own port; anywhere else the API
/// shares the page's origin and the base is empty.
pub fn api_base_for_host(host: &str) -> &'static str {
    if host == LOCAL_DEV_HOST {
        LOCAL_DEV_API_BASE
    } else {
        ""
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub api_base: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Config {
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: format!("{}: {}", config_path.display(), e),
            })?;

        Ok(config)
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigSaveFailed {
            message: e.to_string(),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(config_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Pick the API base: explicit override, then the config file, then the
    /// rule for the host the page is served from.
    pub fn resolve_api_base(&self, override_base: Option<&str>, host: &str) -> String {
        override_base
            .or(self.api_base.as_deref())
            .unwrap_or_else(|| api_base_for_host(host))
            .trim_end_matches('/')
            .to_string()
    }
}
