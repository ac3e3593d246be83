//! Application settings

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::export::DEFAULT_PAGE_SIZE;

/// Name of the export folder under the var directory
pub const EXPORT_SUBDIR: &str = "export";

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "customer-export", "customer-export")
        .ok_or_else(|| AppError::Config("Could not determine config directory".into()))
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Customer store connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    /// Store base URL (e.g., "https://shop.example.com")
    pub base_url: Option<String>,
    /// Admin user for token exchange when no access token is stored
    #[serde(default)]
    pub username: Option<String>,
    /// Customers requested per page, 0 for a single unpaged request
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            username: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub store: StoreSettings,
    /// Writable runtime data directory; exports go to its `export` folder
    #[serde(default)]
    pub var_dir: Option<PathBuf>,
}

impl Settings {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("settings.json"))
    }

    /// Load settings from disk
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load settings from a specific file, defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Default var directory under the platform data directory
    pub fn default_var_dir() -> Result<PathBuf> {
        Ok(project_dirs()?.data_dir().join("var"))
    }

    /// Resolve the var directory: explicit override, then settings, then default.
    /// The result is absolute.
    pub fn resolve_var_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        let dir = match override_dir.or(self.var_dir.as_deref()) {
            Some(dir) => dir.to_path_buf(),
            None => Self::default_var_dir()?,
        };
        std::path::absolute(&dir).map_err(|e| AppError::filesystem(dir, e))
    }

    /// Resolve the export directory (`<var-dir>/export`)
    pub fn resolve_export_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        Ok(self.resolve_var_dir(override_dir)?.join(EXPORT_SUBDIR))
    }

    /// Resolve the store base URL: explicit override, then settings
    pub fn resolve_store_url(&self, override_url: Option<&str>) -> Result<String> {
        override_url
            .or(self.store.base_url.as_deref())
            .filter(|url| !url.trim().is_empty())
            .map(|url| url.trim_end_matches('/').to_string())
            .ok_or_else(|| {
                AppError::Config(
                    "No store URL configured. Use --store-url or: customer-export config set-store <url>"
                        .into(),
                )
            })
    }
}
