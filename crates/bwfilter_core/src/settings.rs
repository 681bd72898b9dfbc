//! Persistent Design Settings
//!
//! Loads and saves [`DesignConfig`] as JSON.
//!
//! # Storage Locations
//! - Linux: `~/.config/bwfilter/design.json`
//! - Windows: `%APPDATA%\bwfilter\design.json`
//! - macOS: `~/Library/Application Support/bwfilter/design.json`

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{error, info};

use crate::config::DesignConfig;
use crate::error::{CoreError, CoreResult};

impl DesignConfig {
    /// Load from the platform location, or return default if missing/corrupt
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_or_default(&path),
            _ => {
                info!("Using default design settings");
                Self::default()
            }
        }
    }

    /// Load from `path`, falling back to defaults with a logged error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load design settings from {:?}: {}", path, e);
                info!("Using default design settings");
                Self::default()
            }
        }
    }

    /// Load and validate from `path`
    pub fn load_from(path: &Path) -> CoreResult<Self> {
        let file = fs::File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        info!("Design settings loaded from {:?}", path);
        Ok(config)
    }

    /// Save to the platform location
    pub fn save(&self) -> CoreResult<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| CoreError::ConfigError("Could not determine config path".into()))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;

        info!("Design settings saved to {:?}", path);
        Ok(())
    }

    /// Platform-specific settings file path
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "bwfilter", "bwfilter")
            .map(|proj| proj.config_dir().join("design.json"))
    }
}
