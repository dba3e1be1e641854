//! Connection settings
//!
//! Read from the platform-specific config folder when present:
//! - Linux: ~/.config/bucket-browser/settings.json
//! - Windows: %APPDATA%/bucket-browser/settings.json
//! - macOS: ~/Library/Application Support/bucket-browser/settings.json
//!
//! The file only ever describes where to connect. Credentials are never stored.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::s3::{ClientConfig, DEFAULT_REGION};

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

/// Connection settings loaded at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_region")]
    pub region: String,

    /// Custom S3-compatible endpoint
    #[serde(default)]
    pub endpoint_url: Option<String>,

    #[serde(default)]
    pub force_path_style: bool,

    /// Per-operation timeout; SDK defaults when absent
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint_url: None,
            force_path_style: false,
            timeout_secs: None,
        }
    }
}

impl Settings {
    /// Load settings from the default location, returning defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::settings_path()?;
        Self::load_from(&path)
    }

    /// Load settings from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Settings file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;

        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings from {:?}", path))?;

        tracing::info!(
            "Loaded settings: region={}, endpoint={:?}",
            settings.region,
            settings.endpoint_url
        );

        Ok(settings)
    }

    /// Get the path to the settings file
    pub fn settings_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "bucket-browser", "bucket-browser")
            .context("Failed to determine settings directory")?;

        Ok(proj_dirs.config_dir().join("settings.json"))
    }

    /// Client configuration described by these settings
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default().with_region(self.region.clone());

        if let Some(endpoint) = &self.endpoint_url {
            config = config.with_endpoint(endpoint.clone());
        }
        if self.force_path_style {
            config = config.with_path_style(true);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }

        config
    }
}
