//! Persisted scene settings: background and per-part appearance.
//!
//! Stored as a flat JSON document:
//!
//! ```json
//! {
//!   "background": { "type": "color", "color": "0,0,0" },
//!   "parts": [
//!     { "name": "wheel.stl", "color": "255,0,0", "visible": true,
//!       "filePath": "/models/wheel.stl" }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::VrcadError;
use crate::scene::Rgb;

/// Kind of background stored in a settings document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    /// Flat color.
    #[default]
    Color,
    /// Image file.
    Image,
    /// Skybox directory.
    Skybox,
}

/// Background section of a settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundSettings {
    /// Which background is active.
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    /// Last solid color, kept for every kind. Black when absent.
    #[serde(default = "default_background_color")]
    pub color: Rgb,
    /// Image file or skybox directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Color,
            color: default_background_color(),
            path: None,
        }
    }
}

fn default_background_color() -> Rgb {
    Rgb::BLACK
}

/// One geometry-bearing part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSettings {
    /// Display name.
    pub name: String,
    /// Surface color.
    pub color: Rgb,
    /// Visibility flag.
    pub visible: bool,
    /// Mesh file to reload.
    #[serde(rename = "filePath")]
    pub file_path: PathBuf,
}

/// The whole settings document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Background section.
    #[serde(default)]
    pub background: BackgroundSettings,
    /// Parts in traversal order.
    #[serde(default)]
    pub parts: Vec<PartSettings>,
}

impl Settings {
    /// Parse a settings document.
    ///
    /// # Errors
    ///
    /// [`VrcadError::SettingsParse`] on malformed JSON or bad values.
    pub fn from_json(json: &str) -> Result<Self, VrcadError> {
        serde_json::from_str(json).map_err(|e| VrcadError::SettingsParse(e.to_string()))
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`VrcadError::SettingsParse`] if serialization fails.
    pub fn to_json(&self) -> Result<String, VrcadError> {
        serde_json::to_string_pretty(self).map_err(|e| VrcadError::SettingsParse(e.to_string()))
    }

    /// Read a settings file.
    ///
    /// # Errors
    ///
    /// [`VrcadError::Io`] or [`VrcadError::SettingsParse`].
    pub fn load(path: &Path) -> Result<Self, VrcadError> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&content)?;
        log::info!(
            "loaded settings from {} ({} parts)",
            path.display(),
            settings.parts.len()
        );
        Ok(settings)
    }

    /// Write a settings file, creating parent directories.
    ///
    /// # Errors
    ///
    /// [`VrcadError::Io`] or [`VrcadError::SettingsParse`].
    pub fn save(&self, path: &Path) -> Result<(), VrcadError> {
        let content = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        log::info!("saved settings to {}", path.display());
        Ok(())
    }
}
