//! Centralized viewer and mirror options with TOML preset support.
//!
//! Tick rates, placement, filter defaults and background colors are
//! consolidated here. Options serialize to/from TOML so a setup can be
//! kept as a named preset.

mod display;
mod mirror;
mod viewer;

use std::path::Path;

pub use display::DisplayOptions;
pub use mirror::MirrorOptions;
use serde::{Deserialize, Serialize};
pub use viewer::ViewerOptions;

use crate::error::VrcadError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[mirror]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Screen viewer behaviour.
    pub viewer: ViewerOptions,
    /// Screen background defaults.
    pub display: DisplayOptions,
    /// VR mirror session parameters.
    pub mirror: MirrorOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`VrcadError::Io`] if the file cannot be read,
    /// [`VrcadError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, VrcadError> {
        let content = std::fs::read_to_string(path).map_err(VrcadError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| VrcadError::OptionsParse(e.to_string()))?;
        log::debug!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`VrcadError::OptionsParse`] if serialization fails,
    /// [`VrcadError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), VrcadError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VrcadError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VrcadError::Io)?;
        }
        std::fs::write(path, content).map_err(VrcadError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::Rgb;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[mirror]
tick_interval_ms = 11
initial_background = "1,2,3"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.mirror.tick_interval_ms, 11);
        assert_eq!(opts.mirror.initial_background, Rgb::new(1, 2, 3));
        // Everything else should be default
        assert_eq!(opts.mirror.placement.orientation, Vec3::new(-90.0, 0.0, 0.0));
        assert_eq!(opts.viewer.rotation_timer_ms, 50);
        assert_eq!(opts.display.image_fallback, Rgb::GRAY);
    }

    #[test]
    fn bad_color_is_an_options_error() {
        let err = toml::from_str::<Options>("[display]\nbackground = \"red\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = Options::default();
        opts.viewer.shrink_factor = 0.5;
        opts.save(&dir.path().join("presets/compact.toml")).unwrap();
        Options::default()
            .save(&dir.path().join("presets/default.toml"))
            .unwrap();
        std::fs::write(dir.path().join("presets/notes.txt"), "x").unwrap();

        let loaded = Options::load(&dir.path().join("presets/compact.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(
            Options::list_presets(&dir.path().join("presets")),
            ["compact", "default"]
        );
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[viewer\n").unwrap();
        assert!(matches!(
            Options::load(&path),
            Err(VrcadError::OptionsParse(_))
        ));
    }
}
