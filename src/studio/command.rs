//! The studio's complete interactive vocabulary.
//!
//! Every user-facing operation, whether it comes from a menu, a tree
//! context action, a slider or a script, is a [`StudioCommand`]. Front ends
//! build commands and pass them to [`Studio::execute`].

use std::path::PathBuf;
use std::sync::Arc;

use super::Studio;
use crate::error::VrcadError;
use crate::mirror::HeadsetProvider;
use crate::scene::{Background, Rgb};
use crate::tree::PartId;

/// A discrete or parameterized operation the studio can perform.
///
/// ```ignore
/// studio.execute(StudioCommand::SetRotationSpeed { degrees_per_tick: 5.0 })?;
/// studio.execute(StudioCommand::StopVr)?;
/// ```
#[derive(Debug, Clone)]
pub enum StudioCommand {
    // ── Structure ───────────────────────────────────────────────────
    /// Add an empty group.
    AddGroup {
        /// Parent, or the root group for `None`.
        parent: Option<PartId>,
        /// Group name.
        name: String,
    },

    /// Import mesh files as new parts.
    ImportFiles {
        /// Parent, or the root group for `None`.
        parent: Option<PartId>,
        /// Files to import, one part each.
        paths: Vec<PathBuf>,
    },

    /// Delete a part and its subtree.
    RemovePart {
        /// Part to delete.
        part: PartId,
    },

    // ── Part appearance ─────────────────────────────────────────────
    /// Recolor a part.
    SetPartColor {
        /// Target part.
        part: PartId,
        /// New color.
        color: Rgb,
    },

    /// Show or hide a part.
    SetPartVisible {
        /// Target part.
        part: PartId,
        /// New visibility.
        visible: bool,
    },

    /// Rename a part.
    RenamePart {
        /// Target part.
        part: PartId,
        /// New name.
        name: String,
    },

    // ── Filters ─────────────────────────────────────────────────────
    /// Toggle the clip filter.
    SetClipFilter {
        /// Target part.
        part: PartId,
        /// Whether clipping is on.
        enabled: bool,
    },

    /// Toggle the shrink filter.
    SetShrinkFilter {
        /// Target part.
        part: PartId,
        /// Whether shrinking is on.
        enabled: bool,
    },

    // ── Environment ─────────────────────────────────────────────────
    /// Turntable speed, on screen and in VR.
    SetRotationSpeed {
        /// Degrees per tick around Z.
        degrees_per_tick: f32,
    },

    /// Light intensity from the raw slider position.
    SetLightIntensity {
        /// Slider value; divided by the configured scale.
        slider: i32,
    },

    /// Replace the screen background.
    SetBackground {
        /// New background.
        background: Background,
    },

    /// Use the cube faces in a directory as the background.
    LoadSkybox {
        /// Directory holding the six face images.
        dir: PathBuf,
    },

    // ── VR ──────────────────────────────────────────────────────────
    /// Start mirroring into a headset.
    StartVr {
        /// Headset to connect on the worker thread.
        provider: Arc<dyn HeadsetProvider>,
    },

    /// Stop mirroring and join the worker.
    StopVr,
}

impl Studio {
    /// Execute a command.
    ///
    /// Imports succeed even when individual files fail; those failures are
    /// logged. Use [`Studio::import_files`] directly to inspect them.
    ///
    /// # Errors
    ///
    /// Whatever the underlying operation reports.
    pub fn execute(&mut self, command: StudioCommand) -> Result<(), VrcadError> {
        log::debug!("execute {command:?}");
        match command {
            StudioCommand::AddGroup { parent, name } => {
                let _ = self.add_group(parent, name)?;
            }
            StudioCommand::ImportFiles { parent, paths } => {
                let summary = self.import_files(parent, &paths)?;
                for (path, _, e) in &summary.failed {
                    log::warn!("import of {} failed: {e}", path.display());
                }
            }
            StudioCommand::RemovePart { part } => {
                let _ = self.remove_part(part)?;
            }
            StudioCommand::SetPartColor { part, color } => self.set_part_color(part, color)?,
            StudioCommand::SetPartVisible { part, visible } => {
                self.set_part_visible(part, visible)?;
            }
            StudioCommand::RenamePart { part, name } => self.rename_part(part, name)?,
            StudioCommand::SetClipFilter { part, enabled } => {
                self.set_clip_filter(part, enabled)?;
            }
            StudioCommand::SetShrinkFilter { part, enabled } => {
                self.set_shrink_filter(part, enabled)?;
            }
            StudioCommand::SetRotationSpeed { degrees_per_tick } => {
                self.set_rotation_speed(degrees_per_tick);
            }
            StudioCommand::SetLightIntensity { slider } => {
                self.set_light_intensity_from_slider(slider);
            }
            StudioCommand::SetBackground { background } => self.set_background(background),
            StudioCommand::LoadSkybox { dir } => self.load_skybox(&dir)?,
            StudioCommand::StartVr { provider } => self.start_vr(provider)?,
            StudioCommand::StopVr => {
                if let Some(report) = self.stop_vr()? {
                    log::info!(
                        "vr mirror stopped after {} frames ({})",
                        report.frames,
                        report.reason
                    );
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::HeadlessHeadsetProvider;
    use crate::options::Options;

    #[test]
    fn commands_route_to_operations() {
        let mut studio = Studio::new(Options::default());
        studio
            .execute(StudioCommand::AddGroup {
                parent: None,
                name: "wheels".to_owned(),
            })
            .unwrap();
        let group = studio.tree().find_by_name("wheels").unwrap();

        studio
            .execute(StudioCommand::RenamePart {
                part: group,
                name: "tyres".to_owned(),
            })
            .unwrap();
        assert_eq!(studio.tree().part(group).unwrap().name(), "tyres");

        studio
            .execute(StudioCommand::SetRotationSpeed { degrees_per_tick: 3.0 })
            .unwrap();
        assert_eq!(studio.rotation_speed(), 3.0);

        studio
            .execute(StudioCommand::SetLightIntensity { slider: 90 })
            .unwrap();
        assert_eq!(studio.light_intensity(), 1.0);

        studio
            .execute(StudioCommand::RemovePart { part: group })
            .unwrap();
        assert!(!studio.tree().contains(group));
    }

    #[test]
    fn errors_propagate() {
        let mut studio = Studio::new(Options::default());
        let group = studio.add_group(None, "g").unwrap();
        let _ = studio.remove_part(group).unwrap();
        let err = studio
            .execute(StudioCommand::SetPartColor {
                part: group,
                color: Rgb::BLACK,
            })
            .unwrap_err();
        assert!(matches!(err, VrcadError::UnknownPart(_)));
    }

    #[test]
    fn vr_start_and_stop_by_command() {
        let mut studio = Studio::new(Options::default());
        studio
            .execute(StudioCommand::StartVr {
                provider: Arc::new(HeadlessHeadsetProvider::new()),
            })
            .unwrap();
        assert!(studio.is_vr_active());
        studio.execute(StudioCommand::StopVr).unwrap();
        assert!(!studio.is_vr_active());
        assert!(studio.vr_session().is_none());
    }
}
