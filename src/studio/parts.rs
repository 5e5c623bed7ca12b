use std::path::{Path, PathBuf};

use super::Studio;
use crate::error::VrcadError;
use crate::scene::Rgb;
use crate::tree::PartId;

/// Outcome of [`Studio::import_files`].
#[derive(Debug, Default)]
pub struct ImportSummary {
    /// Parts created with geometry.
    pub loaded: Vec<PartId>,
    /// Files that failed, with the part left behind without geometry.
    pub failed: Vec<(PathBuf, PartId, VrcadError)>,
}

impl ImportSummary {
    /// Whether every file loaded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

fn part_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

impl Studio {
    /// The root group, recreated if the user deleted it.
    fn import_parent(&mut self, parent: Option<PartId>) -> PartId {
        if let Some(parent) = parent {
            return parent;
        }
        if !self.tree.contains(self.root) {
            self.root = self
                .tree
                .add_root(self.options.viewer.root_group_name.clone());
        }
        self.root
    }

    /// Add an empty group under `parent` (the root group for `None`).
    ///
    /// # Errors
    ///
    /// [`VrcadError::InvalidParent`] if `parent` is not in the tree.
    pub fn add_group(
        &mut self,
        parent: Option<PartId>,
        name: impl Into<String>,
    ) -> Result<PartId, VrcadError> {
        let parent = self.import_parent(parent);
        self.tree.add_part(Some(parent), name)
    }

    /// Create one part per file under `parent` (the root group for `None`),
    /// named after the file, and load its mesh.
    ///
    /// A file that fails to load still gets its part, without geometry,
    /// and is listed in [`ImportSummary::failed`].
    ///
    /// # Errors
    ///
    /// [`VrcadError::InvalidParent`] if `parent` is not in the tree.
    pub fn import_files(
        &mut self,
        parent: Option<PartId>,
        paths: &[PathBuf],
    ) -> Result<ImportSummary, VrcadError> {
        let parent = self.import_parent(parent);
        if !self.tree.contains(parent) {
            return Err(VrcadError::InvalidParent(parent));
        }

        let mut summary = ImportSummary::default();
        for (i, path) in paths.iter().enumerate() {
            log::info!("Loading file {} of {}: {}", i + 1, paths.len(), path.display());
            let id = self.tree.add_part(Some(parent), part_name(path))?;
            self.tree
                .set_color(id, self.options.viewer.default_part_color)?;
            match self.tree.load_geometry(id, path, self.loader.as_ref()) {
                Ok(()) => summary.loaded.push(id),
                Err(e) => summary.failed.push((path.clone(), id, e)),
            }
        }
        log::info!(
            "imported {} of {} files",
            summary.loaded.len(),
            paths.len()
        );

        if !paths.is_empty() {
            self.refresh_vr();
        }
        Ok(summary)
    }

    /// Recolor a part.
    ///
    /// # Errors
    ///
    /// [`VrcadError::UnknownPart`] for an unknown id.
    pub fn set_part_color(&mut self, id: PartId, color: Rgb) -> Result<(), VrcadError> {
        self.tree.set_color(id, color)?;
        self.refresh_vr();
        Ok(())
    }

    /// Show or hide a part.
    ///
    /// # Errors
    ///
    /// [`VrcadError::UnknownPart`] for an unknown id.
    pub fn set_part_visible(&mut self, id: PartId, visible: bool) -> Result<(), VrcadError> {
        self.tree.set_visible(id, visible)?;
        self.refresh_vr();
        Ok(())
    }

    /// Rename a part. The headset scene has no names, so VR is left alone.
    ///
    /// # Errors
    ///
    /// [`VrcadError::UnknownPart`] for an unknown id.
    pub fn rename_part(
        &mut self,
        id: PartId,
        name: impl Into<String>,
    ) -> Result<(), VrcadError> {
        self.tree.set_name(id, name)
    }

    /// Delete a part and its subtree. Returns how many parts were removed.
    ///
    /// # Errors
    ///
    /// [`VrcadError::UnknownPart`] for an unknown id.
    pub fn remove_part(&mut self, id: PartId) -> Result<usize, VrcadError> {
        let removed = self.tree.remove(id)?;
        self.refresh_vr();
        Ok(removed)
    }

    /// Toggle the configured clip plane on a part.
    ///
    /// # Errors
    ///
    /// [`VrcadError::UnknownPart`] for an unknown id.
    pub fn set_clip_filter(&mut self, id: PartId, enabled: bool) -> Result<(), VrcadError> {
        let viewer = &self.options.viewer;
        self.tree
            .set_clip_filter(id, enabled, viewer.clip_origin, viewer.clip_normal)?;
        self.refresh_vr();
        Ok(())
    }

    /// Toggle the configured shrink filter on a part.
    ///
    /// # Errors
    ///
    /// [`VrcadError::UnknownPart`] for an unknown id.
    pub fn set_shrink_filter(&mut self, id: PartId, enabled: bool) -> Result<(), VrcadError> {
        self.tree
            .set_shrink_filter(id, enabled, self.options.viewer.shrink_factor)?;
        self.refresh_vr();
        Ok(())
    }
}
