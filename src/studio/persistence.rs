use super::{ImportSummary, Studio};
use crate::error::VrcadError;
use crate::scene::Background;
use crate::settings::{BackgroundKind, BackgroundSettings, PartSettings, Settings};

impl Studio {
    /// Capture the background and every geometry-bearing part.
    #[must_use]
    pub fn export_settings(&self) -> Settings {
        let color = self.background_color;
        let background = match self.background() {
            Background::Color(c) => BackgroundSettings {
                kind: BackgroundKind::Color,
                color: *c,
                path: None,
            },
            Background::Image(path) => BackgroundSettings {
                kind: BackgroundKind::Image,
                color,
                path: Some(path.clone()),
            },
            Background::Skybox(faces) => BackgroundSettings {
                kind: BackgroundKind::Skybox,
                color,
                path: Some(faces.dir().to_path_buf()),
            },
        };

        let parts = self
            .tree
            .traverse()
            .filter_map(|part| {
                part.geometry().map(|geometry| PartSettings {
                    name: part.name().to_owned(),
                    color: part.color(),
                    visible: part.is_visible(),
                    file_path: geometry.path().to_path_buf(),
                })
            })
            .collect();

        Settings { background, parts }
    }

    /// Replace the whole model with `settings`: background first, then one
    /// part per entry under a fresh root group, reloaded from its file.
    ///
    /// A skybox that no longer resolves falls back to the stored color.
    /// Parts whose file fails to load are kept without geometry and listed
    /// in the summary.
    ///
    /// # Errors
    ///
    /// Only tree bookkeeping errors, which indicate a bug.
    pub fn apply_settings(&mut self, settings: &Settings) -> Result<ImportSummary, VrcadError> {
        self.apply_background(&settings.background);

        self.tree.clear();
        self.root = self
            .tree
            .add_root(self.options.viewer.root_group_name.clone());

        let mut summary = ImportSummary::default();
        for entry in &settings.parts {
            let id = self.tree.add_part(Some(self.root), entry.name.clone())?;
            self.tree.set_color(id, entry.color)?;
            self.tree.set_visible(id, entry.visible)?;
            match self
                .tree
                .load_geometry(id, &entry.file_path, self.loader.as_ref())
            {
                Ok(()) => summary.loaded.push(id),
                Err(e) => summary.failed.push((entry.file_path.clone(), id, e)),
            }
        }
        log::info!(
            "applied settings: {} parts, {} failed",
            settings.parts.len(),
            summary.failed.len()
        );

        self.refresh_vr();
        Ok(summary)
    }

    fn apply_background(&mut self, background: &BackgroundSettings) {
        self.set_background(Background::Color(background.color));
        match (background.kind, &background.path) {
            (BackgroundKind::Color, _) => {}
            (BackgroundKind::Image, path) => {
                self.set_background(Background::Image(path.clone().unwrap_or_default()));
            }
            (BackgroundKind::Skybox, Some(dir)) => {
                if let Err(e) = self.load_skybox(dir) {
                    log::warn!("{e}; keeping solid background");
                }
            }
            (BackgroundKind::Skybox, None) => {
                log::warn!("skybox background without a directory");
            }
        }
    }
}
