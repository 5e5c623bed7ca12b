use std::path::Path;

use glam::Vec3;

use super::Studio;
use crate::error::VrcadError;
use crate::mirror::Axis;
use crate::scene::{Background, SkyboxFaces};

impl Studio {
    // -- Turntable --

    /// Set the turntable speed in degrees per tick around Z. The running
    /// mirror session turns at the same rate per its own tick.
    pub fn set_rotation_speed(&mut self, degrees_per_tick: f32) {
        self.rotation_speed = degrees_per_tick;
        if let Some(vr) = &self.vr {
            vr.set_rotation(Axis::Z, degrees_per_tick);
        }
    }

    /// Turntable timer callback: turn every visible part by the current
    /// speed and redraw. Returns how many parts turned.
    ///
    /// # Errors
    ///
    /// Whatever the render target reports.
    pub fn animation_tick(&mut self) -> Result<usize, VrcadError> {
        if self.rotation_speed == 0.0 {
            return Ok(0);
        }
        let turned = self
            .tree
            .rotate_visible(Vec3::new(0.0, 0.0, self.rotation_speed));
        let _ = self.render()?;
        Ok(turned)
    }

    // -- Background --

    /// Replace the screen background.
    ///
    /// An image whose file is missing (or whose path is empty) shows the
    /// configured fallback color instead. Solid colors are forwarded to the
    /// running mirror session.
    pub fn set_background(&mut self, background: Background) {
        let background = match background {
            Background::Color(color) => {
                self.background_color = color;
                if let Some(vr) = &self.vr {
                    vr.set_background_color(color);
                    self.vr_background = Some(color);
                }
                Background::Color(color)
            }
            Background::Image(path) if path.as_os_str().is_empty() || !path.is_file() => {
                log::warn!(
                    "background image '{}' not found, using fallback color",
                    path.display()
                );
                Background::Color(self.options.display.image_fallback)
            }
            other => other,
        };
        self.tree.set_background(background);
    }

    /// Resolve the six cube faces in `dir` and use them as the background.
    ///
    /// # Errors
    ///
    /// [`VrcadError::Skybox`] naming the missing faces; the background is
    /// left unchanged.
    pub fn load_skybox(&mut self, dir: &Path) -> Result<(), VrcadError> {
        let faces = SkyboxFaces::from_dir(dir)?;
        log::info!("skybox loaded from {}", dir.display());
        self.set_background(Background::Skybox(faces));
        Ok(())
    }

    /// Current screen background.
    #[must_use]
    pub fn background(&self) -> &Background {
        self.tree.scene().background()
    }

    // -- Light --

    /// Set the light intensity on screen and in the mirror.
    pub fn set_light_intensity(&mut self, intensity: f32) {
        self.tree.set_light_intensity(intensity);
        if let Some(vr) = &self.vr {
            vr.set_light_intensity(self.light_intensity());
        }
    }

    /// Set the light intensity from a raw slider position.
    pub fn set_light_intensity_from_slider(&mut self, value: i32) {
        let intensity = self.options.viewer.light_from_slider(value);
        self.set_light_intensity(intensity);
    }

    /// Current light intensity.
    #[must_use]
    pub fn light_intensity(&self) -> f32 {
        self.tree.scene().light_intensity()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::geometry::write_triangle_stl;
    use crate::options::Options;
    use crate::scene::{Rgb, SKYBOX_FACE_FILES};

    #[test]
    fn timer_turns_only_visible_parts() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write_triangle_stl(dir.path(), "a.stl"),
            write_triangle_stl(dir.path(), "b.stl"),
        ];
        let mut studio = Studio::new(Options::default());
        let ids = studio.import_files(None, &files).unwrap().loaded;
        studio.set_part_visible(ids[1], false).unwrap();

        assert_eq!(studio.animation_tick().unwrap(), 0);
        studio.set_rotation_speed(2.0);
        for _ in 0..3 {
            assert_eq!(studio.animation_tick().unwrap(), 1);
        }
        let tree = studio.tree();
        assert_eq!(tree.proxy(ids[0]).unwrap().transform.orientation.z, 6.0);
        assert_eq!(tree.proxy(ids[1]).unwrap().transform.orientation.z, 0.0);
    }

    #[test]
    fn missing_image_falls_back_to_gray() {
        let mut studio = Studio::new(Options::default());
        studio.set_background(Background::Image(PathBuf::new()));
        assert_eq!(studio.background(), &Background::Color(Rgb::GRAY));

        studio.set_background(Background::Image(PathBuf::from("/no/such.png")));
        assert_eq!(studio.background(), &Background::Color(Rgb::GRAY));
    }

    #[test]
    fn existing_image_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("bg.png");
        std::fs::write(&image, b"png").unwrap();
        let mut studio = Studio::new(Options::default());
        studio.set_background(Background::Image(image.clone()));
        assert_eq!(studio.background(), &Background::Image(image));
    }

    #[test]
    fn skybox_needs_all_six_faces() {
        let dir = tempfile::tempdir().unwrap();
        for face in &SKYBOX_FACE_FILES[..5] {
            std::fs::write(dir.path().join(face), b"png").unwrap();
        }
        let mut studio = Studio::new(Options::default());
        let err = studio.load_skybox(dir.path()).unwrap_err();
        assert!(matches!(err, VrcadError::Skybox(ref msg) if msg.contains("nz.png")));
        assert_eq!(studio.background(), &Background::Color(Rgb::BLACK));

        std::fs::write(dir.path().join(SKYBOX_FACE_FILES[5]), b"png").unwrap();
        studio.load_skybox(dir.path()).unwrap();
        assert!(matches!(studio.background(), Background::Skybox(_)));
    }

    #[test]
    fn slider_sets_light() {
        let mut studio = Studio::new(Options::default());
        studio.set_light_intensity_from_slider(45);
        assert_eq!(studio.light_intensity(), 0.5);
    }

    #[test]
    fn solid_color_is_remembered() {
        let mut studio = Studio::new(Options::default());
        studio.set_background(Background::Color(Rgb::new(9, 8, 7)));
        studio.set_background(Background::Image(PathBuf::new()));
        assert_eq!(studio.background_color(), Rgb::new(9, 8, 7));
    }
}
