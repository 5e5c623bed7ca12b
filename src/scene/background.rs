use std::path::{Path, PathBuf};

use super::Rgb;
use crate::error::VrcadError;

/// Cube-face file names inside a skybox directory, in +X, -X, +Y, -Y, +Z,
/// -Z order.
pub const SKYBOX_FACE_FILES: [&str; 6] =
    ["px.png", "nx.png", "py.png", "ny.png", "pz.png", "nz.png"];

/// The six image files of a cube-map skybox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkyboxFaces {
    dir: PathBuf,
    faces: [PathBuf; 6],
}

impl SkyboxFaces {
    /// Resolve the six faces inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`VrcadError::Skybox`] naming every face file that is
    /// missing.
    pub fn from_dir(dir: &Path) -> Result<Self, VrcadError> {
        let faces = SKYBOX_FACE_FILES.map(|name| dir.join(name));
        let missing: Vec<&str> = SKYBOX_FACE_FILES
            .iter()
            .zip(&faces)
            .filter(|(_, path)| !path.is_file())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(VrcadError::Skybox(format!(
                "{} is missing {}",
                dir.display(),
                missing.join(", ")
            )));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
            faces,
        })
    }

    /// Directory the faces were resolved from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Face paths in +X, -X, +Y, -Y, +Z, -Z order.
    #[must_use]
    pub fn faces(&self) -> &[PathBuf; 6] {
        &self.faces
    }
}

/// What is drawn behind the scene's drawables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Background {
    /// Flat color.
    Color(Rgb),
    /// Full-viewport image.
    Image(PathBuf),
    /// Cube-map skybox.
    Skybox(SkyboxFaces),
}

impl Default for Background {
    fn default() -> Self {
        Self::Color(Rgb::BLACK)
    }
}

impl Background {
    /// The flat color, if this is a color background.
    #[must_use]
    pub fn color(&self) -> Option<Rgb> {
        match self {
            Self::Color(c) => Some(*c),
            Self::Image(_) | Self::Skybox(_) => None,
        }
    }
}
