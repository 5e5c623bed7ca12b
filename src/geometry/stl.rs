//! STL import.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use glam::Vec3;

use super::{Mesh, Triangle};
use crate::error::VrcadError;

/// Source of mesh geometry for parts.
///
/// Implementations must not need a GUI or render context: the tree calls
/// them synchronously from whatever thread owns it.
pub trait MeshLoader {
    /// Read the mesh stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`VrcadError::GeometryLoad`] when the file is missing or
    /// cannot be parsed.
    fn load(&self, path: &Path) -> Result<Mesh, VrcadError>;
}

/// Loads ASCII and binary STL files.
#[derive(Debug, Clone, Copy, Default)]
pub struct StlLoader;

impl MeshLoader for StlLoader {
    fn load(&self, path: &Path) -> Result<Mesh, VrcadError> {
        let load_error = |reason: String| VrcadError::GeometryLoad {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path).map_err(|e| load_error(e.to_string()))?;
        let mut reader = BufReader::new(file);
        let indexed = stl_io::read_stl(&mut reader)
            .map_err(|e| load_error(e.to_string()))?;

        let vertex = |i: usize| -> Result<Vec3, VrcadError> {
            let v = indexed.vertices.get(i).ok_or_else(|| {
                load_error(format!("face references missing vertex {i}"))
            })?;
            Ok(Vec3::new(v[0], v[1], v[2]))
        };

        let mut triangles = Vec::with_capacity(indexed.faces.len());
        for face in &indexed.faces {
            let [a, b, c] = face.vertices;
            triangles.push(Triangle::new(vertex(a)?, vertex(b)?, vertex(c)?));
        }

        log::debug!(
            "loaded {} ({} triangles)",
            path.display(),
            triangles.len()
        );
        Ok(Mesh::new(triangles))
    }
}
