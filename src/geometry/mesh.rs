use glam::Vec3;

/// One triangle as three world-space vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle(pub [Vec3; 3]);

impl Triangle {
    /// Construct from three vertices.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self([a, b, c])
    }

    /// Arithmetic mean of the three vertices.
    #[must_use]
    pub fn centroid(&self) -> Vec3 {
        (self.0[0] + self.0[1] + self.0[2]) / 3.0
    }

    /// Unit face normal (right-handed winding), or zero for a degenerate
    /// triangle.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        (self.0[1] - self.0[0])
            .cross(self.0[2] - self.0[0])
            .normalize_or_zero()
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Bounds {
    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths of the box.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Immutable triangle soup.
///
/// Meshes are shared between the live scene and VR snapshots behind an
/// `Arc`; nothing mutates a mesh after construction. Filters produce new
/// meshes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Build a mesh from triangles.
    #[must_use]
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// All triangles in file order.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Bounding box over all vertices, `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let mut vertices = self.triangles.iter().flat_map(|t| t.0);
        let first = vertices.next()?;
        let (min, max) = vertices
            .fold((first, first), |(min, max), v| (min.min(v), max.max(v)));
        Some(Bounds { min, max })
    }

    /// Center of the bounding box (origin for an empty mesh).
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.bounds().map_or(Vec3::ZERO, |b| b.center())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_all_vertices() {
        let mesh = Mesh::new(vec![
            Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y),
            Triangle::new(Vec3::new(-1.0, 2.0, 3.0), Vec3::Z, Vec3::ONE),
        ]);
        let b = mesh.bounds().unwrap();
        assert_eq!(b.min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(b.max, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.center(), Vec3::new(0.0, 1.0, 1.5));
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        assert!(Mesh::default().bounds().is_none());
        assert_eq!(Mesh::default().center(), Vec3::ZERO);
    }

    #[test]
    fn normal_follows_winding() {
        let t = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert_eq!(t.normal(), Vec3::Z);
        let degenerate = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert_eq!(degenerate.normal(), Vec3::ZERO);
    }
}
