//! Display filters applied on top of a part's original mesh.
//!
//! Filters never touch their input. [`apply_filters`] always starts from the
//! original geometry and runs shrink before clip, so toggling filters in any
//! order converges on the same displayed mesh.

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{Mesh, Triangle};

/// Per-triangle shrink toward the triangle centroid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShrinkFilter {
    /// Whether the filter participates in the pipeline.
    pub enabled: bool,
    /// Scale applied about each centroid (1.0 = unchanged).
    pub factor: f32,
}

impl Default for ShrinkFilter {
    fn default() -> Self {
        Self {
            enabled: false,
            factor: 0.8,
        }
    }
}

/// Half-space clip against a plane. Geometry on the side the normal points
/// to is kept; triangles crossing the plane are cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipFilter {
    /// Whether the filter participates in the pipeline.
    pub enabled: bool,
    /// A point on the clip plane.
    pub origin: Vec3,
    /// Plane normal; need not be unit length.
    pub normal: Vec3,
}

impl Default for ClipFilter {
    fn default() -> Self {
        Self {
            enabled: false,
            origin: Vec3::ZERO,
            normal: Vec3::NEG_X,
        }
    }
}

/// Shrink every triangle about its own centroid.
#[must_use]
pub fn shrink(mesh: &Mesh, factor: f32) -> Mesh {
    let triangles = mesh
        .triangles()
        .iter()
        .map(|t| {
            let c = t.centroid();
            Triangle(t.0.map(|v| c + (v - c) * factor))
        })
        .collect();
    Mesh::new(triangles)
}

/// Keep the part of `mesh` where `normal · (p - origin) >= 0`.
#[must_use]
pub fn clip(mesh: &Mesh, origin: Vec3, normal: Vec3) -> Mesh {
    let mut out = Vec::with_capacity(mesh.triangle_count());
    for t in mesh.triangles() {
        clip_triangle(t, origin, normal, &mut out);
    }
    Mesh::new(out)
}

/// Sutherland-Hodgman against a single plane, fan-triangulated.
fn clip_triangle(t: &Triangle, origin: Vec3, normal: Vec3, out: &mut Vec<Triangle>) {
    let dist = t.0.map(|v| normal.dot(v - origin));
    if dist.iter().all(|&d| d >= 0.0) {
        out.push(*t);
        return;
    }
    if dist.iter().all(|&d| d < 0.0) {
        return;
    }

    // A triangle clipped by one plane has at most four vertices.
    let mut poly: Vec<Vec3> = Vec::with_capacity(4);
    for i in 0..3 {
        let j = (i + 1) % 3;
        let (a, b) = (t.0[i], t.0[j]);
        let (da, db) = (dist[i], dist[j]);
        if da >= 0.0 {
            poly.push(a);
        }
        // A vertex on the plane was already kept; only a strict sign change
        // adds an intersection point.
        if (da > 0.0 && db < 0.0) || (da < 0.0 && db > 0.0) {
            let s = da / (da - db);
            poly.push(a + (b - a) * s);
        }
    }

    for k in 1..poly.len().saturating_sub(1) {
        out.push(Triangle::new(poly[0], poly[k], poly[k + 1]));
    }
}

/// Derive the displayed mesh from `original`.
///
/// With both filters disabled the original `Arc` itself is returned, so the
/// displayed geometry is bit-for-bit the loaded geometry.
#[must_use]
pub fn apply_filters(
    original: &Arc<Mesh>,
    shrink_filter: &ShrinkFilter,
    clip_filter: &ClipFilter,
) -> Arc<Mesh> {
    if !shrink_filter.enabled && !clip_filter.enabled {
        return Arc::clone(original);
    }

    let shrunk = shrink_filter
        .enabled
        .then(|| shrink(original, shrink_filter.factor));
    if clip_filter.enabled {
        let base: &Mesh = shrunk.as_ref().unwrap_or(original.as_ref());
        return Arc::new(clip(base, clip_filter.origin, clip_filter.normal));
    }
    shrunk.map_or_else(|| Arc::clone(original), Arc::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0))
    }

    #[test]
    fn shrink_moves_vertices_toward_centroid() {
        let mesh = Mesh::new(vec![unit_triangle()]);
        let shrunk = shrink(&mesh, 0.5);
        let t = shrunk.triangles()[0];
        assert_eq!(t.centroid(), unit_triangle().centroid());
        assert_eq!(t.0[0], Vec3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn clip_keeps_side_the_normal_points_to() {
        let mesh = Mesh::new(vec![unit_triangle()]);
        let kept = clip(&mesh, Vec3::ZERO, Vec3::X);
        assert_eq!(kept, mesh);
        let dropped = clip(&mesh, Vec3::new(10.0, 0.0, 0.0), Vec3::X);
        assert!(dropped.is_empty());
    }

    #[test]
    fn clip_cuts_crossing_triangles() {
        let mesh = Mesh::new(vec![unit_triangle()]);
        // Keep x >= 1: one vertex inside, the cut leaves a single triangle.
        let one_in = clip(&mesh, Vec3::X, Vec3::X);
        assert_eq!(one_in.triangle_count(), 1);
        // Keep y <= 1: two vertices inside, the quad left over is split in
        // two.
        let quad = clip(&mesh, Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        assert_eq!(quad.triangle_count(), 2);
        for t in quad.triangles() {
            assert!(t.0.iter().all(|v| v.y <= 1.0 + 1e-6));
        }
    }

    #[test]
    fn vertex_on_the_plane_adds_no_sliver() {
        let touching = Mesh::new(vec![Triangle::new(
            Vec3::ZERO,
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
        )]);
        assert!(clip(&touching, Vec3::ZERO, Vec3::X).triangles().is_empty());

        let split = Mesh::new(vec![Triangle::new(
            Vec3::ZERO,
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        )]);
        let kept = clip(&split, Vec3::ZERO, Vec3::X);
        assert_eq!(kept.triangle_count(), 1);
        assert!(kept.triangles()[0].0.iter().all(|v| v.x >= 0.0));
    }

    #[test]
    fn disabled_filters_return_the_original_arc() {
        let original = Arc::new(Mesh::new(vec![unit_triangle()]));
        let shown = apply_filters(
            &original,
            &ShrinkFilter::default(),
            &ClipFilter::default(),
        );
        assert!(Arc::ptr_eq(&shown, &original));
    }

    #[test]
    fn shrink_runs_before_clip() {
        let original = Arc::new(Mesh::new(vec![unit_triangle()]));
        let shrink_filter = ShrinkFilter {
            enabled: true,
            factor: 0.5,
        };
        let clip_filter = ClipFilter {
            enabled: true,
            origin: Vec3::new(0.25, 0.0, 0.0),
            normal: Vec3::X,
        };
        let shown = apply_filters(&original, &shrink_filter, &clip_filter);
        let expected = clip(
            &shrink(&original, 0.5),
            clip_filter.origin,
            clip_filter.normal,
        );
        assert_eq!(*shown, expected);

        // The other order produces different geometry for this plane.
        let reversed = shrink(
            &clip(&original, clip_filter.origin, clip_filter.normal),
            0.5,
        );
        assert_ne!(*shown, reversed);
        assert_eq!(original.triangles()[0], unit_triangle());
    }
}
