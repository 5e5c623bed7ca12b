use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Placement of a drawable: position, orientation and scale.
///
/// Orientation is kept as accumulated Euler angles in degrees, applied in
/// Z, X, Y order. Incremental turntable rotation just adds to the per-axis
/// angle, so N ticks of `d` degrees land on exactly `N * d`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// World-space translation.
    pub position: Vec3,
    /// Per-axis rotation in degrees.
    pub orientation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, rotation or scaling.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Rotate by `delta` degrees per axis.
    pub fn rotate(&mut self, delta: Vec3) {
        self.orientation += delta;
    }

    /// Rotation as a quaternion.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        let r = self.orientation * (std::f32::consts::PI / 180.0);
        Quat::from_euler(EulerRot::ZXY, r.z, r.x, r.y)
    }

    /// Model matrix (scale, then rotate, then translate).
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation(),
            self.position,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_rotation_accumulates_exactly() {
        let mut t = Transform::IDENTITY;
        for _ in 0..12 {
            t.rotate(Vec3::new(0.0, 0.0, 5.0));
        }
        assert_eq!(t.orientation.z, 60.0);
        assert_eq!(t.orientation.x, 0.0);
    }

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let mut t = Transform::IDENTITY;
        t.rotate(Vec3::new(0.0, 0.0, 90.0));
        let p = t.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn identity_matrix() {
        assert_eq!(Transform::IDENTITY.matrix(), Mat4::IDENTITY);
    }
}
