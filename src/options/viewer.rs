use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::{Rgb, DEFAULT_LIGHT_INTENSITY};

/// Screen viewer behaviour: turntable timer, light and filter defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerOptions {
    /// Name of the group every import lands under.
    pub root_group_name: String,
    /// Color given to freshly imported parts.
    pub default_part_color: Rgb,
    /// Period of the screen turntable timer, in milliseconds.
    pub rotation_timer_ms: u64,
    /// Light intensity at startup.
    pub light_intensity: f32,
    /// Slider value that maps to an intensity of 1.0.
    pub light_slider_scale: f32,
    /// Scale factor applied by the shrink filter.
    pub shrink_factor: f32,
    /// Point on the clip plane used when clipping is switched on.
    pub clip_origin: Vec3,
    /// Normal of the clip plane; the kept half-space faces along it.
    pub clip_normal: Vec3,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            root_group_name: "Module".to_owned(),
            default_part_color: Rgb::WHITE,
            rotation_timer_ms: 50,
            light_intensity: DEFAULT_LIGHT_INTENSITY,
            light_slider_scale: 90.0,
            shrink_factor: 0.8,
            clip_origin: Vec3::ZERO,
            clip_normal: Vec3::NEG_Y,
        }
    }
}

impl ViewerOptions {
    /// Turntable timer period.
    #[must_use]
    pub fn rotation_timer(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.rotation_timer_ms)
    }

    /// Map a raw light slider position to an intensity.
    #[must_use]
    pub fn light_from_slider(&self, value: i32) -> f32 {
        if self.light_slider_scale <= 0.0 {
            return self.light_intensity;
        }
        (value as f32 / self.light_slider_scale).max(0.0)
    }
}
