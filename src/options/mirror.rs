use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::{Rgb, Transform};

/// VR mirror session parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MirrorOptions {
    /// Period of the worker's state tick, in milliseconds.
    pub tick_interval_ms: u64,
    /// Background of the headset scene until a color command arrives.
    pub initial_background: Rgb,
    /// Offset added to every snapshot so the model sits in front of the
    /// wearer: tipped upright and pushed down and away.
    pub placement: Transform,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            tick_interval_ms: 20,
            initial_background: Rgb::new(26, 51, 102),
            placement: Transform {
                position: Vec3::new(0.0, -100.0, -120.0),
                orientation: Vec3::new(-90.0, 0.0, 0.0),
                scale: Vec3::ONE,
            },
        }
    }
}

impl MirrorOptions {
    /// Tick period.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
