use serde::{Deserialize, Serialize};

use crate::scene::Rgb;

/// Screen background defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayOptions {
    /// Solid screen background at startup.
    pub background: Rgb,
    /// Solid color shown when an image background has no readable file.
    pub image_fallback: Rgb,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            background: Rgb::BLACK,
            image_fallback: Rgb::GRAY,
        }
    }
}
