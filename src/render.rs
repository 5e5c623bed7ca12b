//! Screen render targets.
//!
//! The crate never talks to a GPU API directly. A [`RenderTarget`] is the
//! capability to turn a [`SceneGraph`] into a frame; windowing front ends
//! implement it on top of their toolkit.

use crate::error::VrcadError;
use crate::scene::SceneGraph;

/// Something that can draw a scene.
pub trait RenderTarget {
    /// Draw one frame of `scene`.
    ///
    /// # Errors
    ///
    /// Returns [`VrcadError::Render`] when the frame could not be produced.
    fn render(&mut self, scene: &SceneGraph) -> Result<(), VrcadError>;
}

/// Render target that draws nothing and counts frames.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    frames: u64,
    last_visible: usize,
}

impl HeadlessRenderer {
    /// A fresh target with no frames drawn.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames drawn so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Visible drawables in the most recent frame.
    #[must_use]
    pub fn last_visible(&self) -> usize {
        self.last_visible
    }
}

impl RenderTarget for HeadlessRenderer {
    fn render(&mut self, scene: &SceneGraph) -> Result<(), VrcadError> {
        self.frames += 1;
        self.last_visible = scene.visible().count();
        log::trace!(
            "headless frame {}: {} visible drawables",
            self.frames,
            self.last_visible
        );
        Ok(())
    }
}
