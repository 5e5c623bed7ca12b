//! The application controller.
//!
//! [`Studio`] owns the part tree (and with it the screen scene), the screen
//! render target, and at most one VR mirror session. Every user operation
//! arrives as a method call or a [`StudioCommand`]; edits that change what
//! the headset should show restart the mirror so it always reflects the
//! tree.
//!
//! The implementation is split across submodules by concern:
//!
//! - [`command`]: the command vocabulary and its dispatcher
//! - `parts`: imports and per-part edits
//! - `environment`: turntable, background and light
//! - `vr`: mirror session lifecycle
//! - `persistence`: settings export and apply

pub mod command;
mod environment;
mod parts;
mod persistence;
mod vr;

use std::fmt;
use std::sync::Arc;

pub use command::StudioCommand;
pub use parts::ImportSummary;

use crate::error::VrcadError;
use crate::geometry::{MeshLoader, StlLoader};
use crate::mirror::{HeadsetProvider, VrMirrorSession};
use crate::options::Options;
use crate::render::{HeadlessRenderer, RenderTarget};
use crate::scene::{Background, Rgb};
use crate::tree::{PartId, PartTree};

/// Part tree, screen view and VR mirror behind one interface.
pub struct Studio {
    options: Options,
    tree: PartTree,
    /// Top-level group every import lands under by default.
    root: PartId,
    loader: Box<dyn MeshLoader>,
    renderer: Box<dyn RenderTarget>,
    vr: Option<VrMirrorSession>,
    /// Provider of the last started session, reused on refresh.
    headset: Option<Arc<dyn HeadsetProvider>>,
    /// Degrees per turntable tick around Z.
    rotation_speed: f32,
    /// Last solid background color.
    background_color: Rgb,
    /// Last color sent to a mirror session; carried over on restart.
    vr_background: Option<Rgb>,
}

impl fmt::Debug for Studio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Studio")
            .field("parts", &self.tree.len())
            .field("root", &self.root)
            .field("vr", &self.vr)
            .field("rotation_speed", &self.rotation_speed)
            .finish_non_exhaustive()
    }
}

impl Studio {
    /// A studio with an empty `Module` group, loading STL files and
    /// drawing headlessly.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let mut tree = PartTree::new();
        let root = tree.add_root(options.viewer.root_group_name.clone());
        let background_color = options.display.background;
        tree.set_background(Background::Color(background_color));
        tree.set_light_intensity(options.viewer.light_intensity);
        Self {
            options,
            tree,
            root,
            loader: Box::new(StlLoader),
            renderer: Box::new(HeadlessRenderer::new()),
            vr: None,
            headset: None,
            rotation_speed: 0.0,
            background_color,
            vr_background: None,
        }
    }

    /// Use `loader` for every subsequent import.
    #[must_use]
    pub fn with_loader(mut self, loader: impl MeshLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Draw the screen scene through `renderer`.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl RenderTarget + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    // -- Accessors --

    /// The part tree.
    #[must_use]
    pub fn tree(&self) -> &PartTree {
        &self.tree
    }

    /// The top-level `Module` group.
    #[must_use]
    pub fn root(&self) -> PartId {
        self.root
    }

    /// Options the studio was created with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current turntable speed in degrees per tick.
    #[must_use]
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Last solid background color.
    #[must_use]
    pub fn background_color(&self) -> Rgb {
        self.background_color
    }

    /// The running (or finished but not yet reaped) mirror session.
    #[must_use]
    pub fn vr_session(&self) -> Option<&VrMirrorSession> {
        self.vr.as_ref()
    }

    /// Mutable access to the mirror session, e.g. to read its stats.
    pub fn vr_session_mut(&mut self) -> Option<&mut VrMirrorSession> {
        self.vr.as_mut()
    }

    /// Draw the screen scene if it changed since the last frame.
    ///
    /// # Errors
    ///
    /// Whatever the render target reports.
    pub fn render(&mut self) -> Result<bool, VrcadError> {
        if !self.tree.scene().is_dirty() {
            return Ok(false);
        }
        self.renderer.render(self.tree.scene())?;
        self.tree.mark_rendered();
        Ok(true)
    }
}
