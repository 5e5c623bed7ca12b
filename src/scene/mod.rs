//! Scene graph: drawable proxies, background and light.
//!
//! A [`SceneGraph`] is plain owned data. The screen scene lives inside the
//! part tree on the GUI thread; each VR mirror session builds its own scene
//! on its worker thread. The two never share a [`Drawable`], only the
//! read-only [`Mesh`](crate::geometry::Mesh) behind it.

mod background;
mod color;
mod transform;

use std::fmt;
use std::sync::Arc;

pub use background::{Background, SkyboxFaces, SKYBOX_FACE_FILES};
pub use color::{ParseRgbError, Rgb};
use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;
pub use transform::Transform;

use crate::geometry::Mesh;

/// Default scene light intensity.
pub const DEFAULT_LIGHT_INTENSITY: f32 = 0.5;

// ---------------------------------------------------------------------------
// Drawable
// ---------------------------------------------------------------------------

/// Handle to a drawable inside one [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableId(u32);

impl fmt::Display for DrawableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A renderable proxy: shared geometry plus owned presentation state.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    /// Geometry to draw. Shared, never mutated.
    pub mesh: Arc<Mesh>,
    /// Placement.
    pub transform: Transform,
    /// Surface color.
    pub color: Rgb,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f32,
    /// Whether the drawable is drawn at all.
    pub visible: bool,
}

impl Drawable {
    /// A visible, opaque, white drawable at the origin.
    #[must_use]
    pub fn new(mesh: Arc<Mesh>) -> Self {
        Self {
            mesh,
            transform: Transform::IDENTITY,
            color: Rgb::WHITE,
            opacity: 1.0,
            visible: true,
        }
    }
}

// ---------------------------------------------------------------------------
// SceneGraph
// ---------------------------------------------------------------------------

/// Drawables in insertion order, plus background and light.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    drawables: FxHashMap<DrawableId, Drawable>,
    /// Draw order (insertion order).
    order: Vec<DrawableId>,
    next_id: u32,
    background: Background,
    light_intensity: f32,
    /// Parent transform of every drawable. Turntable rotation never
    /// touches it, so drawables spin about their own axes.
    placement: Transform,
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
    /// Generation that was last consumed by a render target.
    rendered_generation: u64,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Empty scene on a black background.
    #[must_use]
    pub fn new() -> Self {
        Self {
            drawables: FxHashMap::default(),
            order: Vec::new(),
            next_id: 0,
            background: Background::default(),
            light_intensity: DEFAULT_LIGHT_INTENSITY,
            placement: Transform::IDENTITY,
            generation: 0,
            rendered_generation: 0,
        }
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Whether anything changed since the last [`mark_rendered`](Self::mark_rendered).
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Mark the current generation as rendered.
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    // -- Drawables --

    /// Attach a drawable and return its handle.
    pub fn add(&mut self, drawable: Drawable) -> DrawableId {
        let id = DrawableId(self.next_id);
        self.next_id += 1;
        drop(self.drawables.insert(id, drawable));
        self.order.push(id);
        self.invalidate();
        id
    }

    /// Detach a drawable, handing it back to the caller.
    pub fn remove(&mut self, id: DrawableId) -> Option<Drawable> {
        let drawable = self.drawables.remove(&id)?;
        self.order.retain(|&o| o != id);
        self.invalidate();
        Some(drawable)
    }

    /// Read access to a drawable.
    #[must_use]
    pub fn get(&self, id: DrawableId) -> Option<&Drawable> {
        self.drawables.get(&id)
    }

    /// Write access (marks the scene dirty).
    pub fn get_mut(&mut self, id: DrawableId) -> Option<&mut Drawable> {
        self.invalidate();
        self.drawables.get_mut(&id)
    }

    /// Whether `id` is attached to this scene.
    #[must_use]
    pub fn contains(&self, id: DrawableId) -> bool {
        self.drawables.contains_key(&id)
    }

    /// Number of attached drawables (visible or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no drawables are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drawables in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (DrawableId, &Drawable)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.drawables.get(&id).map(|d| (id, d)))
    }

    /// Visible drawables in draw order.
    pub fn visible(&self) -> impl Iterator<Item = (DrawableId, &Drawable)> + '_ {
        self.iter().filter(|(_, d)| d.visible)
    }

    /// Detach everything.
    pub fn clear(&mut self) {
        self.drawables.clear();
        self.order.clear();
        self.invalidate();
    }

    /// Rotate every visible drawable by `delta` degrees per axis and return
    /// how many were turned.
    ///
    /// This is the single turntable operation: the GUI rotation timer runs
    /// it on the screen scene and the mirror worker runs it on the VR scene
    /// at each tick.
    pub fn rotate_visible(&mut self, delta: Vec3) -> usize {
        if delta == Vec3::ZERO {
            return 0;
        }
        let mut turned = 0;
        for drawable in self.drawables.values_mut().filter(|d| d.visible) {
            drawable.transform.rotate(delta);
            turned += 1;
        }
        if turned > 0 {
            self.invalidate();
        }
        turned
    }

    // -- Placement --

    /// Transform applied on top of every drawable's own.
    #[must_use]
    pub fn placement(&self) -> &Transform {
        &self.placement
    }

    /// Replace the scene-wide parent transform.
    pub fn set_placement(&mut self, placement: Transform) {
        if self.placement != placement {
            self.placement = placement;
            self.invalidate();
        }
    }

    /// World matrix of `drawable`: placement, then the drawable's own
    /// transform.
    #[must_use]
    pub fn world_matrix(&self, drawable: &Drawable) -> Mat4 {
        self.placement.matrix() * drawable.transform.matrix()
    }

    // -- Environment --

    /// Current background.
    #[must_use]
    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Replace the background.
    pub fn set_background(&mut self, background: Background) {
        if self.background != background {
            self.background = background;
            self.invalidate();
        }
    }

    /// Scene light intensity.
    #[must_use]
    pub fn light_intensity(&self) -> f32 {
        self.light_intensity
    }

    /// Set the scene light intensity (clamped at zero).
    pub fn set_light_intensity(&mut self, intensity: f32) {
        let intensity = intensity.max(0.0);
        if self.light_intensity != intensity {
            self.light_intensity = intensity;
            self.invalidate();
        }
    }
}
