use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::geometry::{ClipFilter, Mesh, ShrinkFilter};
use crate::scene::{DrawableId, Rgb};

// ---------------------------------------------------------------------------
// PartId
// ---------------------------------------------------------------------------

/// Stable identity of a part. Never reused within one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(pub(super) u32);

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PartGeometry
// ---------------------------------------------------------------------------

/// Loaded mesh of a part: the untouched original and the filtered output
/// currently on screen.
#[derive(Debug, Clone)]
pub struct PartGeometry {
    pub(super) path: PathBuf,
    pub(super) original: Arc<Mesh>,
    pub(super) displayed: Arc<Mesh>,
}

impl PartGeometry {
    /// File the mesh was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Geometry exactly as loaded.
    #[must_use]
    pub fn original(&self) -> &Arc<Mesh> {
        &self.original
    }

    /// Geometry after shrink/clip filtering.
    #[must_use]
    pub fn displayed(&self) -> &Arc<Mesh> {
        &self.displayed
    }
}

// ---------------------------------------------------------------------------
// Part
// ---------------------------------------------------------------------------

/// A node of the model hierarchy.
///
/// Parts are read through [`PartTree`](super::PartTree) accessors and only
/// mutated through tree operations, which keep the part's proxy in the
/// screen scene in step with it.
#[derive(Debug, Clone)]
pub struct Part {
    pub(super) id: PartId,
    pub(super) name: String,
    pub(super) color: Rgb,
    pub(super) visible: bool,
    pub(super) geometry: Option<PartGeometry>,
    pub(super) proxy: Option<DrawableId>,
    pub(super) clip: ClipFilter,
    pub(super) shrink: ShrinkFilter,
    pub(super) children: Vec<PartId>,
    pub(super) parent: Option<PartId>,
}

impl Part {
    pub(super) fn new(id: PartId, name: String, parent: Option<PartId>) -> Self {
        Self {
            id,
            name,
            color: Rgb::WHITE,
            visible: true,
            geometry: None,
            proxy: None,
            clip: ClipFilter::default(),
            shrink: ShrinkFilter::default(),
            children: Vec::new(),
            parent,
        }
    }

    /// Identity within the owning tree.
    #[must_use]
    pub fn id(&self) -> PartId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Surface color.
    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Visibility flag. Hiding a part does not hide its children.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Loaded geometry, if any.
    #[must_use]
    pub fn geometry(&self) -> Option<&PartGeometry> {
        self.geometry.as_ref()
    }

    /// Whether a mesh has been loaded.
    #[must_use]
    pub fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }

    /// Handle of this part's proxy in the screen scene.
    #[must_use]
    pub fn proxy(&self) -> Option<DrawableId> {
        self.proxy
    }

    /// Clip filter state.
    #[must_use]
    pub fn clip_filter(&self) -> &ClipFilter {
        &self.clip
    }

    /// Shrink filter state.
    #[must_use]
    pub fn shrink_filter(&self) -> &ShrinkFilter {
        &self.shrink
    }

    /// Child ids in insertion order.
    #[must_use]
    pub fn children(&self) -> &[PartId] {
        &self.children
    }

    /// Parent id, `None` for a top-level part.
    #[must_use]
    pub fn parent(&self) -> Option<PartId> {
        self.parent
    }
}
