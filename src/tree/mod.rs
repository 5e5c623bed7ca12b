//! The part tree: hierarchy, appearance and filter state, and the live
//! screen scene that mirrors it.
//!
//! Parts are stored by [`PartId`] in a flat map; hierarchy is expressed by
//! id lists. Every part with geometry owns one proxy [`Drawable`] in the
//! tree's [`SceneGraph`], and every mutating call updates that proxy before
//! it returns.

mod part;
mod traversal;

use std::path::Path;
use std::sync::Arc;

use glam::Vec3;
pub use part::{Part, PartGeometry, PartId};
use rustc_hash::FxHashMap;
pub use traversal::Traversal;

use crate::error::VrcadError;
use crate::geometry::{apply_filters, MeshLoader};
use crate::scene::{Background, Drawable, Rgb, SceneGraph};

/// Ordered tree of parts owning the screen scene.
#[derive(Debug, Default)]
pub struct PartTree {
    parts: FxHashMap<PartId, Part>,
    /// Top-level parts in insertion order.
    roots: Vec<PartId>,
    next_id: u32,
    scene: SceneGraph,
}

impl PartTree {
    /// Empty tree with an empty screen scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Lookup --

    /// Read access to a part.
    #[must_use]
    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.get(&id)
    }

    fn part_mut(&mut self, id: PartId) -> Result<&mut Part, VrcadError> {
        self.parts.get_mut(&id).ok_or(VrcadError::UnknownPart(id))
    }

    /// Whether `id` belongs to this tree.
    #[must_use]
    pub fn contains(&self, id: PartId) -> bool {
        self.parts.contains_key(&id)
    }

    /// Number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the tree has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Top-level part ids in insertion order.
    #[must_use]
    pub fn roots(&self) -> &[PartId] {
        &self.roots
    }

    /// Child ids of `id` (empty for an unknown id).
    #[must_use]
    pub fn children(&self, id: PartId) -> &[PartId] {
        self.part(id).map(Part::children).unwrap_or_default()
    }

    /// Parent of `id`, `None` for top-level or unknown parts.
    #[must_use]
    pub fn parent(&self, id: PartId) -> Option<PartId> {
        self.part(id).and_then(Part::parent)
    }

    /// First part with the given name in traversal order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<PartId> {
        self.traverse().find(|p| p.name == name).map(Part::id)
    }

    /// Fresh depth-first pre-order walk over the live tree.
    #[must_use]
    pub fn traverse(&self) -> Traversal<'_> {
        Traversal::new(self, &self.roots)
    }

    /// The screen scene holding every part's proxy.
    #[must_use]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// The proxy drawable of `id`, if it has geometry.
    #[must_use]
    pub fn proxy(&self, id: PartId) -> Option<&Drawable> {
        self.part(id)
            .and_then(Part::proxy)
            .and_then(|d| self.scene.get(d))
    }

    // -- Structure --

    /// Append a new empty leaf under `parent` (top level for `None`).
    ///
    /// # Errors
    ///
    /// Returns [`VrcadError::InvalidParent`] if `parent` is not in the tree.
    pub fn add_part(
        &mut self,
        parent: Option<PartId>,
        name: impl Into<String>,
    ) -> Result<PartId, VrcadError> {
        let Some(pid) = parent else {
            return Ok(self.add_root(name));
        };
        let id = PartId(self.next_id);
        self.parts
            .get_mut(&pid)
            .ok_or(VrcadError::InvalidParent(pid))?
            .children
            .push(id);
        self.next_id += 1;

        let part = Part::new(id, name.into(), parent);
        log::debug!("added part {id} '{}' under {pid}", part.name);
        drop(self.parts.insert(id, part));
        Ok(id)
    }

    /// Append a new empty top-level part.
    pub fn add_root(&mut self, name: impl Into<String>) -> PartId {
        let id = PartId(self.next_id);
        self.next_id += 1;
        self.roots.push(id);

        let part = Part::new(id, name.into(), None);
        log::debug!("added top-level part {id} '{}'", part.name);
        drop(self.parts.insert(id, part));
        id
    }

    /// Destroy `id` and its whole subtree, children first. Each proxy is
    /// detached from the screen scene before its part is dropped.
    ///
    /// Returns the number of parts destroyed.
    ///
    /// # Errors
    ///
    /// Returns [`VrcadError::UnknownPart`] if `id` is not in the tree.
    pub fn remove(&mut self, id: PartId) -> Result<usize, VrcadError> {
        let parent = self.part_mut(id)?.parent;
        match parent.and_then(|pid| self.parts.get_mut(&pid)) {
            Some(p) => p.children.retain(|&c| c != id),
            None => self.roots.retain(|&r| r != id),
        }

        let mut doomed = Vec::new();
        self.collect_post_order(id, &mut doomed);
        for &pid in &doomed {
            let Some(part) = self.parts.remove(&pid) else {
                continue;
            };
            if let Some(proxy) = part.proxy {
                drop(self.scene.remove(proxy));
            }
            log::debug!("removed part {pid} '{}'", part.name);
        }
        Ok(doomed.len())
    }

    fn collect_post_order(&self, id: PartId, out: &mut Vec<PartId>) {
        if let Some(part) = self.parts.get(&id) {
            for &child in &part.children {
                self.collect_post_order(child, out);
            }
            out.push(id);
        }
    }

    /// Remove every part and proxy.
    pub fn clear(&mut self) {
        let roots = std::mem::take(&mut self.roots);
        for id in roots {
            let _ = self.remove(id);
        }
    }

    // -- Geometry --

    /// Load mesh geometry for `id` through `loader`.
    ///
    /// On success the part gets (or refreshes) its proxy using its current
    /// color, visibility and filters. On failure the part is left without
    /// geometry and any old proxy is detached.
    ///
    /// # Errors
    ///
    /// Returns [`VrcadError::UnknownPart`] for an unknown id, or the
    /// loader's [`VrcadError::GeometryLoad`].
    pub fn load_geometry(
        &mut self,
        id: PartId,
        path: &Path,
        loader: &dyn MeshLoader,
    ) -> Result<(), VrcadError> {
        if !self.contains(id) {
            return Err(VrcadError::UnknownPart(id));
        }

        let mesh = match loader.load(path) {
            Ok(mesh) => Arc::new(mesh),
            Err(e) => {
                log::warn!("part {id}: {e}");
                self.drop_geometry(id);
                return Err(e);
            }
        };

        let part = self.part_mut(id)?;
        let displayed = apply_filters(&mesh, &part.shrink, &part.clip);
        part.geometry = Some(PartGeometry {
            path: path.to_path_buf(),
            original: mesh,
            displayed: Arc::clone(&displayed),
        });
        let (color, visible, proxy) = (part.color, part.visible, part.proxy);

        match proxy.and_then(|d| self.scene.get_mut(d)) {
            Some(drawable) => drawable.mesh = displayed,
            None => {
                let drawable = Drawable {
                    color,
                    visible,
                    ..Drawable::new(displayed)
                };
                let proxy = self.scene.add(drawable);
                self.part_mut(id)?.proxy = Some(proxy);
            }
        }
        Ok(())
    }

    fn drop_geometry(&mut self, id: PartId) {
        let Some(part) = self.parts.get_mut(&id) else {
            return;
        };
        part.geometry = None;
        if let Some(proxy) = part.proxy.take() {
            drop(self.scene.remove(proxy));
        }
    }

    /// Recompute the displayed mesh from the original and push it into the
    /// proxy.
    fn refresh_displayed(&mut self, id: PartId) -> Result<(), VrcadError> {
        let part = self.part_mut(id)?;
        let (shrink, clip, proxy) = (part.shrink, part.clip, part.proxy);
        let Some(geometry) = part.geometry.as_mut() else {
            return Ok(());
        };
        geometry.displayed = apply_filters(&geometry.original, &shrink, &clip);
        let displayed = Arc::clone(&geometry.displayed);
        if let Some(drawable) = proxy.and_then(|d| self.scene.get_mut(d)) {
            drawable.mesh = displayed;
        }
        Ok(())
    }

    // -- Appearance --

    /// Set the part color; the proxy is recolored in the same call.
    ///
    /// # Errors
    ///
    /// Returns [`VrcadError::UnknownPart`] for an unknown id.
    pub fn set_color(&mut self, id: PartId, color: Rgb) -> Result<(), VrcadError> {
        let part = self.part_mut(id)?;
        part.color = color;
        let proxy = part.proxy;
        if let Some(drawable) = proxy.and_then(|d| self.scene.get_mut(d)) {
            drawable.color = color;
        }
        Ok(())
    }

    /// Show or hide the part; the proxy follows in the same call.
    ///
    /// # Errors
    ///
    /// Returns [`VrcadError::UnknownPart`] for an unknown id.
    pub fn set_visible(&mut self, id: PartId, visible: bool) -> Result<(), VrcadError> {
        let part = self.part_mut(id)?;
        part.visible = visible;
        let proxy = part.proxy;
        if let Some(drawable) = proxy.and_then(|d| self.scene.get_mut(d)) {
            drawable.visible = visible;
        }
        Ok(())
    }

    /// Rename the part.
    ///
    /// # Errors
    ///
    /// Returns [`VrcadError::UnknownPart`] for an unknown id.
    pub fn set_name(
        &mut self,
        id: PartId,
        name: impl Into<String>,
    ) -> Result<(), VrcadError> {
        self.part_mut(id)?.name = name.into();
        Ok(())
    }

    // -- Filters --

    /// Enable or disable the clip filter. The plane is only replaced when
    /// enabling, so toggling off and on keeps the last plane.
    ///
    /// # Errors
    ///
    /// Returns [`VrcadError::UnknownPart`] for an unknown id.
    pub fn set_clip_filter(
        &mut self,
        id: PartId,
        enabled: bool,
        origin: Vec3,
        normal: Vec3,
    ) -> Result<(), VrcadError> {
        let clip = &mut self.part_mut(id)?.clip;
        clip.enabled = enabled;
        if enabled {
            clip.origin = origin;
            clip.normal = normal;
        }
        self.refresh_displayed(id)
    }

    /// Enable or disable the shrink filter.
    ///
    /// # Errors
    ///
    /// Returns [`VrcadError::UnknownPart`] for an unknown id.
    pub fn set_shrink_filter(
        &mut self,
        id: PartId,
        enabled: bool,
        factor: f32,
    ) -> Result<(), VrcadError> {
        let shrink = &mut self.part_mut(id)?.shrink;
        shrink.enabled = enabled;
        shrink.factor = factor;
        self.refresh_displayed(id)
    }

    // -- Screen scene environment --

    /// Turn every visible proxy by `delta` degrees per axis.
    pub fn rotate_visible(&mut self, delta: Vec3) -> usize {
        self.scene.rotate_visible(delta)
    }

    /// Replace the screen background.
    pub fn set_background(&mut self, background: Background) {
        self.scene.set_background(background);
    }

    /// Set the screen light intensity.
    pub fn set_light_intensity(&mut self, intensity: f32) {
        self.scene.set_light_intensity(intensity);
    }

    /// Mark the screen scene as drawn.
    pub fn mark_rendered(&mut self) {
        self.scene.mark_rendered();
    }
}
