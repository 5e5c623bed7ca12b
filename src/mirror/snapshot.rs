use crate::scene::Drawable;
use crate::tree::{PartId, PartTree};

/// Independent copy of one visible part, ready to move to a worker thread.
///
/// The mesh is shared read-only with the screen proxy; transform, color,
/// opacity and visibility are copied, so nothing a snapshot owns is ever
/// touched by the GUI thread again.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableSnapshot {
    /// Part the snapshot was taken from.
    pub source: PartId,
    /// Part name at snapshot time.
    pub name: String,
    /// Copy of the part's screen proxy.
    pub drawable: Drawable,
}

/// Snapshot every visible, geometry-bearing part in traversal order.
///
/// A hidden group hides nothing beneath it: descent continues through
/// every part and each one is judged on its own flag.
#[must_use]
pub fn build_snapshots(tree: &PartTree) -> Vec<RenderableSnapshot> {
    tree.traverse()
        .filter(|part| part.is_visible() && part.has_geometry())
        .filter_map(|part| {
            let drawable = tree.proxy(part.id())?.clone();
            Some(RenderableSnapshot {
                source: part.id(),
                name: part.name().to_owned(),
                drawable,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use glam::Vec3;

    use super::*;
    use crate::error::VrcadError;
    use crate::geometry::{Mesh, MeshLoader, Triangle};
    use crate::scene::Rgb;

    struct UnitLoader;

    impl MeshLoader for UnitLoader {
        fn load(&self, _path: &Path) -> Result<Mesh, VrcadError> {
            Ok(Mesh::new(vec![Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y)]))
        }
    }

    #[test]
    fn only_visible_parts_with_geometry_are_captured() {
        let mut tree = PartTree::new();
        let group = tree.add_part(None, "group").unwrap();
        let shown = tree.add_part(Some(group), "shown").unwrap();
        let hidden = tree.add_part(Some(group), "hidden").unwrap();
        let _empty = tree.add_part(Some(group), "empty").unwrap();
        for id in [shown, hidden] {
            tree.load_geometry(id, Path::new("p.stl"), &UnitLoader).unwrap();
        }
        tree.set_visible(hidden, false).unwrap();

        let snaps = build_snapshots(&tree);
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].source, shown);
        assert_eq!(snaps[0].name, "shown");
    }

    #[test]
    fn hidden_group_does_not_hide_children() {
        let mut tree = PartTree::new();
        let group = tree.add_part(None, "group").unwrap();
        let child = tree.add_part(Some(group), "child").unwrap();
        tree.load_geometry(child, Path::new("c.stl"), &UnitLoader).unwrap();
        tree.set_visible(group, false).unwrap();
        let snaps = build_snapshots(&tree);
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].source, child);
    }

    #[test]
    fn snapshot_is_independent_of_later_edits() {
        let mut tree = PartTree::new();
        let id = tree.add_part(None, "body").unwrap();
        tree.load_geometry(id, Path::new("b.stl"), &UnitLoader).unwrap();
        tree.set_color(id, Rgb::new(200, 10, 10)).unwrap();

        let snaps = build_snapshots(&tree);
        tree.set_color(id, Rgb::new(0, 0, 255)).unwrap();
        let _ = tree.rotate_visible(Vec3::new(0.0, 0.0, 45.0));

        let copy = &snaps[0].drawable;
        assert_eq!(copy.color, Rgb::new(200, 10, 10));
        assert_eq!(copy.transform.orientation, Vec3::ZERO);
        assert!(Arc::ptr_eq(&copy.mesh, &tree.proxy(id).unwrap().mesh));
    }

    #[test]
    fn empty_tree_yields_no_snapshots() {
        assert!(build_snapshots(&PartTree::new()).is_empty());
    }
}
