use super::{Part, PartId, PartTree};

/// Lazy depth-first, pre-order walk over a [`PartTree`].
///
/// Siblings come out in insertion order. Each call to
/// [`PartTree::traverse`] starts a fresh walk over the live tree.
#[derive(Debug, Clone)]
pub struct Traversal<'a> {
    tree: &'a PartTree,
    stack: Vec<PartId>,
}

impl<'a> Traversal<'a> {
    pub(super) fn new(tree: &'a PartTree, roots: &[PartId]) -> Self {
        Self {
            tree,
            stack: roots.iter().rev().copied().collect(),
        }
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = &'a Part;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        loop {
            let id = self.stack.pop()?;
            if let Some(part) = tree.part(id) {
                self.stack.extend(part.children.iter().rev().copied());
                return Some(part);
            }
        }
    }
}
