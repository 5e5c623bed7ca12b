//! Mesh geometry: immutable triangle meshes, STL import, display filters.

pub mod filter;
mod mesh;
mod stl;

pub use filter::{apply_filters, ClipFilter, ShrinkFilter};
pub use mesh::{Bounds, Mesh, Triangle};
pub use stl::{MeshLoader, StlLoader};

#[cfg(test)]
pub(crate) use stl::tests::write_triangle_stl;
