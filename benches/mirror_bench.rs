//! Criterion benchmarks for scene mirroring, snapshots, and mesh filters.
#![allow(missing_docs, unused_results)]

use std::path::Path;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use vrcad::error::VrcadError;
use vrcad::geometry::{apply_filters, ClipFilter, Mesh, MeshLoader, ShrinkFilter, Triangle};
use vrcad::mirror::build_snapshots;
use vrcad::scene::{Drawable, SceneGraph};
use vrcad::tree::PartTree;

fn grid_mesh(cells: u32) -> Mesh {
    let mut triangles = Vec::new();
    for i in 0..cells {
        for j in 0..cells {
            let (x, y) = (i as f32, j as f32);
            triangles.push(Triangle::new(
                Vec3::new(x, y, 0.0),
                Vec3::new(x + 1.0, y, 0.0),
                Vec3::new(x, y + 1.0, 0.0),
            ));
        }
    }
    Mesh::new(triangles)
}

struct GridLoader(Mesh);

impl MeshLoader for GridLoader {
    fn load(&self, _path: &Path) -> Result<Mesh, VrcadError> {
        Ok(self.0.clone())
    }
}

fn rotate_visible_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotate_visible");
    let mesh = Arc::new(grid_mesh(4));
    for count in [10, 100, 1000] {
        let mut scene = SceneGraph::new();
        for _ in 0..count {
            let _ = scene.add(Drawable::new(Arc::clone(&mesh)));
        }
        group.bench_function(format!("{count}_drawables"), |b| {
            b.iter(|| black_box(scene.rotate_visible(black_box(Vec3::new(0.0, 0.0, 5.0)))));
        });
    }
    group.finish();
}

fn snapshot_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_snapshots");
    let loader = GridLoader(grid_mesh(8));
    for count in [10, 100, 500] {
        let mut tree = PartTree::new();
        let root = tree.add_root("Module");
        for i in 0..count {
            let id = tree.add_part(Some(root), format!("part{i}")).unwrap();
            tree.load_geometry(id, Path::new("grid.stl"), &loader).unwrap();
            if i % 3 == 0 {
                tree.set_visible(id, false).unwrap();
            }
        }
        group.bench_function(format!("{count}_parts"), |b| {
            b.iter(|| black_box(build_snapshots(black_box(&tree))));
        });
    }
    group.finish();
}

fn filter_benchmark(c: &mut Criterion) {
    let mesh = Arc::new(grid_mesh(64));
    let shrink = ShrinkFilter {
        enabled: true,
        ..ShrinkFilter::default()
    };
    let clip = ClipFilter {
        enabled: true,
        origin: Vec3::new(32.0, 0.0, 0.0),
        normal: Vec3::NEG_X,
    };
    c.bench_function("shrink_and_clip_8k_triangles", |b| {
        b.iter(|| black_box(apply_filters(black_box(&mesh), &shrink, &clip)));
    });
}

criterion_group!(
    benches,
    rotate_visible_benchmark,
    snapshot_benchmark,
    filter_benchmark
);
criterion_main!(benches);
