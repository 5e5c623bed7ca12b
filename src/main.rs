//! Headless mirror runner: `vrcad <file.stl>...`
//!
//! Loads the given files under the `Module` group, logs the tree, then runs
//! the screen turntable and a headless VR mirror side by side for a couple
//! of seconds. Set `VRCAD_OPTIONS` to a TOML file to override defaults and
//! `RUST_LOG` to control output.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use vrcad::error::VrcadError;
use vrcad::mirror::HeadlessHeadsetProvider;
use vrcad::options::Options;
use vrcad::studio::Studio;
use vrcad::tree::{PartId, PartTree};

const TURNTABLE_TICKS: u32 = 40;
const DEGREES_PER_TICK: f32 = 5.0;

fn load_options() -> Result<Options, VrcadError> {
    match std::env::var_os("VRCAD_OPTIONS") {
        Some(path) => Options::load(Path::new(&path)),
        None => Ok(Options::default()),
    }
}

fn depth(tree: &PartTree, mut id: PartId) -> usize {
    let mut depth = 0;
    while let Some(parent) = tree.parent(id) {
        depth += 1;
        id = parent;
    }
    depth
}

fn log_tree(tree: &PartTree) {
    for part in tree.traverse() {
        let indent = "  ".repeat(depth(tree, part.id()));
        let triangles = part
            .geometry()
            .map_or(0, |g| g.displayed().triangle_count());
        log::info!(
            "{indent}{} [{}] {} triangles{}",
            part.name(),
            part.color(),
            triangles,
            if part.is_visible() { "" } else { " (hidden)" }
        );
    }
}

fn run(paths: &[PathBuf]) -> Result<(), VrcadError> {
    let mut studio = Studio::new(load_options()?);
    let summary = studio.import_files(None, paths)?;
    for (path, _, e) in &summary.failed {
        log::error!("{}: {e}", path.display());
    }
    log_tree(studio.tree());

    studio.set_rotation_speed(DEGREES_PER_TICK);
    studio.start_vr(Arc::new(HeadlessHeadsetProvider::new()))?;

    let timer = studio.options().viewer.rotation_timer();
    for _ in 0..TURNTABLE_TICKS {
        let _ = studio.animation_tick()?;
        std::thread::sleep(timer);
    }
    if let Some(session) = studio.vr_session_mut() {
        let stats = session.stats();
        log::info!(
            "mirror: {} drawables, {} frames, {} ticks, {:.0} fps",
            stats.drawables,
            stats.frames,
            stats.ticks,
            stats.fps
        );
    }

    if let Some(report) = studio.stop_vr()? {
        log::info!(
            "mirror stopped ({}): {} frames, {} ticks",
            report.reason,
            report.frames,
            report.ticks
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let paths: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        log::error!("Usage: vrcad <file.stl>...");
        std::process::exit(1);
    }

    if let Err(e) = run(&paths) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
