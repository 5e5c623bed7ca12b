//! Body of the mirror worker thread.

use std::sync::Arc;

use triple_buffer::Input;

use super::channel::{SessionShared, SessionState};
use super::headset::HeadsetProvider;
use super::snapshot::RenderableSnapshot;
use super::{ExitReason, MirrorStats, SessionReport};
use crate::error::VrcadError;
use crate::options::MirrorOptions;
use crate::scene::{Background, SceneGraph, Transform};
use crate::util::frame_timing::FrameTiming;

/// Everything the worker owns. Moved into the thread in one piece.
pub(super) struct Worker {
    pub(super) shared: Arc<SessionShared>,
    pub(super) snapshots: Vec<RenderableSnapshot>,
    pub(super) provider: Arc<dyn HeadsetProvider>,
    pub(super) options: MirrorOptions,
    pub(super) stats: Input<MirrorStats>,
}

/// Build the headset scene from snapshots. `placement` becomes the parent
/// transform that puts the model in front of the wearer; each drawable
/// keeps its own transform beneath it.
pub(super) fn build_scene(
    snapshots: Vec<RenderableSnapshot>,
    placement: Transform,
    background: Background,
) -> SceneGraph {
    let mut scene = SceneGraph::new();
    scene.set_background(background);
    scene.set_placement(placement);
    for snapshot in snapshots {
        let _ = scene.add(snapshot.drawable);
    }
    scene
}

impl Worker {
    /// Setup, loop, teardown. All headset objects live and die here.
    pub(super) fn run(mut self) -> Result<SessionReport, VrcadError> {
        let mut scene = build_scene(
            std::mem::take(&mut self.snapshots),
            self.options.placement,
            Background::Color(self.options.initial_background),
        );

        let mut headset = match self.provider.connect() {
            Ok(headset) => headset,
            Err(e) => {
                log::warn!("vr mirror: headset unavailable: {e}");
                self.shared.set_state(SessionState::Idle);
                return Err(e);
            }
        };

        if !self
            .shared
            .transition(SessionState::Starting, SessionState::Running)
        {
            log::debug!("vr mirror: stop requested during startup");
        }
        log::info!(
            "vr mirror running: {} drawables, tick {:?}",
            scene.len(),
            self.options.tick_interval()
        );

        let mut timing = FrameTiming::new(self.options.tick_interval());
        let mut stats = MirrorStats {
            drawables: scene.len(),
            ..MirrorStats::default()
        };
        self.stats.write(stats);

        let mut outcome = Ok(());
        let reason = loop {
            headset.pump_one_event(&mut scene);
            if let Err(e) = headset.render(&scene) {
                log::error!("vr mirror: frame failed: {e}");
                outcome = Err(e);
                break ExitReason::RenderFailed;
            }
            scene.mark_rendered();
            stats.frames += 1;
            timing.end_frame();

            if timing.tick_due() {
                self.apply_tick(&mut scene);
                timing.mark_tick();
                stats.ticks += 1;
                stats.fps = timing.fps();
                self.stats.write(stats);
            }

            if self.shared.terminate_requested() {
                break ExitReason::Terminated;
            }
            if headset.is_done() {
                break ExitReason::HeadsetClosed;
            }
        };

        headset.terminate();
        drop(headset);
        self.stats.write(stats);
        log::info!(
            "vr mirror stopped ({reason}): {} frames, {} ticks",
            stats.frames,
            stats.ticks
        );

        // A stop() in flight moves Stopping -> Idle once it has joined.
        let _ = self.shared.transition(SessionState::Running, SessionState::Idle);

        outcome.map(|()| SessionReport {
            reason,
            frames: stats.frames,
            ticks: stats.ticks,
            placement: *scene.placement(),
            transforms: scene.iter().map(|(_, d)| d.transform).collect(),
        })
    }

    /// Apply the current command values to the headset scene.
    fn apply_tick(&self, scene: &mut SceneGraph) {
        let commands = self.shared.take_tick_commands();
        let _ = scene.rotate_visible(commands.rotation);
        if let Some(color) = commands.background {
            log::debug!("vr mirror: background {color}");
            scene.set_background(Background::Color(color));
        }
        if let Some(intensity) = commands.light_intensity {
            log::debug!("vr mirror: light {intensity}");
            scene.set_light_intensity(intensity);
        }
    }
}
