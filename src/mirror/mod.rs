//! VR mirror sessions.
//!
//! A session copies the visible parts into [`RenderableSnapshot`]s and
//! hands them to a dedicated worker thread named `vr-mirror`. The worker
//! connects the headset, builds its own scene and runs a render loop with
//! a fixed tick for state changes. The owning thread steers it through
//! coalescing commands and reads progress through a lock-free stats buffer.
//!
//! ```text
//! Owner thread                       vr-mirror thread
//! ────────────                       ────────────────
//! build_snapshots(tree)
//! session.start(snaps, provider) ──► connect headset, build scene
//! session.set_rotation(Z, 5.0)  ───► (read at next tick)
//! session.stats()               ◄─── MirrorStats via triple buffer
//! session.stop()                ───► terminate flag; loop exits; joined
//! ```

mod channel;
mod headset;
mod snapshot;
mod worker;

use std::fmt;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

pub use channel::{Axis, SessionState};
use channel::SessionShared;
pub use headset::{
    FrameRecord, FrameRecorder, HeadlessHeadsetProvider, Headset,
    HeadsetProvider,
};
pub use snapshot::{build_snapshots, RenderableSnapshot};

use crate::error::VrcadError;
use crate::options::MirrorOptions;
use crate::scene::{Rgb, Transform};

/// Progress published by the worker after every tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MirrorStats {
    /// Drawables in the headset scene.
    pub drawables: usize,
    /// Frames presented.
    pub frames: u64,
    /// Ticks applied.
    pub ticks: u64,
    /// Smoothed frames per second.
    pub fps: f32,
}

/// Why a worker loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitReason {
    /// The session was never started.
    #[default]
    NotStarted,
    /// The terminate command or `stop` ended the loop.
    Terminated,
    /// The headset reported itself done.
    HeadsetClosed,
    /// A frame failed to render.
    RenderFailed,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotStarted => "not started",
            Self::Terminated => "terminated",
            Self::HeadsetClosed => "headset closed",
            Self::RenderFailed => "render failed",
        };
        f.write_str(text)
    }
}

/// Final account of a finished session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionReport {
    /// Why the loop ended.
    pub reason: ExitReason,
    /// Frames presented.
    pub frames: u64,
    /// Ticks applied.
    pub ticks: u64,
    /// Parent transform the headset scene was placed with.
    pub placement: Transform,
    /// Final transform of every headset drawable, in draw order, relative
    /// to [`placement`](Self::placement).
    pub transforms: Vec<Transform>,
}

/// Handle owning one mirror worker.
///
/// A session runs at most once: [`start`](Self::start) it, steer it, then
/// [`stop`](Self::stop) it (or drop it, which also stops and joins). Build
/// a new session to mirror again.
pub struct VrMirrorSession {
    shared: Arc<SessionShared>,
    options: MirrorOptions,
    stats: triple_buffer::Output<MirrorStats>,
    stats_input: Option<triple_buffer::Input<MirrorStats>>,
    thread: Option<JoinHandle<Result<SessionReport, VrcadError>>>,
}

impl fmt::Debug for VrMirrorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VrMirrorSession")
            .field("state", &self.state())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl VrMirrorSession {
    /// An idle session. Commands sent before [`start`](Self::start) are
    /// picked up at the first tick.
    #[must_use]
    pub fn new(options: MirrorOptions) -> Self {
        let (stats_input, stats) =
            triple_buffer::triple_buffer(&MirrorStats::default());
        Self {
            shared: Arc::new(SessionShared::default()),
            options,
            stats,
            stats_input: Some(stats_input),
            thread: None,
        }
    }

    /// Spawn the worker with `snapshots`. Returns as soon as the thread
    /// exists; headset setup happens on the worker. If the headset cannot
    /// be opened the session falls back to [`SessionState::Idle`] and
    /// [`stop`](Self::stop) returns the error.
    ///
    /// # Errors
    ///
    /// [`VrcadError::AlreadyRunning`] if this session was started before,
    /// [`VrcadError::ThreadSpawn`] if the OS refused the thread.
    pub fn start(
        &mut self,
        snapshots: Vec<RenderableSnapshot>,
        provider: Arc<dyn HeadsetProvider>,
    ) -> Result<(), VrcadError> {
        if self.thread.is_some() || self.state() != SessionState::Idle {
            log::warn!("vr mirror: start ignored, session already running");
            return Err(VrcadError::AlreadyRunning);
        }
        let Some(stats) = self.stats_input.take() else {
            log::warn!("vr mirror: start ignored, session already used");
            return Err(VrcadError::AlreadyRunning);
        };

        log::info!("vr mirror: starting with {} snapshots", snapshots.len());
        self.shared.set_state(SessionState::Starting);
        let worker = worker::Worker {
            shared: Arc::clone(&self.shared),
            snapshots,
            provider,
            options: self.options.clone(),
            stats,
        };
        let handle = std::thread::Builder::new()
            .name("vr-mirror".into())
            .spawn(move || worker.run())
            .map_err(|e| {
                self.shared.set_state(SessionState::Idle);
                VrcadError::ThreadSpawn(e)
            })?;
        self.thread = Some(handle);
        Ok(())
    }

    /// Terminate the worker, wait for it to exit and return its report.
    ///
    /// # Errors
    ///
    /// Whatever ended the worker abnormally:
    /// [`VrcadError::DisplayUnavailable`], [`VrcadError::Render`], or
    /// [`VrcadError::WorkerPanicked`].
    pub fn stop(mut self) -> Result<SessionReport, VrcadError> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<SessionReport, VrcadError> {
        let Some(handle) = self.thread.take() else {
            return Ok(SessionReport::default());
        };
        if self.state() != SessionState::Idle {
            self.shared.set_state(SessionState::Stopping);
        }
        self.shared.request_terminate();
        let result = handle
            .join()
            .map_err(|_| VrcadError::WorkerPanicked)
            .and_then(|outcome| outcome);
        self.shared.set_state(SessionState::Idle);
        log::info!("vr mirror: worker joined");
        result
    }

    // -- Commands --

    /// Turn every visible headset drawable about `axis` by
    /// `degrees_per_tick` at each tick. Zero stops rotation on that axis.
    pub fn set_rotation(&self, axis: Axis, degrees_per_tick: f32) {
        self.shared.set_rotation(axis, degrees_per_tick);
    }

    /// Replace the headset background color at the next tick.
    pub fn set_background_color(&self, color: Rgb) {
        self.shared.set_background(color);
    }

    /// Set the headset light intensity at the next tick.
    pub fn set_light_intensity(&self, intensity: f32) {
        self.shared.set_light_intensity(intensity);
    }

    /// Ask the worker to leave its loop without waiting for it.
    pub fn terminate(&self) {
        self.shared.request_terminate();
    }

    // -- Queries --

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.shared.state()
    }

    /// Whether a worker is alive and has not yet wound down to
    /// [`SessionState::Idle`].
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.thread.as_ref().is_some_and(|h| !h.is_finished())
            && self.state() != SessionState::Idle
    }

    /// Block until the session reaches `state` or `timeout` elapses.
    #[must_use]
    pub fn wait_for_state(&self, state: SessionState, timeout: Duration) -> bool {
        self.shared.wait_for_state(state, timeout)
    }

    /// Latest stats published by the worker.
    pub fn stats(&mut self) -> MirrorStats {
        *self.stats.read()
    }

    /// Options the session was created with.
    #[must_use]
    pub fn options(&self) -> &MirrorOptions {
        &self.options
    }
}

impl Drop for VrMirrorSession {
    fn drop(&mut self) {
        if self.thread.is_some() {
            if let Err(e) = self.shutdown() {
                log::debug!("vr mirror: worker ended with {e}");
            }
        }
    }
}
