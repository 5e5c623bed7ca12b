//! Headset abstraction.
//!
//! A [`HeadsetProvider`] is the only thing handed to the mirror worker. It
//! is `Send`; the [`Headset`] it produces is not required to be, because it
//! is created, pumped and torn down entirely on the worker thread.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use glam::Vec3;

use crate::error::VrcadError;
use crate::scene::{Background, SceneGraph};

/// Connects to a stereo display on the calling thread.
pub trait HeadsetProvider: fmt::Debug + Send + Sync {
    /// Open the display and hand back a live headset.
    ///
    /// # Errors
    ///
    /// [`VrcadError::DisplayUnavailable`] when no display is present.
    fn connect(&self) -> Result<Box<dyn Headset>, VrcadError>;
}

/// A live stereo display driven by the mirror worker.
pub trait Headset {
    /// Handle one pending platform event (pose update, controller input),
    /// blocking for at most one frame.
    fn pump_one_event(&mut self, scene: &mut SceneGraph);

    /// Present `scene` to both eyes.
    ///
    /// # Errors
    ///
    /// [`VrcadError::Render`] when the frame could not be presented.
    fn render(&mut self, scene: &SceneGraph) -> Result<(), VrcadError>;

    /// Whether the display asked to close (or was told to).
    fn is_done(&self) -> bool;

    /// Ask the display to close. The worker keeps pumping until
    /// [`is_done`](Self::is_done) or its own terminate flag ends the loop.
    fn terminate(&mut self);
}

// ---------------------------------------------------------------------------
// Frame recording
// ---------------------------------------------------------------------------

/// What one presented headset frame contained.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    /// Visible drawables drawn.
    pub drawables: usize,
    /// Orientation of each visible drawable, in draw order.
    pub orientations: Vec<Vec3>,
    /// Background at presentation time.
    pub background: Background,
    /// Light intensity at presentation time.
    pub light_intensity: f32,
}

impl FrameRecord {
    fn capture(scene: &SceneGraph) -> Self {
        let orientations: Vec<Vec3> = scene
            .visible()
            .map(|(_, d)| d.transform.orientation)
            .collect();
        Self {
            drawables: orientations.len(),
            orientations,
            background: scene.background().clone(),
            light_intensity: scene.light_intensity(),
        }
    }
}

/// Shared log of presented frames, readable from any thread.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    frames: Arc<Mutex<Vec<FrameRecord>>>,
}

impl FrameRecorder {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, record: FrameRecord) {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    /// Copy of every frame recorded so far.
    #[must_use]
    pub fn frames(&self) -> Vec<FrameRecord> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent frame.
    #[must_use]
    pub fn last(&self) -> Option<FrameRecord> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Number of frames recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no frame has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Headless implementation
// ---------------------------------------------------------------------------

/// Provider for a display-less headset that paces frames with a sleep.
///
/// Used by the command-line mirror, tests and benchmarks.
#[derive(Debug, Clone)]
pub struct HeadlessHeadsetProvider {
    frame_interval: Duration,
    frame_limit: Option<u64>,
    display_present: bool,
    recorder: Option<FrameRecorder>,
}

impl Default for HeadlessHeadsetProvider {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(2),
            frame_limit: None,
            display_present: true,
            recorder: None,
        }
    }
}

impl HeadlessHeadsetProvider {
    /// Unlimited headless display pacing at roughly 500 frames per second.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long per pumped event.
    #[must_use]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Report done after this many frames, as if the wearer closed it.
    #[must_use]
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Simulate a machine with no stereo display attached.
    #[must_use]
    pub fn without_display(mut self) -> Self {
        self.display_present = false;
        self
    }

    /// Record every presented frame into `recorder`.
    #[must_use]
    pub fn with_recorder(mut self, recorder: FrameRecorder) -> Self {
        self.recorder = Some(recorder);
        self
    }
}

impl HeadsetProvider for HeadlessHeadsetProvider {
    fn connect(&self) -> Result<Box<dyn Headset>, VrcadError> {
        if !self.display_present {
            return Err(VrcadError::DisplayUnavailable(
                "no headless display attached".to_owned(),
            ));
        }
        Ok(Box::new(HeadlessHeadset {
            frame_interval: self.frame_interval,
            frame_limit: self.frame_limit,
            recorder: self.recorder.clone(),
            frames: 0,
            terminated: false,
        }))
    }
}

/// Headset produced by [`HeadlessHeadsetProvider`].
#[derive(Debug)]
struct HeadlessHeadset {
    frame_interval: Duration,
    frame_limit: Option<u64>,
    recorder: Option<FrameRecorder>,
    frames: u64,
    terminated: bool,
}

impl Headset for HeadlessHeadset {
    fn pump_one_event(&mut self, _scene: &mut SceneGraph) {
        if !self.frame_interval.is_zero() {
            std::thread::sleep(self.frame_interval);
        }
    }

    fn render(&mut self, scene: &SceneGraph) -> Result<(), VrcadError> {
        self.frames += 1;
        if let Some(recorder) = &self.recorder {
            recorder.push(FrameRecord::capture(scene));
        }
        Ok(())
    }

    fn is_done(&self) -> bool {
        self.terminated || self.frame_limit.is_some_and(|limit| self.frames >= limit)
    }

    fn terminate(&mut self) {
        self.terminated = true;
    }
}
