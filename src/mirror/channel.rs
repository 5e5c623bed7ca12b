//! State shared between a session handle and its worker thread.
//!
//! Commands coalesce: each kind keeps only its latest value, and the worker
//! reads whatever is current at its next tick boundary. Nothing is queued,
//! so rapid slider input cannot build a backlog.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use glam::Vec3;

use crate::scene::Rgb;

/// Rotation axis for [`VrMirrorSession::set_rotation`](super::VrMirrorSession::set_rotation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl Axis {
    /// Unit vector along the axis.
    #[must_use]
    pub fn unit(self) -> Vec3 {
        match self {
            Self::X => Vec3::X,
            Self::Y => Vec3::Y,
            Self::Z => Vec3::Z,
        }
    }
}

/// Lifecycle of a mirror session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Not running: either never started or fully stopped.
    #[default]
    Idle,
    /// Worker spawned, building its scene and connecting the headset.
    Starting,
    /// Worker inside its render loop.
    Running,
    /// Stop requested, waiting for the worker to exit.
    Stopping,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
        };
        f.write_str(name)
    }
}

/// Latest commanded values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct PendingCommands {
    /// Degrees per tick, per axis. A standing value, never consumed.
    rotation: Vec3,
    /// Background color not yet applied.
    background: Option<Rgb>,
    /// Light intensity not yet applied.
    light_intensity: Option<f32>,
}

/// What the worker applies at one tick boundary.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct TickCommands {
    pub(crate) rotation: Vec3,
    pub(crate) background: Option<Rgb>,
    pub(crate) light_intensity: Option<f32>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Command channel plus lifecycle state, shared by `Arc`.
#[derive(Debug, Default)]
pub(crate) struct SessionShared {
    state: Mutex<SessionState>,
    state_changed: Condvar,
    commands: Mutex<PendingCommands>,
    terminate: AtomicBool,
}

impl SessionShared {
    // -- Commands (owner side) --

    pub(crate) fn set_rotation(&self, axis: Axis, degrees_per_tick: f32) {
        let mut commands = lock(&self.commands);
        let unit = axis.unit();
        commands.rotation = commands.rotation * (Vec3::ONE - unit)
            + unit * degrees_per_tick;
    }

    pub(crate) fn set_background(&self, color: Rgb) {
        lock(&self.commands).background = Some(color);
    }

    pub(crate) fn set_light_intensity(&self, intensity: f32) {
        lock(&self.commands).light_intensity = Some(intensity);
    }

    pub(crate) fn request_terminate(&self) {
        self.terminate.store(true, Ordering::Release);
    }

    // -- Commands (worker side) --

    pub(crate) fn terminate_requested(&self) -> bool {
        self.terminate.load(Ordering::Acquire)
    }

    /// Current rotation plus any pending one-shot values, which are taken.
    pub(crate) fn take_tick_commands(&self) -> TickCommands {
        let mut commands = lock(&self.commands);
        TickCommands {
            rotation: commands.rotation,
            background: commands.background.take(),
            light_intensity: commands.light_intensity.take(),
        }
    }

    #[cfg(test)]
    pub(crate) fn rotation(&self) -> Vec3 {
        lock(&self.commands).rotation
    }

    // -- Lifecycle --

    pub(crate) fn state(&self) -> SessionState {
        *lock(&self.state)
    }

    pub(crate) fn set_state(&self, state: SessionState) {
        let mut current = lock(&self.state);
        if *current != state {
            log::debug!("vr mirror: {} -> {state}", *current);
            *current = state;
            self.state_changed.notify_all();
        }
    }

    /// Move to `to` only if the state is still `from`. Returns whether the
    /// transition happened.
    pub(crate) fn transition(&self, from: SessionState, to: SessionState) -> bool {
        let mut current = lock(&self.state);
        if *current != from {
            return false;
        }
        log::debug!("vr mirror: {from} -> {to}");
        *current = to;
        self.state_changed.notify_all();
        true
    }

    /// Block until the state equals `target` or `timeout` elapses.
    pub(crate) fn wait_for_state(&self, target: SessionState, timeout: Duration) -> bool {
        let guard = lock(&self.state);
        let (guard, _) = self
            .state_changed
            .wait_timeout_while(guard, timeout, |s| *s != target)
            .unwrap_or_else(PoisonError::into_inner);
        *guard == target
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn rotation_is_a_standing_value_per_axis() {
        let shared = SessionShared::default();
        shared.set_rotation(Axis::Z, 5.0);
        shared.set_rotation(Axis::X, 1.0);
        shared.set_rotation(Axis::Z, 3.0);
        for _ in 0..3 {
            assert_eq!(shared.take_tick_commands().rotation, Vec3::new(1.0, 0.0, 3.0));
        }
        shared.set_rotation(Axis::Z, 0.0);
        assert_eq!(shared.rotation(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn one_shot_values_coalesce_and_are_taken_once() {
        let shared = SessionShared::default();
        shared.set_background(Rgb::new(1, 1, 1));
        shared.set_background(Rgb::new(2, 2, 2));
        shared.set_light_intensity(0.25);
        let first = shared.take_tick_commands();
        assert_eq!(first.background, Some(Rgb::new(2, 2, 2)));
        assert_eq!(first.light_intensity, Some(0.25));
        let second = shared.take_tick_commands();
        assert_eq!(second.background, None);
        assert_eq!(second.light_intensity, None);
    }

    #[test]
    fn transition_requires_the_expected_state() {
        let shared = SessionShared::default();
        assert!(!shared.transition(SessionState::Starting, SessionState::Running));
        shared.set_state(SessionState::Starting);
        assert!(shared.transition(SessionState::Starting, SessionState::Running));
        assert_eq!(shared.state(), SessionState::Running);
    }

    #[test]
    fn wait_for_state_wakes_on_change() {
        let shared = Arc::new(SessionShared::default());
        let remote = Arc::clone(&shared);
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(10));
            remote.set_state(SessionState::Running);
        });
        assert!(shared.wait_for_state(SessionState::Running, Duration::from_secs(5)));
        handle.join().unwrap();
        assert!(!shared.wait_for_state(SessionState::Stopping, Duration::from_millis(5)));
    }
}
