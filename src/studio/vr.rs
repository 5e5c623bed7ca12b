use std::sync::Arc;

use super::Studio;
use crate::error::VrcadError;
use crate::mirror::{build_snapshots, Axis, HeadsetProvider, SessionReport, VrMirrorSession};

impl Studio {
    /// Mirror the visible parts into a headset on a worker thread.
    ///
    /// A previous session that already ended on its own (headset closed,
    /// display missing) is joined first. The new session inherits the
    /// current turntable speed and light intensity, plus the last color
    /// sent to a headset, if any.
    ///
    /// # Errors
    ///
    /// [`VrcadError::AlreadyRunning`] while a session is active,
    /// [`VrcadError::ThreadSpawn`] if the worker could not be created.
    pub fn start_vr(&mut self, provider: Arc<dyn HeadsetProvider>) -> Result<(), VrcadError> {
        self.reap_vr();
        if self.is_vr_active() {
            log::warn!("vr mirror already running");
            return Err(VrcadError::AlreadyRunning);
        }
        self.launch_vr(provider)
    }

    /// Stop and join the mirror session, if there is one.
    ///
    /// # Errors
    ///
    /// The error that ended the worker, if it ended abnormally.
    pub fn stop_vr(&mut self) -> Result<Option<SessionReport>, VrcadError> {
        match self.vr.take() {
            Some(session) => session.stop().map(Some),
            None => Ok(None),
        }
    }

    /// Whether a mirror worker is currently alive.
    #[must_use]
    pub fn is_vr_active(&self) -> bool {
        self.vr.as_ref().is_some_and(VrMirrorSession::is_active)
    }

    /// Restart a live session so the headset reflects the current tree.
    /// Does nothing when no session is running.
    pub(super) fn refresh_vr(&mut self) {
        if !self.is_vr_active() {
            return;
        }
        let Some(provider) = self.headset.clone() else {
            return;
        };
        log::debug!("refreshing vr mirror");
        if let Err(e) = self.stop_vr() {
            log::warn!("vr mirror ended with an error: {e}");
        }
        if let Err(e) = self.launch_vr(provider) {
            log::warn!("vr mirror restart failed: {e}");
        }
    }

    fn reap_vr(&mut self) {
        if self.vr.is_some() && !self.is_vr_active() {
            match self.stop_vr() {
                Ok(Some(report)) => log::debug!("reaped vr mirror ({})", report.reason),
                Ok(None) => {}
                Err(e) => log::info!("previous vr mirror ended with: {e}"),
            }
        }
    }

    fn launch_vr(&mut self, provider: Arc<dyn HeadsetProvider>) -> Result<(), VrcadError> {
        let snapshots = build_snapshots(&self.tree);
        let mut session = VrMirrorSession::new(self.options.mirror.clone());
        session.set_rotation(Axis::Z, self.rotation_speed);
        session.set_light_intensity(self.light_intensity());
        if let Some(color) = self.vr_background {
            session.set_background_color(color);
        }
        session.start(snapshots, Arc::clone(&provider))?;
        self.headset = Some(provider);
        self.vr = Some(session);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::geometry::write_triangle_stl;
    use crate::mirror::{FrameRecorder, HeadlessHeadsetProvider, SessionState};
    use crate::options::Options;
    use crate::scene::{Background, Rgb};

    #[test]
    fn start_twice_is_rejected_and_stop_joins() {
        let mut studio = Studio::new(Options::default());
        let provider: Arc<dyn HeadsetProvider> = Arc::new(HeadlessHeadsetProvider::new());
        studio.start_vr(Arc::clone(&provider)).unwrap();
        assert!(matches!(
            studio.start_vr(provider),
            Err(VrcadError::AlreadyRunning)
        ));
        let report = studio.stop_vr().unwrap();
        assert!(report.is_some());
        assert!(!studio.is_vr_active());
        assert!(studio.stop_vr().unwrap().is_none());
    }

    #[test]
    fn failed_display_can_be_retried() {
        let mut studio = Studio::new(Options::default());
        studio
            .start_vr(Arc::new(HeadlessHeadsetProvider::new().without_display()))
            .unwrap();
        let session = studio.vr_session().unwrap();
        assert!(session.wait_for_state(SessionState::Idle, Duration::from_secs(5)));

        studio
            .start_vr(Arc::new(HeadlessHeadsetProvider::new()))
            .unwrap();
        assert!(studio.is_vr_active());
        let _ = studio.stop_vr().unwrap();
    }

    #[test]
    fn hidden_import_stays_out_of_the_headset() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write_triangle_stl(dir.path(), "shown.stl"),
            write_triangle_stl(dir.path(), "hidden.stl"),
        ];
        let recorder = FrameRecorder::new();
        let mut studio = Studio::new(Options::default());
        let ids = studio.import_files(None, &files).unwrap().loaded;
        studio.set_part_visible(ids[1], false).unwrap();

        studio
            .start_vr(Arc::new(
                HeadlessHeadsetProvider::new().with_recorder(recorder.clone()),
            ))
            .unwrap();
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while recorder.is_empty() {
            assert!(std::time::Instant::now() < deadline, "no headset frame");
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(recorder.last().unwrap().drawables, 1);

        let report = studio.stop_vr().unwrap().unwrap();
        assert_eq!(report.transforms.len(), 1);
        assert!(recorder.frames().iter().all(|f| f.drawables == 1));
        assert!(!studio.is_vr_active());
    }

    #[test]
    fn structural_edit_restarts_the_mirror() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = FrameRecorder::new();
        let mut studio = Studio::new(Options::default());
        studio
            .start_vr(Arc::new(
                HeadlessHeadsetProvider::new().with_recorder(recorder.clone()),
            ))
            .unwrap();

        let file = write_triangle_stl(dir.path(), "late.stl");
        let _ = studio.import_files(None, &[file]).unwrap();
        assert!(studio.is_vr_active());
        let session = studio.vr_session().unwrap();
        assert!(session.wait_for_state(SessionState::Running, Duration::from_secs(5)));

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while !matches!(recorder.last(), Some(f) if f.drawables > 0) {
            assert!(std::time::Instant::now() < deadline, "mirror never showed the import");
            std::thread::sleep(Duration::from_millis(5));
        }
        let report = studio.stop_vr().unwrap().unwrap();
        assert_eq!(report.transforms.len(), 1);
    }

    #[test]
    fn restart_keeps_the_mirror_background() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = FrameRecorder::new();
        let mut studio = Studio::new(Options::default());
        let first = write_triangle_stl(dir.path(), "a.stl");
        let ids = studio.import_files(None, &[first]).unwrap().loaded;
        studio
            .start_vr(Arc::new(
                HeadlessHeadsetProvider::new().with_recorder(recorder.clone()),
            ))
            .unwrap();
        studio.set_background(Background::Color(Rgb::new(10, 20, 30)));
        // Restarts the mirror; only frames after this point are the new one's.
        studio.set_part_color(ids[0], Rgb::new(255, 0, 0)).unwrap();
        let restarted_at = recorder.len();

        let expected = Background::Color(Rgb::new(10, 20, 30));
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while !recorder.frames()[restarted_at..]
            .iter()
            .any(|f| f.background == expected)
        {
            assert!(std::time::Instant::now() < deadline, "restarted mirror lost its color");
            std::thread::sleep(Duration::from_millis(5));
        }
        let _ = studio.stop_vr().unwrap();
    }
}
