//! Crate-level error types.

use std::fmt;
use std::path::PathBuf;

use crate::tree::PartId;

/// Errors produced by the vrcad crate.
///
/// Every variant is locally recoverable: callers report it and carry on.
#[derive(Debug)]
pub enum VrcadError {
    /// A tree mutation named a parent that does not belong to the tree.
    InvalidParent(PartId),
    /// An operation named a part that does not belong to the tree.
    UnknownPart(PartId),
    /// A mesh file was missing, unreadable, or malformed.
    GeometryLoad {
        /// File that failed to load.
        path: PathBuf,
        /// Loader diagnostic.
        reason: String,
    },
    /// A mirror session was asked to start while one is active.
    AlreadyRunning,
    /// No head-mounted display could be connected.
    DisplayUnavailable(String),
    /// A skybox directory is missing one or more cube faces.
    Skybox(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn the mirror worker thread.
    ThreadSpawn(std::io::Error),
    /// Settings JSON parsing/serialization failure.
    SettingsParse(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A render target failed to draw a frame.
    Render(String),
    /// The mirror worker thread panicked before it could report.
    WorkerPanicked,
}

impl fmt::Display for VrcadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParent(id) => {
                write!(f, "parent {id} does not belong to the part tree")
            }
            Self::UnknownPart(id) => {
                write!(f, "part {id} does not belong to the part tree")
            }
            Self::GeometryLoad { path, reason } => {
                write!(f, "failed to load {}: {reason}", path.display())
            }
            Self::AlreadyRunning => {
                write!(f, "a VR mirror session is already running")
            }
            Self::DisplayUnavailable(msg) => {
                write!(f, "VR display unavailable: {msg}")
            }
            Self::Skybox(msg) => write!(f, "skybox error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::SettingsParse(msg) => {
                write!(f, "settings parse error: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Render(msg) => write!(f, "render error: {msg}"),
            Self::WorkerPanicked => write!(f, "VR mirror worker panicked"),
        }
    }
}

impl std::error::Error for VrcadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VrcadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
