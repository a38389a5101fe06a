//! Error types for background music playback

use std::path::PathBuf;
use thiserror::Error;

/// Music player errors
///
/// Both kinds are unrecoverable at the player level; the host decides
/// whether to log, display or abort.
#[derive(Debug, Error)]
pub enum BgmError {
    /// No path is bound to the requested track identifier
    #[error("No music path bound to track {0}")]
    TrackNotFound(String),

    /// The path resolved but the audio behind it could not be opened
    #[error(
        "Unable to find music at '{}'\nFile may have been deleted, modified, or moved.",
        path.display()
    )]
    LoadingError {
        /// Path handed to the audio output
        path: PathBuf,
    },
}

impl BgmError {
    /// Build a `TrackNotFound` from any debuggable identifier
    pub fn track_not_found(id: &impl std::fmt::Debug) -> Self {
        BgmError::TrackNotFound(format!("{id:?}"))
    }

    /// Whether the failure happened before any slot was touched
    pub fn is_track_not_found(&self) -> bool {
        matches!(self, BgmError::TrackNotFound(_))
    }
}

/// Result type for music player operations
pub type Result<T> = std::result::Result<T, BgmError>;
