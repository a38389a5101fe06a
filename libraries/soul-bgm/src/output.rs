//! Platform-agnostic audio output trait
//!
//! Abstracts the streaming playback handle each slot owns (desktop decoder,
//! game engine sound object, headless probe, etc.)

use crate::types::PlayStatus;
use std::path::Path;

/// Streaming audio handle owned by a track slot
///
/// Implementors decode and stream audio on their own; the player only
/// drives transport and volume. Volume uses the 0-100 scale the player's
/// max volume is expressed in.
pub trait AudioOutput {
    /// Open the file at `path`, replacing whatever was open before
    ///
    /// # Returns
    /// * `true` - Audio is ready to play
    /// * `false` - Missing, unreadable or undecodable file. The previous
    ///   audio is gone either way.
    fn open(&mut self, path: &Path) -> bool;

    /// Start or resume playback
    fn play(&mut self);

    /// Stop playback and rewind
    fn stop(&mut self);

    /// Restart from the beginning when the end is reached
    fn set_looping(&mut self, looping: bool);

    /// Set playback volume
    fn set_volume(&mut self, volume: f32);

    /// Current playback volume
    fn volume(&self) -> f32;

    /// Current transport status
    fn status(&self) -> PlayStatus;

    /// Check if audio is currently playing
    fn is_playing(&self) -> bool {
        self.status() == PlayStatus::Playing
    }
}

impl<O: AudioOutput + ?Sized> AudioOutput for Box<O> {
    fn open(&mut self, path: &Path) -> bool {
        (**self).open(path)
    }

    fn play(&mut self) {
        (**self).play();
    }

    fn stop(&mut self) {
        (**self).stop();
    }

    fn set_looping(&mut self, looping: bool) {
        (**self).set_looping(looping);
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume);
    }

    fn volume(&self) -> f32 {
        (**self).volume()
    }

    fn status(&self) -> PlayStatus {
        (**self).status()
    }
}

/// In-memory audio output for testing
///
/// Opens any path except those containing "missing"; remembers the loop
/// flag and counts stop calls.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FakeOutput {
    pub path: Option<std::path::PathBuf>,
    pub status: PlayStatus,
    pub volume: f32,
    pub looping: bool,
    pub stop_calls: usize,
}

#[cfg(test)]
impl FakeOutput {
    /// Output already playing at `volume`
    pub fn playing(volume: f32) -> Self {
        Self {
            path: Some("playing.ogg".into()),
            status: PlayStatus::Playing,
            volume,
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl AudioOutput for FakeOutput {
    fn open(&mut self, path: &Path) -> bool {
        self.status = PlayStatus::Stopped;
        if path.to_string_lossy().contains("missing") {
            self.path = None;
            return false;
        }
        self.path = Some(path.to_path_buf());
        true
    }

    fn play(&mut self) {
        if self.path.is_some() {
            self.status = PlayStatus::Playing;
        }
    }

    fn stop(&mut self) {
        self.stop_calls += 1;
        self.status = PlayStatus::Stopped;
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn status(&self) -> PlayStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxed_output_delegates() {
        let mut output: Box<dyn AudioOutput> = Box::new(FakeOutput::default());

        assert!(output.open(Path::new("snd/title.ogg")));
        output.set_volume(42.0);
        output.play();

        assert!(output.is_playing());
        assert_eq!(output.volume(), 42.0);

        output.stop();
        assert_eq!(output.status(), PlayStatus::Stopped);
    }

    #[test]
    fn failed_open_drops_previous_audio() {
        let mut output = FakeOutput::playing(80.0);

        assert!(!output.open(Path::new("snd/missing.ogg")));
        output.play();

        assert_eq!(output.status(), PlayStatus::Stopped);
        assert!(output.path.is_none());
    }
}
