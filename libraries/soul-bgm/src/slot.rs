//! Track slot: one playback handle plus its fade state

use crate::{
    error::{BgmError, Result},
    output::AudioOutput,
    types::{FadeState, PlayStatus},
};
use std::path::Path;

/// One of the player's two playback channels
///
/// Exclusively owns its audio output for the player's lifetime. Opening a
/// new song replaces whatever the output held before.
#[derive(Debug)]
pub struct TrackSlot<Id, O> {
    /// Streaming playback handle
    output: O,

    /// Whether `update` is ramping this slot's volume
    fade_state: FadeState,

    /// Song opened last (cleared when an open fails)
    track: Option<Id>,
}

impl<Id, O: AudioOutput> TrackSlot<Id, O> {
    /// Wrap an audio output in an idle slot
    pub fn new(output: O) -> Self {
        Self {
            output,
            fade_state: FadeState::None,
            track: None,
        }
    }

    /// Open `path` as the slot's song
    ///
    /// A failed open leaves the slot without playable audio: the previous
    /// song is not restored.
    pub(crate) fn open(&mut self, id: Id, path: &Path) -> Result<()> {
        if !self.output.open(path) {
            self.track = None;
            return Err(BgmError::LoadingError {
                path: path.to_path_buf(),
            });
        }
        self.track = Some(id);
        Ok(())
    }

    pub(crate) fn play(&mut self) {
        self.output.play();
    }

    pub(crate) fn stop(&mut self) {
        self.output.stop();
    }

    pub(crate) fn set_looping(&mut self, looping: bool) {
        self.output.set_looping(looping);
    }

    pub(crate) fn set_volume(&mut self, volume: f32) {
        self.output.set_volume(volume);
    }

    pub(crate) fn set_fade_state(&mut self, fade_state: FadeState) {
        self.fade_state = fade_state;
    }

    /// Current fade transition
    pub fn fade_state(&self) -> FadeState {
        self.fade_state
    }

    /// Transport status reported by the output
    pub fn status(&self) -> PlayStatus {
        self.output.status()
    }

    /// Check if the slot is audibly playing
    pub fn is_playing(&self) -> bool {
        self.output.is_playing()
    }

    /// Current output volume
    pub fn volume(&self) -> f32 {
        self.output.volume()
    }

    /// Song opened last, if the open succeeded
    pub fn track(&self) -> Option<&Id> {
        self.track.as_ref()
    }

    /// Borrow the underlying output
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Mutably borrow the underlying output
    ///
    /// Transport changes made through this bypass the fade state machine.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
