//! Music player - owns both slots and orchestrates crossfades
//!
//! Coordinates the path store, the slot allocation policy and the fade
//! algorithm. The host calls [`MusicPlayer::play`] / [`MusicPlayer::stop`]
//! from its event handling and [`MusicPlayer::update`] once per frame.

use crate::{
    allocation::{self, AllocationReason},
    config::{MusicId, PlayerConfig},
    error::Result,
    fade,
    output::AudioOutput,
    paths::PathStore,
    slot::TrackSlot,
    types::{FadeState, PlayStatus, SlotId},
};
use std::fmt::Debug;
use std::hash::Hash;
use std::path::PathBuf;
use std::time::Duration;

/// Dual-slot background music player
///
/// Plays one song at a time. Requesting a new song while another plays
/// crossfades between them when volume fading is on, or cuts over
/// instantly when it is off.
pub struct MusicPlayer<Id, O> {
    /// Identifier to file path bindings
    paths: PathStore<Id>,

    /// The two playback channels
    slots: [TrackSlot<Id, O>; 2],

    /// Fade-in target and non-fading playback volume
    max_volume: f32,

    /// Crossfade instead of cutting
    fading: bool,

    /// Nominal length of one fade edge
    fade_duration: Duration,
}

impl<Id, O> MusicPlayer<Id, O>
where
    Id: Eq + Hash + Debug,
    O: AudioOutput,
{
    /// Create a player with default configuration
    ///
    /// # Arguments
    /// * `outputs` - Playback handles for slot 0 and slot 1
    pub fn new(outputs: [O; 2]) -> Self {
        Self::with_config(PlayerConfig::default(), outputs)
    }

    /// Create a player with explicit configuration
    pub fn with_config(config: PlayerConfig, outputs: [O; 2]) -> Self {
        let player = Self {
            paths: PathStore::new(),
            slots: outputs.map(TrackSlot::new),
            max_volume: config.max_volume,
            fading: config.fading,
            fade_duration: config.fade_duration(),
        };

        tracing::debug!(
            max_volume = player.max_volume,
            fading = player.fading,
            fade_seconds = player.fade_duration.as_secs_f32(),
            "Music player constructed"
        );

        player
    }

    /// Bind song identifiers to file paths
    ///
    /// Called during the host's loading stage, before the first `play`.
    pub fn load_paths<P, I>(&mut self, bindings: I)
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = (Id, P)>,
    {
        self.paths.extend(bindings);
        tracing::debug!(count = self.paths.len(), "Loaded music paths");
    }

    /// Path bindings
    pub fn paths(&self) -> &PathStore<Id> {
        &self.paths
    }

    /// Mutable path bindings
    pub fn paths_mut(&mut self) -> &mut PathStore<Id> {
        &mut self.paths
    }

    /// Play a song, crossfading from whatever is playing
    ///
    /// # Arguments
    /// * `id` - Song to play; must be bound by `load_paths`
    /// * `looping` - Restart the song when it ends
    ///
    /// # Errors
    /// * `TrackNotFound` - Nothing bound to `id`. No slot is touched.
    /// * `LoadingError` - The file could not be opened. The chosen slot's
    ///   previous song is gone; the other slot is untouched.
    pub fn play(&mut self, id: Id, looping: bool) -> Result<()> {
        tracing::debug!(
            id = ?id,
            looping,
            fading = self.fading,
            first = ?self.slots[0].status(),
            second = ?self.slots[1].status(),
            "Play requested"
        );

        let allocation = allocation::select_target(&self.slots);
        let target = allocation.target;
        let companion = allocation.companion();

        // Resolve before touching the target slot
        let path = self.paths.lookup(&id)?;

        match allocation.reason {
            AllocationReason::Idle => {
                tracing::debug!("Stop {}. Play {}", companion, target);
            }
            AllocationReason::Quieter => {
                tracing::debug!("Both tracks active. Replacing quieter {}", target);
            }
        }

        let slot = &mut self.slots[target.index()];
        if let Err(err) = slot.open(id, path) {
            tracing::warn!("Failed to open music for {}: {}", target, err);
            return Err(err);
        }
        slot.set_looping(looping);

        if self.fading {
            slot.set_fade_state(FadeState::FadeIn);
            slot.set_volume(0.0);
            slot.play();
            self.slots[companion.index()].set_fade_state(FadeState::FadeOut);

            tracing::info!("Playing {} with fading", target);
        } else {
            self.stop_slots();
            let slot = &mut self.slots[target.index()];
            slot.set_volume(self.max_volume);
            slot.play();

            tracing::info!("Playing {} without fading", target);
        }

        tracing::debug!(
            first = ?self.slots[0].status(),
            second = ?self.slots[1].status(),
            "Play finished"
        );

        Ok(())
    }

    /// Play a looping song
    pub fn play_looped(&mut self, id: Id) -> Result<()> {
        self.play(id, true)
    }

    /// Stop the music
    ///
    /// With fading on, playing slots are armed to fade out over the next
    /// `update` calls rather than silenced at once.
    pub fn stop(&mut self) {
        tracing::info!(fading = self.fading, "Stop requested");
        self.stop_slots();
    }

    fn stop_slots(&mut self) {
        for (slot_id, slot) in SlotId::ALL.into_iter().zip(self.slots.iter_mut()) {
            if self.fading && slot.is_playing() {
                slot.set_fade_state(FadeState::FadeOut);
                tracing::debug!("Fading out {}", slot_id);
            } else {
                slot.stop();
            }
        }
    }

    /// Advance fades by one frame
    ///
    /// # Arguments
    /// * `dt` - Time elapsed since the previous frame
    pub fn update(&mut self, dt: Duration) {
        let rate = fade::fade_rate(dt, self.fade_duration);

        for (slot_id, slot) in SlotId::ALL.into_iter().zip(self.slots.iter_mut()) {
            match slot.advance_fade(self.max_volume, rate) {
                Some(FadeState::FadeIn) => tracing::debug!("Fade in of {} done", slot_id),
                Some(FadeState::FadeOut) => tracing::debug!("Fade out of {} done", slot_id),
                Some(FadeState::None) | None => {}
            }
        }
    }

    /// Change the max volume, reconciling playing slots
    ///
    /// Louder slots are clamped at once (a fade-out would stop them).
    /// Quieter slots fade up when fading is on, or jump to the new max.
    pub fn set_max_volume(&mut self, volume: f32) {
        self.max_volume = volume;

        for slot in self.slots.iter_mut().filter(|slot| slot.is_playing()) {
            if slot.volume() > volume {
                slot.set_volume(volume);
            } else if self.fading {
                slot.set_fade_state(FadeState::FadeIn);
            } else {
                slot.set_volume(volume);
            }
        }

        tracing::debug!(max_volume = volume, "Max volume changed");
    }

    /// Set how long one fade edge lasts
    pub fn set_fade_speed(&mut self, duration: Duration) {
        self.fade_duration = duration;
    }

    /// Turn crossfading on or off
    pub fn set_volume_fading(&mut self, fading: bool) {
        self.fading = fading;
    }

    /// Current max volume
    pub fn max_volume(&self) -> f32 {
        self.max_volume
    }

    /// Current fade edge length
    pub fn fade_speed(&self) -> Duration {
        self.fade_duration
    }

    /// Check if crossfading is on
    pub fn volume_fading(&self) -> bool {
        self.fading
    }

    /// Snapshot of the active configuration
    pub fn config(&self) -> PlayerConfig {
        PlayerConfig {
            max_volume: self.max_volume,
            fade_seconds: self.fade_duration.as_secs_f32(),
            fading: self.fading,
        }
    }

    /// Borrow one slot
    pub fn slot(&self, slot: SlotId) -> &TrackSlot<Id, O> {
        &self.slots[slot.index()]
    }

    /// Mutably borrow one slot's output
    ///
    /// Transport changes made through this bypass the fade state machine.
    pub fn output_mut(&mut self, slot: SlotId) -> &mut O {
        self.slots[slot.index()].output_mut()
    }

    /// Fade transition of one slot
    pub fn fade_state(&self, slot: SlotId) -> FadeState {
        self.slot(slot).fade_state()
    }

    /// Transport status of one slot
    pub fn status(&self, slot: SlotId) -> PlayStatus {
        self.slot(slot).status()
    }

    /// Output volume of one slot
    pub fn slot_volume(&self, slot: SlotId) -> f32 {
        self.slot(slot).volume()
    }

    /// Check if any slot is mid-fade
    pub fn is_fading(&self) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.fade_state() != FadeState::None)
    }

    /// Check if one playing slot fades in while the other fades out
    pub fn is_crossfading(&self) -> bool {
        let [first, second] = &self.slots;
        let rising_and_falling = |a: &TrackSlot<Id, O>, b: &TrackSlot<Id, O>| {
            a.fade_state() == FadeState::FadeIn
                && b.fade_state() == FadeState::FadeOut
                && a.is_playing()
                && b.is_playing()
        };
        rising_and_falling(first, second) || rising_and_falling(second, first)
    }
}

impl<O: AudioOutput> MusicPlayer<MusicId, O> {
    /// Bind every shipped song to its default path
    pub fn load_default_paths(&mut self) {
        self.load_paths(MusicId::default_bindings());
    }
}

impl<Id: Debug, O> Debug for MusicPlayer<Id, O>
where
    O: AudioOutput,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn summary<Id, O: AudioOutput>(
            slot: &TrackSlot<Id, O>,
        ) -> (Option<&Id>, PlayStatus, f32, FadeState) {
            (slot.track(), slot.status(), slot.volume(), slot.fade_state())
        }

        f.debug_struct("MusicPlayer")
            .field("first", &summary(&self.slots[0]))
            .field("second", &summary(&self.slots[1]))
            .field("max_volume", &self.max_volume)
            .field("fading", &self.fading)
            .field("fade_duration", &self.fade_duration)
            .finish()
    }
}
