//! Per-frame fade volume interpolation
//!
//! Volume changes are easy to hear near silence and hard to hear above
//! about 20, so the two bands step differently:
//! - Below [`SIGNIFICANT_VOLUME`]: a time-scaled rate, so crossing the low
//!   band takes the configured fade duration regardless of frame rate
//! - At or above it: a flat step of 1 per frame
//!
//! Fade-in clamps at the max volume and fade-out clamps at zero, so both
//! edges land exactly on their target.

use crate::{
    float::approx_eq,
    output::AudioOutput,
    slot::TrackSlot,
    types::FadeState,
};
use std::time::Duration;

/// Upper bound of the low, time-scaled volume band
pub const SIGNIFICANT_VOLUME: f32 = 20.0;

/// Volume change per frame once past the low band
pub const FLAT_STEP: f32 = 1.0;

/// Low-band volume change for a frame lasting `dt`
///
/// A zero fade duration gives an infinite rate, crossing the low band in a
/// single frame.
#[inline]
pub fn fade_rate(dt: Duration, fade_duration: Duration) -> f32 {
    if fade_duration.is_zero() {
        return f32::INFINITY;
    }
    SIGNIFICANT_VOLUME * (dt.as_secs_f32() / fade_duration.as_secs_f32())
}

/// Next volume while fading in toward `max_volume`
#[inline]
pub fn fade_in_step(volume: f32, max_volume: f32, rate: f32) -> f32 {
    let step = if volume < SIGNIFICANT_VOLUME {
        rate
    } else {
        FLAT_STEP
    };
    max_volume.min(volume + step)
}

/// Next volume while fading out toward silence
#[inline]
pub fn fade_out_step(volume: f32, rate: f32) -> f32 {
    let step = if volume < SIGNIFICANT_VOLUME {
        rate
    } else {
        FLAT_STEP
    };
    0.0f32.max(volume - step)
}

impl<Id, O: AudioOutput> TrackSlot<Id, O> {
    /// Advance this slot's fade by one frame
    ///
    /// Returns the fade that completed this frame, if any. A finished
    /// fade-in keeps the song playing at max volume; a finished fade-out
    /// stops it.
    pub(crate) fn advance_fade(&mut self, max_volume: f32, rate: f32) -> Option<FadeState> {
        match self.fade_state() {
            FadeState::None => None,
            FadeState::FadeIn => {
                let volume = fade_in_step(self.volume(), max_volume, rate);
                self.set_volume(volume);
                tracing::trace!(volume, "Fade in");

                // Compare what the output reports, not what was requested
                if approx_eq(self.volume(), max_volume) {
                    self.set_fade_state(FadeState::None);
                    Some(FadeState::FadeIn)
                } else {
                    None
                }
            }
            FadeState::FadeOut => {
                let volume = fade_out_step(self.volume(), rate);
                self.set_volume(volume);
                tracing::trace!(volume, "Fade out");

                if approx_eq(self.volume(), 0.0) {
                    self.set_fade_state(FadeState::None);
                    self.stop();
                    Some(FadeState::FadeOut)
                } else {
                    None
                }
            }
        }
    }
}
