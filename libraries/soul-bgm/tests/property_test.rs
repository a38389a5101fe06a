//! Property-based tests for the fade algorithm and allocation policy
//!
//! Uses proptest to check fade invariants across frame rates, fade speeds
//! and volume ceilings.

mod test_helpers;

use proptest::prelude::*;
use soul_bgm::{
    approx_eq, choose,
    fade::{fade_in_step, fade_out_step, fade_rate},
    FadeState, MusicId, PlayStatus, SlotId,
};
use std::time::Duration;
use test_helpers::{idle_player, player_with, ScriptedOutput};

// ===== Helpers =====

fn frame_time() -> impl Strategy<Value = Duration> {
    (4u64..50).prop_map(Duration::from_millis)
}

fn fade_time() -> impl Strategy<Value = Duration> {
    (100u64..3_000).prop_map(Duration::from_millis)
}

fn status() -> impl Strategy<Value = PlayStatus> {
    prop_oneof![
        Just(PlayStatus::Stopped),
        Just(PlayStatus::Playing),
        Just(PlayStatus::Paused),
    ]
}

/// Frames a full fade may take: the low band plus one flat step per unit
fn frame_budget(dt: Duration, fade: Duration, max_volume: f32) -> usize {
    let low_band = (fade.as_secs_f32() / dt.as_secs_f32()).ceil() as usize;
    low_band + max_volume.ceil() as usize + 2
}

// ===== Property Tests =====

proptest! {
    /// Property: fade-in rises monotonically and settles exactly on max volume
    #[test]
    fn fade_in_converges_monotonically(
        dt in frame_time(),
        fade in fade_time(),
        max_volume in 0.0f32..=100.0,
    ) {
        let mut player = idle_player();
        player.set_fade_speed(fade);
        player.set_max_volume(max_volume);
        player.play_looped(MusicId::TitleScreen).unwrap();

        let budget = frame_budget(dt, fade, max_volume);
        let mut previous = player.slot_volume(SlotId::First);
        let mut frames = 0;

        while player.fade_state(SlotId::First) == FadeState::FadeIn {
            player.update(dt);
            frames += 1;

            let volume = player.slot_volume(SlotId::First);
            prop_assert!(volume >= previous, "volume fell from {} to {}", previous, volume);
            prop_assert!(volume <= max_volume);
            prop_assert!(frames <= budget, "fade-in exceeded {} frames", budget);
            previous = volume;
        }

        prop_assert_eq!(player.slot_volume(SlotId::First), max_volume);
        prop_assert_eq!(player.status(SlotId::First), PlayStatus::Playing);
    }

    /// Property: fade-out falls monotonically, reaches exactly zero and stops
    #[test]
    fn fade_out_converges_and_stops(
        dt in frame_time(),
        fade in fade_time(),
        start in 0.5f32..=100.0,
    ) {
        let mut player = player_with(ScriptedOutput::playing(start), ScriptedOutput::default());
        player.set_fade_speed(fade);
        player.stop();

        let budget = frame_budget(dt, fade, start);
        let mut previous = start;
        let mut frames = 0;

        while player.fade_state(SlotId::First) == FadeState::FadeOut {
            player.update(dt);
            frames += 1;

            let volume = player.slot_volume(SlotId::First);
            prop_assert!(volume <= previous, "volume rose from {} to {}", previous, volume);
            prop_assert!(volume >= 0.0);
            prop_assert!(frames <= budget, "fade-out exceeded {} frames", budget);
            previous = volume;
        }

        prop_assert_eq!(player.slot_volume(SlotId::First), 0.0);
        prop_assert_eq!(player.status(SlotId::First), PlayStatus::Stopped);
    }

    /// Property: one step never crosses its bound and never moves backward
    #[test]
    fn single_steps_stay_in_bounds(
        volume in 0.0f32..=100.0,
        max_volume in 0.0f32..=100.0,
        dt in frame_time(),
        fade in fade_time(),
    ) {
        let rate = fade_rate(dt, fade);
        let current = volume.min(max_volume);

        let up = fade_in_step(current, max_volume, rate);
        prop_assert!(up >= current && up <= max_volume);

        let down = fade_out_step(volume, rate);
        prop_assert!(down <= volume && down >= 0.0);
    }

    /// Property: allocation only replaces an active slot when none is stopped,
    /// and then always the quieter one
    #[test]
    fn allocation_prefers_stopped_then_quieter(
        first in (status(), 0.0f32..=100.0),
        second in (status(), 0.0f32..=100.0),
    ) {
        let allocation = choose(first, second);

        if first.0 == PlayStatus::Stopped {
            prop_assert_eq!(allocation.target, SlotId::First);
        } else if second.0 == PlayStatus::Stopped {
            prop_assert_eq!(allocation.target, SlotId::Second);
        } else {
            let (target, other) = match allocation.target {
                SlotId::First => (first.1, second.1),
                SlotId::Second => (second.1, first.1),
            };
            prop_assert!(target <= other);
        }
    }

    /// Property: equality is reflexive and tolerates a one-ulp difference
    #[test]
    fn approx_eq_tolerates_one_ulp(value in 1.0f32..=100.0) {
        let next = f32::from_bits(value.to_bits() + 1);

        prop_assert!(approx_eq(value, value));
        prop_assert!(approx_eq(value, next));
        prop_assert!(!approx_eq(value, value + 0.01));
    }
}
