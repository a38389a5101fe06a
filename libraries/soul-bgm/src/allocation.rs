//! Slot allocation policy
//!
//! Decides which of the two slots takes a newly requested song:
//! 1. Slot 0 if it is stopped
//! 2. Otherwise slot 1 if it is stopped
//! 3. Otherwise the quieter slot (ties go to slot 0), which is the one
//!    furthest into its fade-out and closest to silence

use crate::{
    output::AudioOutput,
    slot::TrackSlot,
    types::{PlayStatus, SlotId},
};

/// Why a slot was picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationReason {
    /// Target was stopped
    Idle,

    /// Both slots active; target was the quieter one
    Quieter,
}

/// Outcome of the allocation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    /// Slot that takes the new song
    pub target: SlotId,

    /// Why it was picked
    pub reason: AllocationReason,
}

impl Allocation {
    /// Slot that keeps (and fades out) its current song
    pub fn companion(&self) -> SlotId {
        self.target.other()
    }
}

/// Pick a target from each slot's status and volume
///
/// Paused counts as active: only a stopped slot is free.
pub fn choose(first: (PlayStatus, f32), second: (PlayStatus, f32)) -> Allocation {
    let (first_status, first_volume) = first;
    let (second_status, second_volume) = second;

    if first_status == PlayStatus::Stopped {
        return Allocation {
            target: SlotId::First,
            reason: AllocationReason::Idle,
        };
    }

    if second_status == PlayStatus::Stopped {
        return Allocation {
            target: SlotId::Second,
            reason: AllocationReason::Idle,
        };
    }

    let target = if second_volume < first_volume {
        SlotId::Second
    } else {
        SlotId::First
    };

    Allocation {
        target,
        reason: AllocationReason::Quieter,
    }
}

/// Pick a target for the player's slots
pub fn select_target<Id, O: AudioOutput>(slots: &[TrackSlot<Id, O>; 2]) -> Allocation {
    let [first, second] = slots;
    choose(
        (first.status(), first.volume()),
        (second.status(), second.volume()),
    )
}
