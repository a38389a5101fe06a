//! Core types shared by slots, the fade algorithm and the player

use serde::{Deserialize, Serialize};

/// Transport status reported by an audio output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayStatus {
    /// Nothing playing; position reset
    #[default]
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Fade transition a slot is going through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FadeState {
    /// Volume left alone by `update`
    #[default]
    None,

    /// Rising toward the player's max volume
    FadeIn,

    /// Falling toward silence; the song stops when it gets there
    FadeOut,
}

/// One of the two playback slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotId {
    /// Slot 0
    First,

    /// Slot 1
    Second,
}

impl SlotId {
    /// Both slots, in allocation order
    pub const ALL: [SlotId; 2] = [SlotId::First, SlotId::Second];

    /// Array index of the slot
    #[inline]
    pub fn index(self) -> usize {
        match self {
            SlotId::First => 0,
            SlotId::Second => 1,
        }
    }

    /// The companion slot
    #[inline]
    pub fn other(self) -> SlotId {
        match self {
            SlotId::First => SlotId::Second,
            SlotId::Second => SlotId::First,
        }
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "track {}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_ids_pair_up() {
        assert_eq!(SlotId::First.other(), SlotId::Second);
        assert_eq!(SlotId::Second.other(), SlotId::First);
        assert_eq!(SlotId::ALL.map(SlotId::index), [0, 1]);
    }

    #[test]
    fn defaults_are_idle() {
        assert_eq!(PlayStatus::default(), PlayStatus::Stopped);
        assert_eq!(FadeState::default(), FadeState::None);
    }

    #[test]
    fn slot_display() {
        assert_eq!(SlotId::Second.to_string(), "track 1");
    }
}
