//! Player configuration and the default track catalog

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the music player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Fade-in target and non-fading playback volume (default: 100)
    pub max_volume: f32,

    /// Nominal length of one fade edge in seconds (default: 2)
    pub fade_seconds: f32,

    /// Crossfade between songs instead of cutting (default: true)
    pub fading: bool,
}

impl PlayerConfig {
    /// Fade edge length as a `Duration`
    ///
    /// Negative or NaN seconds read as zero (instant fades); values too large
    /// for a `Duration` saturate.
    pub fn fade_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.fade_seconds.max(0.0)).unwrap_or(Duration::MAX)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_volume: 100.0,
            fade_seconds: 2.0,
            fading: true,
        }
    }
}

/// Songs shipped with the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MusicId {
    /// Title screen theme
    TitleScreen,

    /// In-game theme
    Game,
}

impl MusicId {
    /// Every known song
    pub const ALL: [MusicId; 2] = [MusicId::TitleScreen, MusicId::Game];

    /// Default file path, relative to the working directory
    pub fn default_path(self) -> PathBuf {
        match self {
            MusicId::TitleScreen => PathBuf::from("snd/title.ogg"),
            MusicId::Game => PathBuf::from("snd/gamesong.ogg"),
        }
    }

    /// Bindings for every known song
    pub fn default_bindings() -> impl Iterator<Item = (MusicId, PathBuf)> {
        Self::ALL.into_iter().map(|id| (id, id.default_path()))
    }
}
