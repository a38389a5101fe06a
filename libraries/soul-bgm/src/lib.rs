//! Soul BGM - Background Music Playback
//!
//! Dual-track background music player for games and other interactive
//! applications.
//!
//! This crate provides:
//! - Crossfading between songs (old song fades out, new song fades in)
//! - Instant cut-over when volume fading is disabled
//! - Two fixed playback slots with a quietest-slot allocation policy
//! - Frame-driven fade updates (call `update` once per frame)
//! - Max volume changes reconciled against playing songs
//!
//! # Architecture
//!
//! `soul-bgm` does no decoding or device output itself. Each slot owns an
//! [`AudioOutput`] supplied by the host (a decoder-backed stream, a game
//! engine sound object, a headless probe for tests).
//!
//! Everything runs on the host's main loop: `play` / `stop` / setters from
//! event handling, then `update(dt)` once per frame.
//!
//! # Example: Crossfade
//!
//! ```rust
//! use soul_bgm::{AudioOutput, MusicId, MusicPlayer, PlayStatus, SlotId};
//! use std::path::Path;
//! use std::time::Duration;
//!
//! // Minimal output that accepts any file
//! #[derive(Default)]
//! struct Silent {
//!     status: PlayStatus,
//!     volume: f32,
//! }
//!
//! impl AudioOutput for Silent {
//!     fn open(&mut self, _path: &Path) -> bool {
//!         self.status = PlayStatus::Stopped;
//!         true
//!     }
//!     fn play(&mut self) {
//!         self.status = PlayStatus::Playing;
//!     }
//!     fn stop(&mut self) {
//!         self.status = PlayStatus::Stopped;
//!     }
//!     fn set_looping(&mut self, _looping: bool) {}
//!     fn set_volume(&mut self, volume: f32) {
//!         self.volume = volume;
//!     }
//!     fn volume(&self) -> f32 {
//!         self.volume
//!     }
//!     fn status(&self) -> PlayStatus {
//!         self.status
//!     }
//! }
//!
//! let mut player = MusicPlayer::new([Silent::default(), Silent::default()]);
//! player.load_default_paths();
//!
//! player.play_looped(MusicId::TitleScreen)?;
//! player.play_looped(MusicId::Game)?;
//! assert!(player.is_crossfading());
//!
//! // Host frame loop
//! let frame = Duration::from_secs_f32(1.0 / 60.0);
//! while player.is_fading() {
//!     player.update(frame);
//! }
//!
//! assert_eq!(player.status(SlotId::First), PlayStatus::Stopped);
//! assert_eq!(player.slot_volume(SlotId::Second), player.max_volume());
//! # Ok::<(), soul_bgm::BgmError>(())
//! ```

mod allocation;
mod config;
mod error;
pub mod fade;
mod float;
mod output;
mod paths;
mod player;
mod slot;
pub mod types;

// Public exports
pub use allocation::{choose, Allocation, AllocationReason};
pub use config::{MusicId, PlayerConfig};
pub use error::{BgmError, Result};
pub use float::approx_eq;
pub use output::AudioOutput;
pub use paths::PathStore;
pub use player::MusicPlayer;
pub use slot::TrackSlot;
pub use types::{FadeState, PlayStatus, SlotId};
