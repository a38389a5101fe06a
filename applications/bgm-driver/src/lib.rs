//! Soul BGM Driver Library
//!
//! Headless host for the `soul-bgm` music player: loads configuration,
//! binds tracks and replays timed scripts of host events against a
//! simulated frame loop.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod error;
pub mod output;
pub mod runner;
pub mod script;

// Re-export commonly used types for convenience
pub use config::{track_key, DriverConfig};
pub use error::{DriverError, Result};
pub use output::{probe, AudioInfo, HeadlessOutput};
pub use runner::{RunSummary, Runner, ScriptedPlayer};
pub use script::{Command, Script, Step};
