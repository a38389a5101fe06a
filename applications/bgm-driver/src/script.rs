//! Timed host events for the driver
//!
//! A script is a TOML document of `[[step]]` tables, each firing one
//! command at a point in simulated time:
//!
//! ```toml
//! [[step]]
//! at = 0.0
//! command = "play"
//! track = "title_screen"
//!
//! [[step]]
//! at = 4.0
//! command = "set_fading"
//! enabled = false
//! ```

use crate::error::{DriverError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Host event fed to the music player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Play a configured track
    Play {
        track: String,
        #[serde(default = "default_looping")]
        looping: bool,
    },

    /// Stop the music (fades out when fading is on)
    Stop,

    /// Turn crossfading on or off
    SetFading { enabled: bool },

    /// Change the max volume
    SetMaxVolume { volume: f32 },

    /// Change the fade edge length
    SetFadeSpeed { seconds: f32 },

    /// Log the player's configuration and slot states
    Report,
}

fn default_looping() -> bool {
    true
}

/// One command scheduled at `at` seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub at: f32,

    #[serde(flatten)]
    pub command: Command,
}

impl Step {
    pub fn new(at: f32, command: Command) -> Self {
        Self { at, command }
    }

    /// Scheduled time as a `Duration`
    pub fn time(&self) -> Duration {
        Duration::try_from_secs_f32(self.at.max(0.0)).unwrap_or(Duration::MAX)
    }
}

/// Steps ordered by time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    steps: Vec<Step>,
}

impl Script {
    /// Build a script, ordering steps by time
    ///
    /// Steps sharing a time keep their given order.
    pub fn new(steps: Vec<Step>) -> Result<Self> {
        if let Some(step) = steps.iter().find(|s| !s.at.is_finite() || s.at < 0.0) {
            return Err(DriverError::Script(format!(
                "Step time must be a non-negative number of seconds, got {}",
                step.at
            )));
        }

        let mut steps = steps;
        steps.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(Self { steps })
    }

    /// Parse a TOML script
    pub fn parse(source: &str) -> Result<Self> {
        let raw: Script = toml::from_str(source)?;
        Self::new(raw.steps)
    }

    /// Read and parse a TOML script file
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    /// Built-in walkthrough of crossfades, fading toggles and stop
    pub fn demo() -> Self {
        let play = |track: &str| Command::Play {
            track: track.to_string(),
            looping: true,
        };

        let steps = vec![
            Step::new(0.0, play("title_screen")),
            Step::new(3.0, Command::Report),
            Step::new(4.0, play("game")),
            Step::new(5.0, play("title_screen")),
            Step::new(9.0, Command::Report),
            Step::new(10.0, Command::SetMaxVolume { volume: 60.0 }),
            Step::new(11.0, Command::SetFading { enabled: false }),
            Step::new(12.0, play("game")),
            Step::new(13.0, Command::SetFading { enabled: true }),
            Step::new(13.0, Command::SetFadeSpeed { seconds: 0.5 }),
            Step::new(13.5, Command::SetMaxVolume { volume: 100.0 }),
            Step::new(16.0, Command::Stop),
            Step::new(20.0, Command::Report),
        ];

        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Time of the last step
    pub fn end(&self) -> Duration {
        self.steps.last().map(Step::time).unwrap_or_default()
    }
}
