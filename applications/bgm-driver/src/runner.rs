//! Frame loop feeding a script to the music player
//!
//! Stands in for a game's main loop: commands fire at their scheduled
//! time, then every frame advances both outputs and calls
//! [`MusicPlayer::update`] with the fixed frame time.

use crate::{
    config::{track_key, DriverConfig},
    error::Result,
    output::HeadlessOutput,
    script::{Command, Script},
};
use soul_bgm::{AudioOutput, MusicPlayer, SlotId};
use std::time::{Duration, Instant};

/// Player keyed by the track names used in config and scripts
pub type ScriptedPlayer = MusicPlayer<String, HeadlessOutput>;

/// Totals for a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub commands: usize,

    /// Simulated time covered
    pub elapsed: Duration,
}

pub struct Runner {
    player: ScriptedPlayer,
    frame_time: Duration,
    realtime: bool,
    elapsed: Duration,
    frames: u64,
}

impl Runner {
    /// Build a player from `config` with its tracks bound
    pub fn new(config: &DriverConfig) -> Self {
        let outputs = [
            HeadlessOutput::new("track 0"),
            HeadlessOutput::new("track 1"),
        ];
        let mut player = MusicPlayer::with_config(config.player.clone(), outputs);
        player.load_paths(
            config
                .tracks
                .iter()
                .map(|(name, path)| (track_key(name), path.clone())),
        );

        Self {
            player,
            frame_time: config.frame_time(),
            realtime: config.driver.realtime,
            elapsed: Duration::ZERO,
            frames: 0,
        }
    }

    pub fn player(&self) -> &ScriptedPlayer {
        &self.player
    }

    /// Simulated time since the runner was built
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Apply one host event
    ///
    /// # Errors
    /// Failed `play` requests are returned as `DriverError::Playback`.
    pub fn apply(&mut self, command: &Command) -> Result<()> {
        tracing::debug!(at = ?self.elapsed, ?command, "Applying command");

        match command {
            Command::Play { track, looping } => {
                self.player.play(track_key(track), *looping)?;
            }
            Command::Stop => self.player.stop(),
            Command::SetFading { enabled } => self.player.set_volume_fading(*enabled),
            Command::SetMaxVolume { volume } => self.player.set_max_volume(*volume),
            Command::SetFadeSpeed { seconds } => {
                let duration =
                    Duration::try_from_secs_f32(seconds.max(0.0)).unwrap_or(Duration::MAX);
                self.player.set_fade_speed(duration);
            }
            Command::Report => self.report(),
        }

        Ok(())
    }

    /// Advance both outputs and the fades by one frame
    pub fn frame(&mut self) {
        let dt = self.frame_time;

        for slot in SlotId::ALL {
            self.player.output_mut(slot).advance(dt);
        }
        self.player.update(dt);

        self.elapsed += dt;
        self.frames += 1;
    }

    /// Run `script` from the current time until at least `until`
    ///
    /// Steps fire at the start of the first frame at or past their time.
    /// Every step fires even when `until` is earlier than the script's end.
    pub fn run(&mut self, script: &Script, until: Duration) -> Result<RunSummary> {
        let start = self.frames;
        let mut pending = script.steps().iter().peekable();
        let mut commands = 0;

        tracing::info!(
            steps = script.steps().len(),
            seconds = until.max(script.end()).as_secs_f32(),
            realtime = self.realtime,
            "Running script"
        );

        while self.elapsed <= until || pending.peek().is_some() {
            let frame_start = Instant::now();

            while let Some(step) = pending.next_if(|step| step.time() <= self.elapsed) {
                self.apply(&step.command)?;
                commands += 1;
            }

            self.frame();

            if self.realtime {
                if let Some(rest) = self.frame_time.checked_sub(frame_start.elapsed()) {
                    std::thread::sleep(rest);
                }
            }
        }

        let summary = RunSummary {
            frames: self.frames - start,
            commands,
            elapsed: self.elapsed,
        };
        tracing::info!(
            frames = summary.frames,
            commands = summary.commands,
            "Script finished"
        );
        Ok(summary)
    }

    /// Log the player's configuration and both slots
    pub fn report(&self) {
        tracing::info!(
            at = self.elapsed.as_secs_f32(),
            max_volume = self.player.max_volume(),
            fading = self.player.volume_fading(),
            fade_seconds = self.player.fade_speed().as_secs_f32(),
            "Player report"
        );

        for slot_id in SlotId::ALL {
            let slot = self.player.slot(slot_id);
            let output = slot.output();
            tracing::info!(
                status = ?slot.status(),
                fade = ?slot.fade_state(),
                volume = output.volume(),
                track = ?slot.track(),
                position = output.position().as_secs_f32(),
                "  {}",
                slot_id
            );
        }
    }
}
