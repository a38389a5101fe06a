//! Shared helpers for soul-bgm integration tests

use soul_bgm::{AudioOutput, MusicId, MusicPlayer, PlayStatus};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;

static INIT: Once = Once::new();

/// 60 fps frame
pub const FRAME: Duration = Duration::from_micros(16_667);

/// Install a test-writer subscriber once per test binary
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Calls recorded by [`ScriptedOutput`]
#[derive(Debug, Clone, PartialEq)]
pub enum OutputCall {
    Open(PathBuf),
    Play,
    Stop,
    Looping(bool),
    Volume(f32),
}

/// In-memory audio output that records every call
///
/// Paths listed in `unreadable` fail to open.
#[derive(Debug, Default)]
pub struct ScriptedOutput {
    pub calls: Vec<OutputCall>,
    pub unreadable: Vec<PathBuf>,
    pub opened: Option<PathBuf>,
    pub status: PlayStatus,
    pub volume: f32,
    pub looping: bool,
}

impl ScriptedOutput {
    /// Output already playing some earlier song at `volume`
    pub fn playing(volume: f32) -> Self {
        Self {
            opened: Some(PathBuf::from("snd/earlier.ogg")),
            status: PlayStatus::Playing,
            volume,
            ..Self::default()
        }
    }

    /// Output that cannot open `path`
    pub fn failing_on(path: impl Into<PathBuf>) -> Self {
        Self {
            unreadable: vec![path.into()],
            ..Self::default()
        }
    }

    /// Volumes set since the last `Open`
    pub fn volumes_since_open(&self) -> Vec<f32> {
        let start = self
            .calls
            .iter()
            .rposition(|call| matches!(call, OutputCall::Open(_)))
            .map_or(0, |i| i + 1);

        self.calls[start..]
            .iter()
            .filter_map(|call| match call {
                OutputCall::Volume(v) => Some(*v),
                _ => None,
            })
            .collect()
    }
}

impl AudioOutput for ScriptedOutput {
    fn open(&mut self, path: &Path) -> bool {
        self.calls.push(OutputCall::Open(path.to_path_buf()));
        self.status = PlayStatus::Stopped;

        if self.unreadable.iter().any(|p| p == path) {
            self.opened = None;
            return false;
        }
        self.opened = Some(path.to_path_buf());
        true
    }

    fn play(&mut self) {
        self.calls.push(OutputCall::Play);
        if self.opened.is_some() {
            self.status = PlayStatus::Playing;
        }
    }

    fn stop(&mut self) {
        self.calls.push(OutputCall::Stop);
        self.status = PlayStatus::Stopped;
    }

    fn set_looping(&mut self, looping: bool) {
        self.calls.push(OutputCall::Looping(looping));
        self.looping = looping;
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.push(OutputCall::Volume(volume));
        self.volume = volume;
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn status(&self) -> PlayStatus {
        self.status
    }
}

/// Player over two idle outputs with the default catalog bound
pub fn idle_player() -> MusicPlayer<MusicId, ScriptedOutput> {
    player_with(ScriptedOutput::default(), ScriptedOutput::default())
}

/// Player over the given outputs with the default catalog bound
pub fn player_with(
    first: ScriptedOutput,
    second: ScriptedOutput,
) -> MusicPlayer<MusicId, ScriptedOutput> {
    init_tracing();
    let mut player = MusicPlayer::new([first, second]);
    player.load_default_paths();
    player
}

/// Run `update` until no slot is fading, returning the frame count
pub fn run_fades(player: &mut MusicPlayer<MusicId, ScriptedOutput>, dt: Duration) -> usize {
    let mut frames = 0;
    while player.is_fading() {
        player.update(dt);
        frames += 1;
        assert!(frames < 100_000, "fades never settled: {player:?}");
    }
    frames
}
