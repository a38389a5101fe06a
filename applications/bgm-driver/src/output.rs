//! Headless audio output
//!
//! Validates music files with the Symphonia prober and simulates transport
//! and volume, so the player can be driven without a sound device.

use crate::error::{DriverError, Result};
use soul_bgm::{AudioOutput, PlayStatus};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Stream properties found while probing a file
#[derive(Debug, Clone, PartialEq)]
pub struct AudioInfo {
    pub sample_rate: u32,
    pub channels: u16,

    /// Unknown for streams that do not declare a frame count
    pub duration: Option<Duration>,
}

/// Probe `path` and check a decoder exists for its default track
pub fn probe(path: &Path) -> Result<AudioInfo> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| DriverError::Probe(format!("{}: {}", path.display(), e)))?;

    let track = probed
        .format
        .default_track()
        .ok_or_else(|| DriverError::Probe(format!("{}: no audio tracks", path.display())))?;

    symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| DriverError::Probe(format!("{}: {}", path.display(), e)))?;

    let sample_rate = track.codec_params.sample_rate.unwrap_or(44100);
    let channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(2) as u16;
    let duration = track
        .codec_params
        .n_frames
        .map(|frames| Duration::from_secs_f64(frames as f64 / sample_rate as f64));

    Ok(AudioInfo {
        sample_rate,
        channels,
        duration,
    })
}

#[derive(Debug)]
struct LoadedSong {
    path: PathBuf,
    info: AudioInfo,
    position: Duration,
}

/// Audio output without a device
///
/// `open` succeeds only for files Symphonia can decode. Playback position
/// advances through [`HeadlessOutput::advance`]; a non-looping song stops
/// at its end.
#[derive(Debug)]
pub struct HeadlessOutput {
    label: &'static str,
    song: Option<LoadedSong>,
    status: PlayStatus,
    volume: f32,
    looping: bool,
}

impl HeadlessOutput {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            song: None,
            status: PlayStatus::Stopped,
            volume: 100.0,
            looping: false,
        }
    }

    /// Path of the open song
    pub fn path(&self) -> Option<&Path> {
        self.song.as_ref().map(|song| song.path.as_path())
    }

    /// Playback position in the open song
    pub fn position(&self) -> Duration {
        self.song
            .as_ref()
            .map(|song| song.position)
            .unwrap_or_default()
    }

    /// Check if the open song restarts at its end
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Move the playback position forward by `dt` while playing
    pub fn advance(&mut self, dt: Duration) {
        if self.status != PlayStatus::Playing {
            return;
        }
        let Some(song) = self.song.as_mut() else {
            return;
        };

        song.position += dt;

        let Some(length) = song.info.duration.filter(|d| !d.is_zero()) else {
            return;
        };
        if song.position < length {
            return;
        }

        if self.looping {
            song.position = Duration::from_nanos(
                (song.position.as_nanos() % length.as_nanos()) as u64,
            );
        } else {
            song.position = Duration::ZERO;
            self.status = PlayStatus::Stopped;
            tracing::info!("[{}] {} reached its end", self.label, song.path.display());
        }
    }
}

impl AudioOutput for HeadlessOutput {
    fn open(&mut self, path: &Path) -> bool {
        // Whatever was open is released first
        self.song = None;
        self.status = PlayStatus::Stopped;

        match probe(path) {
            Ok(info) => {
                tracing::debug!(
                    sample_rate = info.sample_rate,
                    channels = info.channels,
                    duration = ?info.duration,
                    "[{}] Opened {}",
                    self.label,
                    path.display()
                );
                self.song = Some(LoadedSong {
                    path: path.to_path_buf(),
                    info,
                    position: Duration::ZERO,
                });
                true
            }
            Err(e) => {
                tracing::warn!("[{}] {}", self.label, e);
                false
            }
        }
    }

    fn play(&mut self) {
        if self.song.is_some() {
            self.status = PlayStatus::Playing;
        }
    }

    fn stop(&mut self) {
        if let Some(song) = self.song.as_mut() {
            song.position = Duration::ZERO;
        }
        self.status = PlayStatus::Stopped;
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn status(&self) -> PlayStatus {
        self.status
    }
}
