/// Driver configuration
use crate::error::{DriverError, Result};
use serde::{Deserialize, Serialize};
use soul_bgm::{MusicId, PlayerConfig};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "soul-bgm.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DriverConfig {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default = "default_driver")]
    pub driver: DriverSettings,

    /// Track identifier to file path
    ///
    /// Keys read from files arrive lowercased; use [`track_key`] to match
    /// them against other names.
    #[serde(default = "default_tracks")]
    pub tracks: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DriverSettings {
    /// Simulated frames per second
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Sleep between frames so the script runs in wall-clock time
    #[serde(default)]
    pub realtime: bool,
}

impl DriverConfig {
    /// Load configuration from file and environment
    ///
    /// Uses `path` when given (it must exist), otherwise `soul-bgm.toml` in
    /// the working directory if present. Environment variables prefixed
    /// with `SOUL_BGM_` override both, sections separated by `__`
    /// (e.g. `SOUL_BGM_PLAYER__MAX_VOLUME=80`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("SOUL_BGM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?.try_deserialize::<DriverConfig>()?;
        tracing::debug!(?config, "Loaded driver configuration");
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.driver.frame_rate == 0 {
            return Err(DriverError::Config(
                "Frame rate must be at least 1".to_string(),
            ));
        }

        if !self.player.max_volume.is_finite() || self.player.max_volume < 0.0 {
            return Err(DriverError::Config(format!(
                "Max volume must be a non-negative number, got {}",
                self.player.max_volume
            )));
        }

        if !self.player.fade_seconds.is_finite() || self.player.fade_seconds < 0.0 {
            return Err(DriverError::Config(format!(
                "Fade duration must be a non-negative number of seconds, got {}",
                self.player.fade_seconds
            )));
        }

        if self.tracks.is_empty() {
            return Err(DriverError::Config(
                "At least one track must be configured under [tracks]".to_string(),
            ));
        }

        Ok(())
    }

    /// Simulated time per frame
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / self.driver.frame_rate.max(1)
    }
}

// Default values
fn default_driver() -> DriverSettings {
    DriverSettings {
        frame_rate: default_frame_rate(),
        realtime: false,
    }
}

fn default_frame_rate() -> u32 {
    60
}

fn default_tracks() -> BTreeMap<String, PathBuf> {
    MusicId::default_bindings()
        .map(|(id, path)| (track_name(id), path))
        .collect()
}

/// Lookup key for a track name
///
/// Track names are case-insensitive since the config loader lowercases keys.
pub fn track_key(name: &str) -> String {
    name.to_lowercase()
}

/// Config name of a shipped song
pub fn track_name(id: MusicId) -> String {
    match id {
        MusicId::TitleScreen => "title_screen".to_string(),
        MusicId::Game => "game".to_string(),
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            driver: default_driver(),
            tracks: default_tracks(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_shipped_catalog() {
        let config = DriverConfig::default();

        assert_eq!(config.driver.frame_rate, 60);
        assert!(!config.driver.realtime);
        assert_eq!(config.tracks["title_screen"], PathBuf::from("snd/title.ogg"));
        assert_eq!(config.tracks["game"], PathBuf::from("snd/gamesong.ogg"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn frame_time_follows_frame_rate() {
        let mut config = DriverConfig::default();
        config.driver.frame_rate = 50;

        assert_eq!(config.frame_time(), Duration::from_millis(20));
    }

    #[test]
    fn load_from_file_keeps_unset_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[player]\nmax_volume = 75.0\n\n[tracks]\nboss = \"snd/boss.ogg\""
        )
        .unwrap();

        let config = DriverConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.player.max_volume, 75.0);
        assert_eq!(config.player.fade_seconds, 2.0);
        assert!(config.player.fading);
        assert_eq!(config.driver.frame_rate, 60);
        assert_eq!(config.tracks.len(), 1);
        assert_eq!(config.tracks["boss"], PathBuf::from("snd/boss.ogg"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = DriverConfig::load(Some(&dir.path().join("absent.toml")));

        assert!(matches!(result, Err(DriverError::Config(_))));
    }

    #[test]
    fn file_track_keys_arrive_lowercased() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[tracks]\nBossTheme = \"snd/boss.ogg\"").unwrap();

        let config = DriverConfig::load(Some(file.path())).unwrap();

        let key = track_key("BossTheme");
        assert_eq!(key, "bosstheme");
        assert_eq!(config.tracks[&key], PathBuf::from("snd/boss.ogg"));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = DriverConfig::default();
        config.driver.frame_rate = 0;
        assert!(config.validate().is_err());

        let mut config = DriverConfig::default();
        config.player.max_volume = -1.0;
        assert!(config.validate().is_err());

        let mut config = DriverConfig::default();
        config.player.fade_seconds = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = DriverConfig::default();
        config.tracks.clear();
        assert!(config.validate().is_err());
    }
}
