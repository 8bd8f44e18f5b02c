//! TOML configuration file loading
//!
//! Supports `~/.config/dinebell/config.toml` as a persistent config source.
//! All fields are optional; the file is a partial overlay on top of defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::voice::{SttProvider, TtsProvider};

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct DinebellConfigFile {
    /// Voice/audio configuration
    #[serde(default)]
    pub voice: VoiceFileConfig,

    /// API keys for speech services
    #[serde(default)]
    pub api_keys: ApiKeysFileConfig,

    /// Nearby restaurant lookup
    #[serde(default)]
    pub discovery: DiscoveryFileConfig,

    /// Menu overrides, keyed by restaurant name
    #[serde(default)]
    pub menus: BTreeMap<String, Vec<String>>,
}

/// Voice processing configuration
#[derive(Debug, Default, Deserialize)]
pub struct VoiceFileConfig {
    /// Use the microphone and speakers instead of the console
    pub enabled: Option<bool>,

    pub stt_provider: Option<SttProvider>,

    /// STT model (e.g. "whisper-1", "nova-2")
    pub stt_model: Option<String>,

    pub tts_provider: Option<TtsProvider>,

    /// TTS model (e.g. "tts-1")
    pub tts_model: Option<String>,

    /// TTS voice name or id (e.g. "alloy")
    pub tts_voice: Option<String>,

    /// TTS speed multiplier
    pub tts_speed: Option<f32>,

    /// Seconds to wait for speech before giving up on a turn
    pub listen_timeout_secs: Option<u64>,
}

/// API keys configuration
#[derive(Debug, Default, Deserialize)]
pub struct ApiKeysFileConfig {
    pub openai: Option<String>,
    pub deepgram: Option<String>,
    pub elevenlabs: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DiscoveryFileConfig {
    /// Scrape a listing page instead of the built-in list
    pub scrape: Option<bool>,

    /// Listing page URL
    pub url: Option<String>,

    /// CSS selector for restaurant names
    pub selector: Option<String>,
}

/// Load the TOML config file from the standard path
///
/// Returns `DinebellConfigFile::default()` if the file doesn't exist or can't be parsed.
#[must_use]
pub fn load_config_file() -> DinebellConfigFile {
    config_file_path().map_or_else(DinebellConfigFile::default, |path| load_from_path(&path))
}

/// Load a TOML config file from an explicit path
///
/// Missing, unreadable and malformed files all fall back to defaults.
#[must_use]
pub fn load_from_path(path: &Path) -> DinebellConfigFile {
    if !path.exists() {
        return DinebellConfigFile::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                DinebellConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            DinebellConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/dinebell/config.toml`
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("dinebell").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let fc = load_from_path(&dir.path().join("config.toml"));
        assert!(fc.voice.enabled.is_none());
        assert!(fc.menus.is_empty());
    }

    #[test]
    fn test_parse_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[voice]
enabled = false
stt_provider = "deepgram"
tts_provider = "elevenlabs"
tts_speed = 1.25

[api_keys]
deepgram = "dg-key"

[discovery]
scrape = true
url = "https://listings.example.com/"

[menus]
empire = ["Mutton Biryani"]
"#
        )
        .unwrap();

        let fc = load_from_path(file.path());
        assert_eq!(fc.voice.enabled, Some(false));
        assert_eq!(fc.voice.stt_provider, Some(SttProvider::Deepgram));
        assert_eq!(fc.voice.tts_provider, Some(TtsProvider::ElevenLabs));
        assert!(fc.voice.tts_speed.is_some_and(|s| (s - 1.25).abs() < f32::EPSILON));
        assert_eq!(fc.api_keys.deepgram.as_deref(), Some("dg-key"));
        assert_eq!(fc.discovery.scrape, Some(true));
        assert_eq!(fc.menus["empire"], vec!["Mutton Biryani".to_string()]);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[voice\nenabled = ").unwrap();

        let fc = load_from_path(file.path());
        assert!(fc.voice.enabled.is_none());
    }

    #[test]
    fn test_config_file_path_suffix() {
        if let Some(path) = config_file_path() {
            assert!(path.ends_with("dinebell/config.toml"));
        }
    }
}
