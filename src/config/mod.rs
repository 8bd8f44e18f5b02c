//! Configuration management for Dinebell

pub mod file;

use std::collections::BTreeMap;
use std::time::Duration;

use crate::discovery::{DEFAULT_SELECTOR, ScrapeDiscovery};
use crate::menu::StaticMenu;
use crate::voice::{SpeechToText, SttProvider, TextToSpeech, TtsProvider};
use crate::{Error, Result};

use self::file::DinebellConfigFile;

/// Listing page scraped when discovery is enabled without a URL
pub const DEFAULT_LISTING_URL: &str = "https://www.zomato.com/";

/// Dinebell configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Voice configuration
    pub voice: VoiceConfig,

    /// API keys
    pub api_keys: ApiKeys,

    /// Restaurant discovery configuration
    pub discovery: DiscoveryConfig,

    /// Menu overrides from the config file, keyed by restaurant
    pub menus: BTreeMap<String, Vec<String>>,
}

/// Voice processing configuration
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// Use the microphone and speakers
    pub enabled: bool,

    pub stt_provider: SttProvider,

    /// STT model (e.g. "whisper-1", "nova-2")
    pub stt_model: String,

    pub tts_provider: TtsProvider,

    /// TTS model (e.g. "tts-1", "eleven_monolingual_v1")
    pub tts_model: String,

    /// TTS voice name (`OpenAI`) or voice id (`ElevenLabs`)
    pub tts_voice: String,

    /// TTS speed multiplier (0.25 to 4.0)
    pub tts_speed: f32,

    /// How long one listen waits for speech
    pub listen_timeout: Duration,
}

/// API keys for speech services
#[derive(Clone, Default)]
pub struct ApiKeys {
    pub openai: Option<String>,
    pub deepgram: Option<String>,
    pub elevenlabs: Option<String>,
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeys")
            .field("openai", &self.openai.as_ref().map(|_| "<redacted>"))
            .field("deepgram", &self.deepgram.as_ref().map(|_| "<redacted>"))
            .field("elevenlabs", &self.elevenlabs.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Restaurant discovery configuration
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Scrape `url` instead of using the built-in list
    pub scrape: bool,

    pub url: String,

    pub selector: String,
}

impl Config {
    /// Load configuration from environment and the config file
    ///
    /// Environment variables take precedence over the file, which takes
    /// precedence over defaults.
    #[must_use]
    pub fn load() -> Self {
        Self::from_sources(file::load_config_file(), |key| std::env::var(key).ok())
    }

    /// Build configuration from a parsed file and an environment lookup
    #[must_use]
    pub fn from_sources(fc: DinebellConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let api_keys = ApiKeys {
            openai: env("OPENAI_API_KEY").or(fc.api_keys.openai),
            deepgram: env("DEEPGRAM_API_KEY").or(fc.api_keys.deepgram),
            elevenlabs: env("ELEVENLABS_API_KEY").or(fc.api_keys.elevenlabs),
        };

        let stt_provider = fc.voice.stt_provider.unwrap_or_default();
        let tts_provider = fc.voice.tts_provider.unwrap_or_default();

        let voice = VoiceConfig {
            enabled: fc.voice.enabled.unwrap_or(true),
            stt_provider,
            stt_model: env("DINEBELL_STT_MODEL")
                .or(fc.voice.stt_model)
                .unwrap_or_else(|| default_stt_model(stt_provider).to_string()),
            tts_provider,
            tts_model: env("DINEBELL_TTS_MODEL")
                .or(fc.voice.tts_model)
                .unwrap_or_else(|| default_tts_model(tts_provider).to_string()),
            tts_voice: env("DINEBELL_TTS_VOICE")
                .or(fc.voice.tts_voice)
                .unwrap_or_else(|| default_tts_voice(tts_provider).to_string()),
            tts_speed: fc.voice.tts_speed.unwrap_or(1.0).clamp(0.25, 4.0),
            listen_timeout: Duration::from_secs(fc.voice.listen_timeout_secs.unwrap_or(10)),
        };

        let discovery_url = env("DINEBELL_DISCOVERY_URL");
        let discovery = DiscoveryConfig {
            // An explicit URL from the environment implies scraping
            scrape: discovery_url.is_some() || fc.discovery.scrape.unwrap_or(false),
            url: discovery_url
                .or(fc.discovery.url)
                .unwrap_or_else(|| DEFAULT_LISTING_URL.to_string()),
            selector: fc
                .discovery
                .selector
                .unwrap_or_else(|| DEFAULT_SELECTOR.to_string()),
        };

        tracing::debug!(
            voice = voice.enabled,
            stt = ?voice.stt_provider,
            tts = ?voice.tts_provider,
            scrape = discovery.scrape,
            menus = fc.menus.len(),
            "configuration resolved"
        );

        Self {
            voice,
            api_keys,
            discovery,
            menus: fc.menus,
        }
    }

    /// Default menus with file overrides applied
    #[must_use]
    pub fn menu_directory(&self) -> StaticMenu {
        self.menus
            .iter()
            .fold(StaticMenu::default(), |menu, (restaurant, items)| {
                menu.with_menu(restaurant, items.clone())
            })
    }

    /// Build the configured transcriber
    ///
    /// # Errors
    ///
    /// Returns error if the provider's API key is not set
    pub fn speech_to_text(&self) -> Result<SpeechToText> {
        let key = match self.voice.stt_provider {
            SttProvider::Whisper => self.api_keys.openai.clone(),
            SttProvider::Deepgram => self.api_keys.deepgram.clone(),
        };
        let key = key.ok_or_else(|| {
            Error::Config(format!(
                "no API key for {:?} STT; set it in [api_keys] or the environment",
                self.voice.stt_provider
            ))
        })?;

        SpeechToText::new(self.voice.stt_provider, key, self.voice.stt_model.clone())
    }

    /// Build the configured synthesizer
    ///
    /// # Errors
    ///
    /// Returns error if the provider's API key is not set
    pub fn text_to_speech(&self) -> Result<TextToSpeech> {
        let key = match self.voice.tts_provider {
            TtsProvider::OpenAI => self.api_keys.openai.clone(),
            TtsProvider::ElevenLabs => self.api_keys.elevenlabs.clone(),
        };
        let key = key.ok_or_else(|| {
            Error::Config(format!(
                "no API key for {:?} TTS; set it in [api_keys] or the environment",
                self.voice.tts_provider
            ))
        })?;

        TextToSpeech::new(
            self.voice.tts_provider,
            key,
            self.voice.tts_voice.clone(),
            self.voice.tts_model.clone(),
            self.voice.tts_speed,
        )
    }

    /// Build the listing page scraper
    ///
    /// # Errors
    ///
    /// Returns error if the URL or selector is invalid
    pub fn scrape_discovery(&self) -> Result<ScrapeDiscovery> {
        ScrapeDiscovery::new(&self.discovery.url, &self.discovery.selector)
    }
}

const fn default_stt_model(provider: SttProvider) -> &'static str {
    match provider {
        SttProvider::Whisper => "whisper-1",
        SttProvider::Deepgram => "nova-2",
    }
}

const fn default_tts_model(provider: TtsProvider) -> &'static str {
    match provider {
        TtsProvider::OpenAI => "tts-1",
        TtsProvider::ElevenLabs => "eleven_monolingual_v1",
    }
}

const fn default_tts_voice(provider: TtsProvider) -> &'static str {
    match provider {
        TtsProvider::OpenAI => "alloy",
        // "Rachel"
        TtsProvider::ElevenLabs => "21m00Tcm4TlvDq8ikWAM",
    }
}
