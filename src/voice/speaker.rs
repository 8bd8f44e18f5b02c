//! Spoken output: synthesis and playback

use async_trait::async_trait;

use super::playback::AudioPlayback;
use super::tts::TextToSpeech;
use crate::Result;
use crate::turn::SpeechOutput;

/// Prints each reply and speaks it aloud
pub struct VoiceOutput {
    tts: TextToSpeech,
    playback: AudioPlayback,
}

impl VoiceOutput {
    /// Create a speaker
    #[must_use]
    pub const fn new(tts: TextToSpeech, playback: AudioPlayback) -> Self {
        Self { tts, playback }
    }
}

#[async_trait(?Send)]
impl SpeechOutput for VoiceOutput {
    async fn say(&mut self, text: &str) -> Result<()> {
        println!("System: {text}");
        tracing::debug!(text, "speaking");

        let audio = self.tts.synthesize(text).await?;
        self.playback.play_mp3(&audio)
    }
}
