//! Spoken input: microphone capture, endpointing, transcription

use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::capture::{AudioCapture, SAMPLE_RATE, samples_to_wav};
use super::endpoint::Endpointer;
use super::stt::SpeechToText;
use crate::turn::{ListenError, SpeechInput};

/// Audio is polled in 100ms chunks
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Listens on the microphone and transcribes one utterance per call
pub struct VoiceInput {
    capture: AudioCapture,
    endpointer: Endpointer,
    stt: SpeechToText,
    listen_timeout: Duration,
}

impl VoiceInput {
    /// Create a listener
    ///
    /// `listen_timeout` bounds how long a single `listen` waits for speech.
    #[must_use]
    pub fn new(capture: AudioCapture, stt: SpeechToText, listen_timeout: Duration) -> Self {
        Self {
            capture,
            endpointer: Endpointer::new(),
            stt,
            listen_timeout,
        }
    }

    async fn record_utterance(&mut self) -> Result<Vec<f32>, ListenError> {
        self.capture.start().map_err(|e| {
            tracing::error!(error = %e, "failed to start audio capture");
            ListenError::ServiceUnavailable
        })?;
        // Ignore anything captured while we were speaking
        self.capture.clear_buffer();
        self.endpointer.reset();

        let started = Instant::now();
        loop {
            tokio::time::sleep(POLL_INTERVAL).await;

            let chunk = self.capture.take_buffer();
            if let Some(utterance) = self.endpointer.push(&chunk) {
                return Ok(utterance);
            }

            if started.elapsed() > self.listen_timeout {
                tracing::debug!("no speech before timeout");
                return Err(ListenError::Unintelligible);
            }
        }
    }
}

#[async_trait(?Send)]
impl SpeechInput for VoiceInput {
    async fn listen(&mut self) -> Result<String, ListenError> {
        println!("Listening...");

        let samples = self.record_utterance().await;
        self.capture.stop();
        let samples = samples?;

        let wav = samples_to_wav(&samples, SAMPLE_RATE).map_err(|e| {
            tracing::warn!(error = %e, "failed to encode utterance");
            ListenError::Unintelligible
        })?;

        let transcript = self.stt.transcribe(&wav).await.map_err(|e| {
            tracing::warn!(error = %e, "STT failed");
            ListenError::ServiceUnavailable
        })?;

        let command = transcript.trim().to_lowercase();
        if command.is_empty() {
            return Err(ListenError::Unintelligible);
        }

        println!("User: {command}");
        Ok(command)
    }
}
