//! Utterance endpointing
//!
//! Splits the microphone stream into utterances with an RMS energy gate:
//! an utterance starts at the first loud chunk and ends after enough
//! trailing silence.

use super::capture::SAMPLE_RATE;

/// Minimum RMS energy considered speech
const ENERGY_THRESHOLD: f32 = 0.03;

/// Shortest utterance worth transcribing (0.3s)
const MIN_SPEECH_SAMPLES: usize = SAMPLE_RATE as usize * 3 / 10;

/// Trailing silence that ends an utterance (0.8s)
const END_SILENCE_SAMPLES: usize = SAMPLE_RATE as usize * 8 / 10;

/// Endpointer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointState {
    /// Waiting for speech to begin
    Waiting,
    /// Speech started, accumulating
    Speaking,
}

/// Accumulates audio until a complete utterance is heard
#[derive(Debug)]
pub struct Endpointer {
    state: EndpointState,
    speech: Vec<f32>,
    voiced_samples: usize,
    silence_samples: usize,
}

impl Default for Endpointer {
    fn default() -> Self {
        Self::new()
    }
}

impl Endpointer {
    /// Create an endpointer waiting for speech
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: EndpointState::Waiting,
            speech: Vec::new(),
            voiced_samples: 0,
            silence_samples: 0,
        }
    }

    /// Feed a chunk of samples
    ///
    /// Returns the utterance once speech has been followed by enough silence.
    /// Bursts shorter than the minimum are discarded.
    pub fn push(&mut self, chunk: &[f32]) -> Option<Vec<f32>> {
        let is_speech = rms(chunk) > ENERGY_THRESHOLD;

        match self.state {
            EndpointState::Waiting => {
                if is_speech {
                    tracing::trace!("speech started");
                    self.state = EndpointState::Speaking;
                    self.speech.extend_from_slice(chunk);
                    self.voiced_samples = chunk.len();
                    self.silence_samples = 0;
                }
                None
            }
            EndpointState::Speaking => {
                self.speech.extend_from_slice(chunk);
                if is_speech {
                    self.voiced_samples += chunk.len();
                    self.silence_samples = 0;
                } else {
                    self.silence_samples += chunk.len();
                }

                if self.silence_samples <= END_SILENCE_SAMPLES {
                    return None;
                }

                if self.voiced_samples < MIN_SPEECH_SAMPLES {
                    tracing::trace!(voiced = self.voiced_samples, "burst too short, discarding");
                    self.reset();
                    return None;
                }

                let utterance = std::mem::take(&mut self.speech);
                tracing::debug!(samples = utterance.len(), "utterance complete");
                self.reset();
                Some(utterance)
            }
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> EndpointState {
        self.state
    }

    /// Discard anything accumulated
    pub fn reset(&mut self) {
        self.state = EndpointState::Waiting;
        self.speech.clear();
        self.voiced_samples = 0;
        self.silence_samples = 0;
    }
}

/// RMS energy of a chunk
#[allow(clippy::cast_precision_loss)]
fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rms() {
        assert!(rms(&[0.0; 100]) < 0.001);
        assert!(rms(&[0.5; 100]) > 0.4);
        assert!(rms(&[]) < f32::EPSILON);
    }

    #[test]
    fn test_silence_stays_waiting() {
        let mut endpointer = Endpointer::new();
        assert!(endpointer.push(&[0.0; 1600]).is_none());
        assert_eq!(endpointer.state(), EndpointState::Waiting);
    }

    #[test]
    fn test_speech_then_silence_completes() {
        let mut endpointer = Endpointer::new();
        let loud = vec![0.3; 1600];
        let quiet = vec![0.0; 1600];

        for _ in 0..5 {
            assert!(endpointer.push(&loud).is_none());
        }
        assert_eq!(endpointer.state(), EndpointState::Speaking);

        let mut utterance = None;
        for _ in 0..10 {
            if let Some(done) = endpointer.push(&quiet) {
                utterance = Some(done);
                break;
            }
        }

        let utterance = utterance.unwrap();
        assert!(utterance.len() >= 5 * 1600);
        assert_eq!(endpointer.state(), EndpointState::Waiting);
    }

    #[test]
    fn test_short_burst_discarded() {
        let mut endpointer = Endpointer::new();
        endpointer.push(&[0.3; 800]);

        for _ in 0..10 {
            assert!(endpointer.push(&[0.0; 1600]).is_none());
        }
        assert_eq!(endpointer.state(), EndpointState::Waiting);
    }
}
