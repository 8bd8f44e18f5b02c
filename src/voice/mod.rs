//! Voice input and output
//!
//! Microphone capture with energy endpointing feeds STT; replies go through
//! TTS to the speakers. These are the spoken counterparts of the console
//! collaborators.

mod capture;
mod endpoint;
mod listener;
mod playback;
mod speaker;
mod stt;
mod tts;

pub use capture::{AudioCapture, SAMPLE_RATE, samples_to_wav};
pub use endpoint::{EndpointState, Endpointer};
pub use listener::VoiceInput;
pub use playback::AudioPlayback;
pub use speaker::VoiceOutput;
pub use stt::{SpeechToText, SttProvider};
pub use tts::{TextToSpeech, TtsProvider};
