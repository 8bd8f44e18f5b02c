//! Error types for Dinebell

use thiserror::Error;

/// Result type alias for Dinebell operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Dinebell
///
/// None of these reach the user directly; the turn loop reports problems
/// through ordinary replies and keeps going.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Audio device or encoding error
    #[error("audio error: {0}")]
    Audio(String),

    /// Speech-to-text error
    #[error("STT error: {0}")]
    Stt(String),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// Restaurant discovery error
    #[error("discovery error: {0}")]
    Discovery(String),

    /// A checkout is already awaiting confirmation
    #[error("a checkout is already awaiting confirmation")]
    CheckoutPending,

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
