//! Error types for WAV file handling

use smoothloop_core::LoopError;
use thiserror::Error;

/// Result type for WAV file operations
pub type Result<T> = std::result::Result<T, WavError>;

/// Errors that can occur while reading or writing WAV files
#[derive(Error, Debug)]
pub enum WavError {
    /// Underlying file error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// WAV decoding or encoding error
    #[error("WAV error: {0}")]
    Hound(#[from] hound::Error),

    /// Sample data rejected by the loop core
    #[error(transparent)]
    Core(#[from] LoopError),

    /// WAV variant the loop core can't process
    #[error("Unsupported WAV format: {0}")]
    UnsupportedFormat(String),

    /// File that isn't a well-formed RIFF/WAVE container
    #[error("Malformed WAV file: {0}")]
    Malformed(String),
}
