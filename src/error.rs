//! Error handling for wavcreate
//!
//! The rendering core only fails on inputs it cannot represent in the
//! container. Everything else here belongs to the input loaders and the CLI.

use thiserror::Error;

/// Result type alias for wavcreate operations
pub type Result<T> = std::result::Result<T, WavError>;

/// Main error type for wavcreate operations
#[derive(Error, Debug)]
pub enum WavError {
    // Rendering Errors
    #[error("Invalid total duration: {total_secs}s at {sample_rate} Hz does not fit a WAV file")]
    InvalidDuration { total_secs: f32, sample_rate: u32 },

    #[error("Invalid sample rate: {sample_rate} Hz")]
    InvalidSampleRate { sample_rate: u32 },

    #[error("Invalid note: {reason}")]
    InvalidNote { reason: String },

    // Container Errors
    #[error("Invalid WAV container: {reason}")]
    InvalidContainer { reason: String },

    // Input Errors
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Unsupported input format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Failed to parse MIDI file {path}: {source}")]
    MidiParse {
        path: String,
        #[source]
        source: midly::Error,
    },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WavError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            WavError::InvalidDuration { .. } => "INVALID_DURATION",
            WavError::InvalidSampleRate { .. } => "INVALID_SAMPLE_RATE",
            WavError::InvalidNote { .. } => "INVALID_NOTE",
            WavError::InvalidContainer { .. } => "INVALID_CONTAINER",
            WavError::FileNotFound { .. } => "FILE_NOT_FOUND",
            WavError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            WavError::MidiParse { .. } => "MIDI_PARSE_ERROR",
            WavError::Io(_) => "IO_ERROR",
            WavError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::InvalidDuration { .. } => "Shorten the song or lower the sample rate",
            Self::InvalidSampleRate { .. } => "Use a sample rate such as 44100 or 48000",
            Self::InvalidNote { .. } => {
                "Notes need a non-negative start and duration and a positive frequency"
            }
            Self::InvalidContainer { .. } => {
                "Only mono 16-bit PCM files written by wavcreate are supported"
            }
            Self::FileNotFound { .. } => "Check the file path is correct",
            Self::UnsupportedFormat { .. } => "Use a .mid, .midi or .json note file",
            Self::MidiParse { .. } => {
                "The file may be corrupted - try re-exporting it from your editor"
            }
            _ => "Check the error details and try again",
        }
    }
}
