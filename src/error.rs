//! Error types for lecnotes.

use thiserror::Error;

use crate::session::WorkflowState;

#[derive(Error, Debug)]
pub enum LecnotesError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Audio decoding errors
    #[error("Unsupported audio format: {message}")]
    AudioFormatUnsupported { message: String },

    #[error("Audio decode failed: {message}")]
    AudioDecode { message: String },

    // Transcription errors
    #[error("Transcription model not found at {path}")]
    TranscriptionModelNotFound { path: String },

    #[error("Transcription inference failed: {message}")]
    TranscriptionInferenceFailed { message: String },

    #[error("Transcription error: {message}")]
    Transcription { message: String },

    // Text generation errors
    #[error("Generation model {name} failed to load: {message}")]
    GenerationModelLoad { name: String, message: String },

    #[error("Text generation failed: {message}")]
    Generation { message: String },

    // Session workflow misuse
    #[error("Invalid transition: cannot {operation} while session is {state}")]
    InvalidTransition {
        state: WorkflowState,
        operation: &'static str,
    },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, LecnotesError>;
