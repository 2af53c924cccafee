//! lecnotes - Lecture recordings to study notes
//!
//! Offline-first pipeline: transcribe a recording, summarize it, and turn
//! its meatiest sentences into question/answer flashcards.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod generate;
pub mod models;
pub mod session;
pub mod stt;
pub mod synthesis;

// Core traits (audio → transcript → study material)
pub use generate::{DecodeOptions, DecodeStrategy, TextGenerator};
pub use stt::transcriber::Transcriber;

// Session workflow and pipeline
pub use audio::AudioArtifact;
pub use session::{StudySession, WorkflowState};
pub use stt::adapter::{TranscriptResult, TranscriptionAdapter};
pub use synthesis::{Flashcard, Orchestrator, StudyMaterials};

// Model wiring
pub use models::ModelRegistry;

// Error handling
pub use error::{LecnotesError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
