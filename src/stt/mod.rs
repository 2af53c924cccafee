//! Speech-to-text: transcriber trait, whisper implementation, and the
//! adapter that folds engine faults into transcript data.

pub mod adapter;
pub mod transcriber;
pub mod whisper;

pub use adapter::{TranscriptResult, TranscriptionAdapter};
pub use transcriber::{MockTranscriber, Transcriber};
pub use whisper::{WhisperConfig, WhisperTranscriber};
