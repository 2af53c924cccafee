//! Transcription adapter: one artifact in, one transcript result out.
//!
//! Engine faults never escape this boundary. Unsupported codecs, corrupt
//! payloads, and inference failures all come back as `TranscriptResult::Failed`
//! with a human-readable reason.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::audio::{AudioArtifact, decode_to_speech_samples};
use crate::stt::transcriber::Transcriber;

/// Outcome of transcribing one audio artifact.
///
/// Produced at most once per artifact and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptResult {
    /// Transcription succeeded with the given verbatim text.
    Ok { text: String },
    /// The engine or decoder failed; the reason is display-ready.
    Failed { reason: String },
}

impl TranscriptResult {
    /// Transcript text, if transcription succeeded.
    pub fn text(&self) -> Option<&str> {
        match self {
            TranscriptResult::Ok { text } => Some(text),
            TranscriptResult::Failed { .. } => None,
        }
    }

    /// Failure reason, if transcription failed.
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            TranscriptResult::Ok { .. } => None,
            TranscriptResult::Failed { reason } => Some(reason),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TranscriptResult::Failed { .. })
    }
}

/// Wraps a speech-to-text engine, normalizing output and faults into
/// [`TranscriptResult`].
pub struct TranscriptionAdapter {
    transcriber: Arc<dyn Transcriber>,
}

impl TranscriptionAdapter {
    pub fn new(transcriber: Arc<dyn Transcriber>) -> Self {
        Self { transcriber }
    }

    /// Transcribe one artifact.
    ///
    /// Invokes the engine at most once; no internal retry. The decoded
    /// sample buffer is scoped to this call and released on every path,
    /// including engine failure.
    pub fn transcribe(&self, artifact: &AudioArtifact) -> TranscriptResult {
        if !self.transcriber.is_ready() {
            return TranscriptResult::Failed {
                reason: format!(
                    "transcription engine '{}' is not ready",
                    self.transcriber.model_name()
                ),
            };
        }

        let samples = match decode_to_speech_samples(artifact.bytes(), artifact.mime_type()) {
            Ok(samples) => samples,
            Err(e) => {
                warn!(file = artifact.file_name(), error = %e, "audio decode failed");
                return TranscriptResult::Failed {
                    reason: e.to_string(),
                };
            }
        };

        debug!(
            file = artifact.file_name(),
            samples = samples.len(),
            model = self.transcriber.model_name(),
            "transcribing artifact"
        );

        match self.transcriber.transcribe(&samples) {
            Ok(text) => TranscriptResult::Ok { text },
            Err(e) => {
                warn!(file = artifact.file_name(), error = %e, "transcription failed");
                TranscriptResult::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Name of the underlying engine's model.
    pub fn model_name(&self) -> &str {
        self.transcriber.model_name()
    }
}
