//! Pipeline orchestrator: transcription first, then the synthesis fan-out.

use std::sync::Arc;

use tracing::{info, warn};

use crate::audio::AudioArtifact;
use crate::models::ModelRegistry;
use crate::stt::adapter::{TranscriptResult, TranscriptionAdapter};
use crate::synthesis::flashcards::{Flashcard, generate_flashcards};
use crate::synthesis::segmenter::segment_and_filter;
use crate::synthesis::summarizer::summarize;

/// Everything the pipeline produced for one artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyMaterials {
    pub transcript: TranscriptResult,
    /// Present only when transcription succeeded and the summarizer ran.
    pub summary: Option<String>,
    /// Empty when transcription failed or no sentence qualified.
    pub flashcards: Vec<Flashcard>,
}

/// Sequences transcription, sentence selection, summarization, and
/// flashcard generation over one artifact.
pub struct Orchestrator {
    registry: Arc<ModelRegistry>,
}

impl Orchestrator {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    /// Run the full pipeline for one artifact.
    ///
    /// Transcription runs first; if it fails, the result carries the failed
    /// transcript with no summary and no flashcards, and neither generator
    /// is invoked. On success, summarization sees the full transcript text
    /// while flashcard generation sees only the filtered candidates; the
    /// two do not depend on each other.
    pub fn process(&self, artifact: &AudioArtifact) -> StudyMaterials {
        let adapter = TranscriptionAdapter::new(self.registry.transcriber());
        let transcript = adapter.transcribe(artifact);

        let text = match &transcript {
            TranscriptResult::Ok { text } => text.clone(),
            TranscriptResult::Failed { reason } => {
                info!(
                    file = artifact.file_name(),
                    reason = %reason,
                    "transcription failed, skipping synthesis"
                );
                return StudyMaterials {
                    transcript,
                    summary: None,
                    flashcards: Vec::new(),
                };
            }
        };

        let candidates = segment_and_filter(&text);
        info!(
            file = artifact.file_name(),
            candidates = candidates.len(),
            "transcript segmented"
        );

        // Summarization faults are captured as a missing summary rather
        // than failing the whole pipeline
        let summary = match summarize(self.registry.summarizer(), &text) {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!(error = %e, "summarization failed");
                None
            }
        };

        let flashcards = generate_flashcards(self.registry.question_gen(), &candidates);

        StudyMaterials {
            transcript,
            summary,
            flashcards,
        }
    }
}
