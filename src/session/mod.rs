//! Study session workflow: one recording at a time, from capture to notes.
//!
//! The session is a plain value owned by the caller. Every transition is
//! synchronous and fully settled when the call returns; there are no
//! background timers or deferred state changes.

use std::fmt;

use tracing::info;

use crate::audio::AudioArtifact;
use crate::error::{LecnotesError, Result};
use crate::stt::adapter::TranscriptResult;
use crate::synthesis::flashcards::Flashcard;
use crate::synthesis::orchestrator::Orchestrator;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// No recording accepted yet.
    Idle,
    /// A recording is held, processing not started.
    Captured,
    /// The speech-to-text engine is running.
    Transcribing,
    /// Transcript ready, summary and flashcards being generated.
    Synthesizing,
    /// All study material is available.
    Complete,
    /// Transcription failed; only the failure reason is available.
    Errored,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowState::Idle => "Idle",
            WorkflowState::Captured => "Captured",
            WorkflowState::Transcribing => "Transcribing",
            WorkflowState::Synthesizing => "Synthesizing",
            WorkflowState::Complete => "Complete",
            WorkflowState::Errored => "Errored",
        };
        f.write_str(name)
    }
}

/// One recording's study session: the artifact, its derived material, and
/// the workflow state tag.
///
/// Holds an artifact exactly when the state is not [`WorkflowState::Idle`];
/// summary and flashcards exist only when the transcript came back Ok.
#[derive(Debug, Default)]
pub struct StudySession {
    state: SessionState,
}

/// Internal state representation keeping artifact presence tied to the tag.
#[derive(Debug, Default)]
enum SessionState {
    #[default]
    Idle,
    Captured {
        artifact: AudioArtifact,
    },
    Complete {
        artifact: AudioArtifact,
        transcript: TranscriptResult,
        summary: Option<String>,
        flashcards: Vec<Flashcard>,
    },
    Errored {
        artifact: AudioArtifact,
        transcript: TranscriptResult,
    },
}

impl StudySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current workflow state tag.
    pub fn state(&self) -> WorkflowState {
        match &self.state {
            SessionState::Idle => WorkflowState::Idle,
            SessionState::Captured { .. } => WorkflowState::Captured,
            SessionState::Complete { .. } => WorkflowState::Complete,
            SessionState::Errored { .. } => WorkflowState::Errored,
        }
    }

    /// Accept a new recording.
    ///
    /// Legal only while Idle; any other state signals `InvalidTransition`
    /// and leaves the session untouched.
    pub fn accept(&mut self, artifact: AudioArtifact) -> Result<()> {
        match self.state {
            SessionState::Idle => {
                info!(file = artifact.file_name(), "recording accepted");
                self.state = SessionState::Captured { artifact };
                Ok(())
            }
            _ => Err(LecnotesError::InvalidTransition {
                state: self.state(),
                operation: "accept audio",
            }),
        }
    }

    /// Run the pipeline over the held recording.
    ///
    /// Legal only while Captured; a session already processing or finished
    /// signals `InvalidTransition`, so a duplicate trigger cannot restart
    /// the pipeline. Passes through Transcribing and Synthesizing while the
    /// orchestrator runs and settles in Complete or Errored before
    /// returning.
    pub fn begin_processing(&mut self, orchestrator: &Orchestrator) -> Result<()> {
        let artifact = match std::mem::take(&mut self.state) {
            SessionState::Captured { artifact } => artifact,
            other => {
                self.state = other;
                return Err(LecnotesError::InvalidTransition {
                    state: self.state(),
                    operation: "begin processing",
                });
            }
        };

        // Transcribing → Synthesizing happen inside this call; the caller
        // only ever observes the settled end state.
        let materials = orchestrator.process(&artifact);

        self.state = if materials.transcript.is_failed() {
            info!(file = artifact.file_name(), "session errored");
            SessionState::Errored {
                artifact,
                transcript: materials.transcript,
            }
        } else {
            info!(
                file = artifact.file_name(),
                flashcards = materials.flashcards.len(),
                "session complete"
            );
            SessionState::Complete {
                artifact,
                transcript: materials.transcript,
                summary: materials.summary,
                flashcards: materials.flashcards,
            }
        };

        Ok(())
    }

    /// Clear everything and return to Idle.
    ///
    /// Legal from any state and idempotent; resetting an Idle session is a
    /// no-op.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }

    /// The held recording, if any.
    pub fn artifact(&self) -> Option<&AudioArtifact> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Captured { artifact }
            | SessionState::Complete { artifact, .. }
            | SessionState::Errored { artifact, .. } => Some(artifact),
        }
    }

    /// Declared file name of the held recording.
    pub fn file_name(&self) -> Option<&str> {
        self.artifact().map(|a| a.file_name())
    }

    /// Raw audio bytes of the held recording, for download.
    pub fn audio_bytes(&self) -> Option<&[u8]> {
        self.artifact().map(|a| a.bytes())
    }

    /// The transcript result, once processing has run.
    pub fn transcript(&self) -> Option<&TranscriptResult> {
        match &self.state {
            SessionState::Complete { transcript, .. }
            | SessionState::Errored { transcript, .. } => Some(transcript),
            _ => None,
        }
    }

    /// The summary, when the session completed with one.
    pub fn summary(&self) -> Option<&str> {
        match &self.state {
            SessionState::Complete { summary, .. } => summary.as_deref(),
            _ => None,
        }
    }

    /// Generated flashcards, in generation order. Empty unless Complete.
    pub fn flashcards(&self) -> &[Flashcard] {
        match &self.state {
            SessionState::Complete { flashcards, .. } => flashcards,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::MockGenerator;
    use crate::models::ModelRegistry;
    use crate::stt::transcriber::MockTranscriber;
    use std::io::Cursor;
    use std::sync::Arc;

    fn wav_artifact() -> AudioArtifact {
        let mut cursor = Cursor::new(Vec::new());
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for _ in 0..1600 {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
        AudioArtifact::from_upload(cursor.into_inner(), "lecture.wav", "audio/wav")
    }

    fn orchestrator_with(transcriber: MockTranscriber) -> Orchestrator {
        let registry = ModelRegistry::new(
            Arc::new(transcriber),
            Box::new(MockGenerator::new("summarizer").with_response("summary")),
            Box::new(MockGenerator::new("qg").with_response("Q?")),
        );
        Orchestrator::new(Arc::new(registry))
    }

    const LONG_SENTENCE: &str = "The quick brown fox jumps over the lazy dog while the \
        lecturer explains recursion and dynamic programming to the students in detail today.";

    #[test]
    fn new_session_is_idle_and_empty() {
        let session = StudySession::new();
        assert_eq!(session.state(), WorkflowState::Idle);
        assert!(session.artifact().is_none());
        assert!(session.transcript().is_none());
        assert!(session.summary().is_none());
        assert!(session.flashcards().is_empty());
    }

    #[test]
    fn accept_moves_idle_to_captured() {
        let mut session = StudySession::new();
        session.accept(wav_artifact()).unwrap();

        assert_eq!(session.state(), WorkflowState::Captured);
        assert_eq!(session.file_name(), Some("lecture.wav"));
        assert!(session.audio_bytes().is_some());
    }

    #[test]
    fn accept_outside_idle_is_rejected_and_state_unchanged() {
        let mut session = StudySession::new();
        session.accept(wav_artifact()).unwrap();

        let result = session.accept(wav_artifact());
        match result {
            Err(LecnotesError::InvalidTransition { state, operation }) => {
                assert_eq!(state, WorkflowState::Captured);
                assert_eq!(operation, "accept audio");
            }
            other => panic!("expected InvalidTransition, got {:?}", other),
        }
        assert_eq!(session.state(), WorkflowState::Captured);
    }

    #[test]
    fn processing_success_ends_complete_with_material() {
        let mut session = StudySession::new();
        session.accept(wav_artifact()).unwrap();

        let orchestrator = orchestrator_with(
            MockTranscriber::new("stt").with_response(LONG_SENTENCE),
        );
        session.begin_processing(&orchestrator).unwrap();

        assert_eq!(session.state(), WorkflowState::Complete);
        assert_eq!(
            session.transcript().and_then(|t| t.text()),
            Some(LONG_SENTENCE)
        );
        assert_eq!(session.summary(), Some("summary"));
        assert_eq!(session.flashcards().len(), 1);
        assert_eq!(session.flashcards()[0].answer, LONG_SENTENCE);
        // The artifact is still available for download after processing
        assert_eq!(session.file_name(), Some("lecture.wav"));
    }

    #[test]
    fn processing_failure_ends_errored_without_material() {
        let mut session = StudySession::new();
        session.accept(wav_artifact()).unwrap();

        let orchestrator = orchestrator_with(MockTranscriber::new("stt").with_failure());
        session.begin_processing(&orchestrator).unwrap();

        assert_eq!(session.state(), WorkflowState::Errored);
        assert!(session.transcript().is_some_and(|t| t.is_failed()));
        assert!(
            session
                .transcript()
                .and_then(|t| t.failure_reason())
                .is_some()
        );
        assert!(session.summary().is_none());
        assert!(session.flashcards().is_empty());
    }

    #[test]
    fn begin_processing_requires_captured() {
        let orchestrator = orchestrator_with(MockTranscriber::new("stt"));

        let mut idle = StudySession::new();
        assert!(matches!(
            idle.begin_processing(&orchestrator),
            Err(LecnotesError::InvalidTransition { .. })
        ));

        // A completed session cannot be re-triggered
        let mut done = StudySession::new();
        done.accept(wav_artifact()).unwrap();
        done.begin_processing(&orchestrator).unwrap();
        assert!(matches!(
            done.begin_processing(&orchestrator),
            Err(LecnotesError::InvalidTransition { .. })
        ));
        assert_eq!(done.state(), WorkflowState::Complete);
    }

    #[test]
    fn reset_returns_to_pristine_idle_from_any_state() {
        let orchestrator = orchestrator_with(
            MockTranscriber::new("stt").with_response(LONG_SENTENCE),
        );

        // From Captured
        let mut session = StudySession::new();
        session.accept(wav_artifact()).unwrap();
        session.reset();
        assert_eq!(session.state(), WorkflowState::Idle);
        assert!(session.artifact().is_none());

        // From Complete
        session.accept(wav_artifact()).unwrap();
        session.begin_processing(&orchestrator).unwrap();
        session.reset();
        assert_eq!(session.state(), WorkflowState::Idle);
        assert!(session.transcript().is_none());
        assert!(session.summary().is_none());
        assert!(session.flashcards().is_empty());

        // From Errored
        let failing = orchestrator_with(MockTranscriber::new("stt").with_failure());
        session.accept(wav_artifact()).unwrap();
        session.begin_processing(&failing).unwrap();
        session.reset();
        assert_eq!(session.state(), WorkflowState::Idle);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut session = StudySession::new();
        session.accept(wav_artifact()).unwrap();

        session.reset();
        session.reset(); // second reset is a no-op
        assert_eq!(session.state(), WorkflowState::Idle);
        assert!(session.artifact().is_none());
    }

    #[test]
    fn session_can_be_reused_after_reset() {
        let orchestrator = orchestrator_with(
            MockTranscriber::new("stt").with_response(LONG_SENTENCE),
        );

        let mut session = StudySession::new();
        session.accept(wav_artifact()).unwrap();
        session.begin_processing(&orchestrator).unwrap();
        session.reset();

        session.accept(wav_artifact()).unwrap();
        assert_eq!(session.state(), WorkflowState::Captured);
    }

    #[test]
    fn artifact_presence_matches_state_tag() {
        let mut session = StudySession::new();
        assert!(session.artifact().is_none());

        session.accept(wav_artifact()).unwrap();
        assert!(session.artifact().is_some());

        session.reset();
        assert!(session.artifact().is_none());
    }

    #[test]
    fn workflow_state_display_names() {
        assert_eq!(WorkflowState::Idle.to_string(), "Idle");
        assert_eq!(WorkflowState::Captured.to_string(), "Captured");
        assert_eq!(WorkflowState::Transcribing.to_string(), "Transcribing");
        assert_eq!(WorkflowState::Synthesizing.to_string(), "Synthesizing");
        assert_eq!(WorkflowState::Complete.to_string(), "Complete");
        assert_eq!(WorkflowState::Errored.to_string(), "Errored");
    }
}
