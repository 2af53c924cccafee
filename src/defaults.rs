//! Default configuration constants for lecnotes.
//!
//! This module provides shared constants used across different configuration types
//! to ensure consistency and eliminate duplication.

/// Audio sample rate expected by the speech-to-text engine, in Hz.
///
/// 16kHz mono is the standard input format for Whisper models. Every
/// uploaded or captured recording is decoded and resampled to this rate
/// before transcription.
pub const SAMPLE_RATE: u32 = 16000;

/// Default Whisper model name.
///
/// "base" (multilingual) supports auto-detection of any language.
/// Use "base.en" explicitly for English-only optimized transcription.
pub const DEFAULT_STT_MODEL: &str = "base";

/// Default language code for transcription.
///
/// "auto" lets Whisper detect the spoken language automatically.
/// Set to a specific code (e.g., "en", "de") to force a language.
pub const DEFAULT_LANGUAGE: &str = "auto";

/// Language value that triggers automatic language detection.
pub const AUTO_LANGUAGE: &str = "auto";

/// Maximum number of tokenizer tokens fed to the summarization model.
///
/// Longer transcripts are head-truncated to this budget before encoding;
/// trailing content is dropped deterministically.
pub const SUMMARY_INPUT_TOKEN_BUDGET: usize = 1024;

/// Beam width for summary decoding.
pub const SUMMARY_BEAM_WIDTH: usize = 4;

/// Maximum number of tokens a summary may contain.
pub const SUMMARY_MAX_TOKENS: usize = 150;

/// Maximum number of tokens a generated flashcard question may contain.
pub const QUESTION_MAX_TOKENS: usize = 64;

/// Sampling temperature for question generation.
pub const QUESTION_TEMPERATURE: f64 = 1.0;

/// A sentence qualifies as flashcard material only when its whitespace-split
/// word count is strictly greater than this.
pub const MIN_ANSWER_WORDS: usize = 10;

/// A sentence qualifies as flashcard material only when its whitespace-split
/// word count is strictly less than this.
pub const MAX_ANSWER_WORDS: usize = 50;

/// Hard cap on flashcards per session.
///
/// Caps downstream generation cost; the first qualifying sentences in
/// document order win.
pub const MAX_FLASHCARDS: usize = 10;

/// MIME type assumed for live-captured recordings.
pub const CAPTURE_MIME_TYPE: &str = "audio/webm";

/// Report the GPU backend compiled into this build.
///
/// Returns a human-readable name based on the compile-time feature flags.
/// Only one GPU backend can be active at a time; if none is enabled, returns "CPU".
pub fn gpu_backend() -> &'static str {
    if cfg!(feature = "cuda") {
        "CUDA"
    } else if cfg!(feature = "vulkan") {
        "Vulkan"
    } else if cfg!(feature = "hipblas") {
        "HipBLAS (AMD)"
    } else if cfg!(feature = "openblas") {
        "OpenBLAS"
    } else {
        "CPU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_word_bounds_are_exclusive_and_ordered() {
        assert!(MIN_ANSWER_WORDS < MAX_ANSWER_WORDS);
    }

    #[test]
    fn gpu_backend_matches_compiled_feature() {
        let expected = if cfg!(feature = "cuda") {
            "CUDA"
        } else if cfg!(feature = "vulkan") {
            "Vulkan"
        } else if cfg!(feature = "hipblas") {
            "HipBLAS (AMD)"
        } else if cfg!(feature = "openblas") {
            "OpenBLAS"
        } else {
            "CPU"
        };
        assert_eq!(gpu_backend(), expected);
    }
}
