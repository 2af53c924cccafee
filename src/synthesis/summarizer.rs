//! Abstractive summarization of full transcript text.

use std::sync::Mutex;

use tracing::debug;

use crate::defaults::{SUMMARY_BEAM_WIDTH, SUMMARY_INPUT_TOKEN_BUDGET, SUMMARY_MAX_TOKENS};
use crate::error::{LecnotesError, Result};
use crate::generate::{DecodeOptions, TextGenerator};

/// Summarize transcript text with the configured summarization model.
///
/// Input is head-truncated to the token budget before encoding; decoding is
/// beam search with early stopping, so repeated calls on identical text
/// yield identical output. No lower length bound is enforced; a short
/// transcript may yield a short summary.
pub fn summarize(generator: &Mutex<Box<dyn TextGenerator>>, text: &str) -> Result<String> {
    let options = DecodeOptions::beam(SUMMARY_BEAM_WIDTH, SUMMARY_MAX_TOKENS)
        .with_input_budget(SUMMARY_INPUT_TOKEN_BUDGET);

    let mut generator = generator.lock().map_err(|e| LecnotesError::Generation {
        message: format!("summarizer lock poisoned: {e}"),
    })?;

    debug!(model = generator.name(), chars = text.len(), "summarizing transcript");
    generator.generate(text, &options)
}
