//! Flashcard generation: one sampled question per candidate sentence.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::defaults::{QUESTION_MAX_TOKENS, QUESTION_TEMPERATURE};
use crate::error::{LecnotesError, Result};
use crate::generate::{DecodeOptions, TextGenerator};
use crate::synthesis::map_skipping_failures;
use crate::synthesis::segmenter::CandidateSentence;

/// One question/answer pair.
///
/// The answer is always a candidate sentence's text verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// Generate one flashcard per candidate sentence.
///
/// Decoding is sampled, so repeated runs over the same candidates may ask
/// different questions. A failed or blank generation skips that candidate
/// and the batch continues; the result is simply shorter, never an error.
/// Candidate order is preserved.
pub fn generate_flashcards(
    generator: &Mutex<Box<dyn TextGenerator>>,
    candidates: &[CandidateSentence],
) -> Vec<Flashcard> {
    let options = DecodeOptions::sampled(QUESTION_TEMPERATURE, QUESTION_MAX_TOKENS);

    map_skipping_failures(candidates, |candidate| {
        generate_one(generator, candidate, &options)
    })
}

fn generate_one(
    generator: &Mutex<Box<dyn TextGenerator>>,
    candidate: &CandidateSentence,
    options: &DecodeOptions,
) -> Result<Flashcard> {
    let mut generator = generator.lock().map_err(|e| LecnotesError::Generation {
        message: format!("question generator lock poisoned: {e}"),
    })?;

    let question = match generator.generate(candidate.text(), options) {
        Ok(question) => question,
        Err(e) => {
            debug!(error = %e, "skipping candidate after generation failure");
            return Err(e);
        }
    };

    let question = question.trim().to_string();
    if question.is_empty() {
        debug!("skipping candidate with blank generated question");
        return Err(LecnotesError::Generation {
            message: "blank question".to_string(),
        });
    }

    Ok(Flashcard {
        question,
        answer: candidate.text().to_string(),
    })
}
