//! Content synthesis: transcript text in, study material out.
//!
//! The orchestrator sequences transcription, sentence selection,
//! summarization, and flashcard generation; the stages themselves live in
//! their own modules and know nothing about session state.

pub mod flashcards;
pub mod orchestrator;
pub mod segmenter;
pub mod summarizer;

pub use flashcards::{Flashcard, generate_flashcards};
pub use orchestrator::{Orchestrator, StudyMaterials};
pub use segmenter::{CandidateSentence, segment_and_filter};
pub use summarizer::summarize;

use crate::error::Result;

/// Map `f` over `items`, keeping only the successful results.
///
/// Failures are dropped silently; callers that care log them inside `f`.
/// Output order follows input order.
pub fn map_skipping_failures<I, T, R, F>(items: I, mut f: F) -> Vec<R>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Result<R>,
{
    items.into_iter().filter_map(|item| f(item).ok()).collect()
}
