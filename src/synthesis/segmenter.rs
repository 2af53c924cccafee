//! Sentence segmentation and candidate selection.
//!
//! Splits transcript text on sentence-ending punctuation while skipping
//! abbreviation periods (Dr., etc.), decimal points (3.14), and ellipses,
//! then keeps only sentences whose word count qualifies them as flashcard
//! answers.

use crate::defaults::{MAX_ANSWER_WORDS, MAX_FLASHCARDS, MIN_ANSWER_WORDS};

/// A transcript sentence whose word count makes it flashcard material.
///
/// Derived deterministically from transcript text; recomputed each run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSentence {
    text: String,
    word_count: usize,
}

impl CandidateSentence {
    /// Trimmed sentence text, used verbatim as a flashcard answer.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whitespace-split word count.
    pub fn word_count(&self) -> usize {
        self.word_count
    }
}

/// Common abbreviations that end with a period but do not indicate
/// a sentence boundary. Checked case-insensitively.
const ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.", "vs.", "etc.", "approx.", "dept.",
    "est.", "inc.", "ltd.", "no.", "vol.", "fig.", "eq.", "ref.", "sec.", "ch.", "pp.",
];

/// Split transcript text into sentences and keep the qualifying candidates.
///
/// A sentence qualifies when its whitespace-split word count is strictly
/// between the configured bounds. Document order is preserved and the result
/// is truncated to the first qualifying sentences, capping downstream
/// generation cost. An empty result means "no flashcards", not an error.
pub fn segment_and_filter(text: &str) -> Vec<CandidateSentence> {
    split_sentences(text)
        .into_iter()
        .filter_map(|sentence| {
            let word_count = sentence.split_whitespace().count();
            (word_count > MIN_ANSWER_WORDS && word_count < MAX_ANSWER_WORDS).then(|| {
                CandidateSentence {
                    text: sentence,
                    word_count,
                }
            })
        })
        .take(MAX_FLASHCARDS)
        .collect()
}

/// Split text into trimmed sentences on `.`, `?`, and `!` boundaries.
///
/// Periods inside abbreviations, decimals, and ellipses do not end a
/// sentence. Trailing text without terminal punctuation still forms a
/// final sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut byte_offset = 0usize;

    for ch in text.chars() {
        let ch_len = ch.len_utf8();
        let is_boundary = match ch {
            '?' | '!' => true,
            '.' => {
                !is_abbreviation_period(text, byte_offset)
                    && !is_initial_period(text, byte_offset)
                    && !is_decimal_period(text, byte_offset)
                    && !is_ellipsis_period(text, byte_offset)
            }
            _ => false,
        };

        if is_boundary {
            let sentence = text[start..byte_offset + ch_len].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = byte_offset + ch_len;
        }

        byte_offset += ch_len;
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Return `true` when the period at `period_byte_pos` inside `text` belongs
/// to a known abbreviation rather than ending a sentence.
fn is_abbreviation_period(text: &str, period_byte_pos: usize) -> bool {
    let before = &text[..period_byte_pos + 1]; // includes the period
    let lower = before.to_ascii_lowercase();
    for abbr in ABBREVIATIONS {
        if lower.ends_with(abbr) {
            // Must be word-aligned (preceded by start or whitespace)
            let prefix_len = before.len() - abbr.len();
            if prefix_len == 0 {
                return true;
            }
            if before
                .as_bytes()
                .get(prefix_len.wrapping_sub(1))
                .is_some_and(|b| b.is_ascii_whitespace())
            {
                return true;
            }
        }
    }
    false
}

/// Return `true` when the period at `period_byte_pos` follows a single-letter
/// word ("J. Smith", "e.g.", "U.S."): an initial, not a sentence end.
fn is_initial_period(text: &str, period_byte_pos: usize) -> bool {
    let bytes = text.as_bytes();
    if period_byte_pos == 0 {
        return false;
    }
    let letter = bytes[period_byte_pos - 1];
    if !letter.is_ascii_alphabetic() {
        return false;
    }
    // The letter must itself start a word: preceded by start, whitespace,
    // or another initial's period
    match period_byte_pos.checked_sub(2).map(|i| bytes[i]) {
        None => true,
        Some(prev) => prev.is_ascii_whitespace() || prev == b'.',
    }
}

/// Return `true` when the period at `period_byte_pos` inside `text` is part
/// of a decimal number (e.g. "3.14", "$5.00").
fn is_decimal_period(text: &str, period_byte_pos: usize) -> bool {
    let before_digit = period_byte_pos > 0
        && text
            .as_bytes()
            .get(period_byte_pos - 1)
            .is_some_and(|b| b.is_ascii_digit());
    let after_digit = text
        .as_bytes()
        .get(period_byte_pos + 1)
        .is_some_and(|b| b.is_ascii_digit());
    before_digit && after_digit
}

/// Return `true` when the period at `period_byte_pos` inside `text` is part
/// of an ellipsis sequence ("...").
fn is_ellipsis_period(text: &str, period_byte_pos: usize) -> bool {
    let bytes = text.as_bytes();
    let mut start = period_byte_pos;
    while start > 0 && bytes.get(start - 1) == Some(&b'.') {
        start -= 1;
    }
    let mut end = period_byte_pos;
    while bytes.get(end + 1) == Some(&b'.') {
        end += 1;
    }
    (end - start + 1) >= 3
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a sentence with exactly `n` whitespace-separated words,
    /// terminated with a period.
    fn sentence_with_words(n: usize) -> String {
        let words: Vec<String> = (0..n).map(|i| format!("word{}", i)).collect();
        format!("{}.", words.join(" "))
    }

    #[test]
    fn splits_on_terminal_punctuation() {
        let sentences = split_sentences("First sentence. Second one! Third one?");
        assert_eq!(
            sentences,
            vec!["First sentence.", "Second one!", "Third one?"]
        );
    }

    #[test]
    fn abbreviation_periods_do_not_split() {
        let sentences = split_sentences("Dr. Smith spoke about Mr. Jones. The class listened.");
        assert_eq!(
            sentences,
            vec!["Dr. Smith spoke about Mr. Jones.", "The class listened."]
        );
    }

    #[test]
    fn decimal_periods_do_not_split() {
        let sentences = split_sentences("Pi is roughly 3.14 in value. Euler's is 2.71.");
        assert_eq!(
            sentences,
            vec!["Pi is roughly 3.14 in value.", "Euler's is 2.71."]
        );
    }

    #[test]
    fn initials_and_latin_abbreviations_do_not_split() {
        let sentences = split_sentences("Use memoization, e.g. a table. J. Smith agrees.");
        assert_eq!(
            sentences,
            vec!["Use memoization, e.g. a table.", "J. Smith agrees."]
        );
    }

    #[test]
    fn ellipsis_does_not_split() {
        let sentences = split_sentences("Well... that was unexpected. Moving on.");
        assert_eq!(
            sentences,
            vec!["Well... that was unexpected.", "Moving on."]
        );
    }

    #[test]
    fn trailing_text_without_punctuation_is_a_sentence() {
        let sentences = split_sentences("Complete sentence. trailing fragment");
        assert_eq!(sentences, vec!["Complete sentence.", "trailing fragment"]);
    }

    #[test]
    fn empty_text_yields_no_sentences() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n  ").is_empty());
    }

    #[test]
    fn word_count_bounds_are_strictly_exclusive() {
        let text = format!(
            "{} {} {} {}",
            sentence_with_words(10), // too short: excluded
            sentence_with_words(11), // included
            sentence_with_words(49), // included
            sentence_with_words(50), // too long: excluded
        );

        let candidates = segment_and_filter(&text);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].word_count(), 11);
        assert_eq!(candidates[1].word_count(), 49);
    }

    #[test]
    fn candidates_are_capped_at_ten_in_document_order() {
        let text: String = (0..15)
            .map(|_| sentence_with_words(12))
            .collect::<Vec<_>>()
            .join(" ");

        let candidates = segment_and_filter(&text);
        assert_eq!(candidates.len(), 10);
        assert!(candidates.iter().all(|c| c.word_count() == 12));
    }

    #[test]
    fn no_qualifying_sentences_yields_empty() {
        let candidates = segment_and_filter("Too short. Also short. Way too short.");
        assert!(candidates.is_empty());
    }

    #[test]
    fn lecture_example_selects_only_the_long_sentence() {
        let text = "This is a short test. The quick brown fox jumps over the lazy dog \
                    while the lecturer explains recursion and dynamic programming to the \
                    students in detail today.";

        let candidates = segment_and_filter(text);
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].text().starts_with("The quick brown fox"));
        assert!(candidates[0].text().ends_with("in detail today."));
        assert!(candidates[0].word_count() > 10 && candidates[0].word_count() < 50);
    }

    #[test]
    fn candidate_text_is_trimmed() {
        let text = format!("   {}   ", sentence_with_words(12));
        let candidates = segment_and_filter(&text);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text(), sentence_with_words(12));
    }
}
