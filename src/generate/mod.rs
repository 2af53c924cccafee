//! Text-to-text generation: trait, decode options, and mock.
//!
//! Summarization and question generation both speak this interface; they
//! differ only in the model behind it and the decode options passed in.

pub mod candle_t5;

pub use candle_t5::CandleT5Generator;

use crate::error::{LecnotesError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// How the decoder picks tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeStrategy {
    /// Deterministic beam search. Identical input and model state always
    /// produce identical output.
    Beam { width: usize, early_stopping: bool },
    /// Stochastic sampling; repeated calls may differ.
    Sample { temperature: f64, top_p: Option<f64> },
}

/// Options for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOptions {
    /// Maximum number of tokens to generate.
    pub max_tokens: usize,
    /// Head-truncate the tokenized input to this budget before encoding.
    /// Trailing content is dropped deterministically.
    pub max_input_tokens: Option<usize>,
    pub strategy: DecodeStrategy,
}

impl DecodeOptions {
    /// Deterministic beam-search options.
    pub fn beam(width: usize, max_tokens: usize) -> Self {
        Self {
            max_tokens,
            max_input_tokens: None,
            strategy: DecodeStrategy::Beam {
                width,
                early_stopping: true,
            },
        }
    }

    /// Sampled decoding options.
    pub fn sampled(temperature: f64, max_tokens: usize) -> Self {
        Self {
            max_tokens,
            max_input_tokens: None,
            strategy: DecodeStrategy::Sample {
                temperature,
                top_p: None,
            },
        }
    }

    pub fn with_input_budget(mut self, budget: usize) -> Self {
        self.max_input_tokens = Some(budget);
        self
    }
}

/// Trait for text-to-text generation models.
///
/// Implementations receive plain input text and return decoded output text
/// with generation-control tokens already stripped.
pub trait TextGenerator: Send {
    /// Generate output text for the given input.
    fn generate(&mut self, text: &str, options: &DecodeOptions) -> Result<String>;

    /// Return the name of this generator for logging.
    fn name(&self) -> &str;
}

/// One scripted reply for [`MockGenerator`].
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Error(String),
}

/// Mock generator for testing.
///
/// Replays a script of canned replies in call order; once the script is
/// exhausted (or when none was given) it falls back to the fixed response.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    name: String,
    response: String,
    script: Vec<MockReply>,
    calls: Arc<AtomicUsize>,
}

impl MockGenerator {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            response: "mock generation".to_string(),
            script: Vec::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fixed fallback response for every call not covered by the script.
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Scripted per-call replies, consumed in call order.
    pub fn with_script(mut self, script: Vec<MockReply>) -> Self {
        self.script = script;
        self
    }

    /// Shared call counter, usable after the mock has been moved into a
    /// registry.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl TextGenerator for MockGenerator {
    fn generate(&mut self, _text: &str, _options: &DecodeOptions) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script.get(call) {
            Some(MockReply::Text(text)) => Ok(text.clone()),
            Some(MockReply::Error(message)) => Err(LecnotesError::Generation {
                message: message.clone(),
            }),
            None => Ok(self.response.clone()),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
