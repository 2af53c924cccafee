//! Model catalogs and the registry holding loaded inference engines.

pub mod catalog;

use std::sync::{Arc, Mutex};

use tracing::info;

use crate::config::Config;
use crate::error::{LecnotesError, Result};
use crate::generate::{CandleT5Generator, TextGenerator};
use crate::models::catalog::{get_t5_model, get_whisper_model, whisper_model_path};
use crate::stt::transcriber::Transcriber;
use crate::stt::whisper::{WhisperConfig, WhisperTranscriber};

/// All inference engines, loaded once at startup and shared read-only.
///
/// Built explicitly and passed into the pipeline rather than living in a
/// process-wide global, so tests can inject mocks and a load failure is an
/// ordinary startup error.
pub struct ModelRegistry {
    transcriber: Arc<dyn Transcriber>,
    summarizer: Mutex<Box<dyn TextGenerator>>,
    question_gen: Mutex<Box<dyn TextGenerator>>,
}

impl ModelRegistry {
    /// Build a registry from already-constructed engines.
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        summarizer: Box<dyn TextGenerator>,
        question_gen: Box<dyn TextGenerator>,
    ) -> Self {
        Self {
            transcriber,
            summarizer: Mutex::new(summarizer),
            question_gen: Mutex::new(question_gen),
        }
    }

    /// Load all configured models.
    ///
    /// The whisper model must already exist on disk; the T5 models are
    /// fetched from the HuggingFace cache (downloading on first use).
    pub fn load(config: &Config) -> Result<Self> {
        let stt_model =
            get_whisper_model(&config.stt.model).ok_or_else(|| LecnotesError::ConfigInvalidValue {
                key: "stt.model".to_string(),
                message: format!("unknown whisper model '{}'", config.stt.model),
            })?;
        let model_path = whisper_model_path(stt_model.name, config.stt.model_dir.as_ref());

        info!(model = stt_model.name, path = %model_path.display(), "loading whisper model");
        let transcriber = WhisperTranscriber::new(WhisperConfig {
            model_path,
            language: config.stt.language.clone(),
            threads: config.stt.threads,
        })?;

        let summarizer_info = get_t5_model(&config.summarizer.model).ok_or_else(|| {
            LecnotesError::ConfigInvalidValue {
                key: "summarizer.model".to_string(),
                message: format!("unknown T5 model '{}'", config.summarizer.model),
            }
        })?;
        info!(model = summarizer_info.name, "loading summarization model");
        let summarizer = CandleT5Generator::load(summarizer_info)?;

        let question_gen_info = get_t5_model(&config.question_gen.model).ok_or_else(|| {
            LecnotesError::ConfigInvalidValue {
                key: "question_gen.model".to_string(),
                message: format!("unknown T5 model '{}'", config.question_gen.model),
            }
        })?;
        info!(model = question_gen_info.name, "loading question generation model");
        let question_gen = CandleT5Generator::load(question_gen_info)?;

        Ok(Self::new(
            Arc::new(transcriber),
            Box::new(summarizer),
            Box::new(question_gen),
        ))
    }

    /// Shared handle to the speech-to-text engine.
    pub fn transcriber(&self) -> Arc<dyn Transcriber> {
        Arc::clone(&self.transcriber)
    }

    /// The summarization model, locked per inference call.
    pub fn summarizer(&self) -> &Mutex<Box<dyn TextGenerator>> {
        &self.summarizer
    }

    /// The question generation model, locked per inference call.
    pub fn question_gen(&self) -> &Mutex<Box<dyn TextGenerator>> {
        &self.question_gen
    }
}
