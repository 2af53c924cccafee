//! TOML configuration with environment overrides.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub stt: SttConfig,
    pub summarizer: SummarizerConfig,
    pub question_gen: QuestionGenConfig,
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    /// Whisper model name (e.g. "base", "base.en", "small")
    pub model: String,
    /// Language code, or "auto" for detection
    pub language: String,
    /// Inference threads (None = auto-detect)
    pub threads: Option<usize>,
    /// Directory holding ggml model files (None = default cache dir)
    pub model_dir: Option<PathBuf>,
}

/// Summarization model configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Catalog name of the summarization model
    pub model: String,
}

/// Question generation model configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuestionGenConfig {
    /// Catalog name of the question generation model
    pub model: String,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_STT_MODEL.to_string(),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            threads: None,
            model_dir: None,
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            model: "t5-small".to_string(),
        }
    }
}

impl Default for QuestionGenConfig {
    fn default() -> Self {
        Self {
            model: "query-gen-msmarco".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Ok(Self::default())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - LECNOTES_STT_MODEL → stt.model
    /// - LECNOTES_LANGUAGE → stt.language
    /// - LECNOTES_SUMMARIZER_MODEL → summarizer.model
    /// - LECNOTES_QG_MODEL → question_gen.model
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("LECNOTES_STT_MODEL")
            && !model.is_empty()
        {
            self.stt.model = model;
        }
        if let Ok(language) = std::env::var("LECNOTES_LANGUAGE")
            && !language.is_empty()
        {
            self.stt.language = language;
        }
        if let Ok(model) = std::env::var("LECNOTES_SUMMARIZER_MODEL")
            && !model.is_empty()
        {
            self.summarizer.model = model;
        }
        if let Ok(model) = std::env::var("LECNOTES_QG_MODEL")
            && !model.is_empty()
        {
            self.question_gen.model = model;
        }
        self
    }
}

/// Default config file location: `$XDG_CONFIG_HOME/lecnotes/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lecnotes").join("config.toml"))
}
