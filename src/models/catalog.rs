//! Model metadata catalogs.
//!
//! Whisper speech-to-text models are identified by their ggml filenames;
//! T5 text-to-text models (summarization and question generation) by their
//! HuggingFace repository coordinates.

use std::path::PathBuf;

/// Metadata for a Whisper model.
#[derive(Debug, Clone, PartialEq)]
pub struct WhisperModelInfo {
    /// Model identifier (e.g., "tiny.en", "base", "small")
    pub name: &'static str,
    /// Model size in megabytes
    pub size_mb: u32,
    /// Whether this model supports English only
    pub english_only: bool,
}

/// Catalog of available Whisper models.
///
/// Models range from tiny (75 MB, fast, lower accuracy) to medium (1533 MB,
/// slower, higher accuracy). The `.en` suffix indicates English-only models,
/// which are faster and smaller.
pub const WHISPER_MODELS: &[WhisperModelInfo] = &[
    WhisperModelInfo {
        name: "tiny.en",
        size_mb: 75,
        english_only: true,
    },
    WhisperModelInfo {
        name: "tiny",
        size_mb: 75,
        english_only: false,
    },
    WhisperModelInfo {
        name: "base.en",
        size_mb: 142,
        english_only: true,
    },
    WhisperModelInfo {
        name: "base",
        size_mb: 142,
        english_only: false,
    },
    WhisperModelInfo {
        name: "small.en",
        size_mb: 466,
        english_only: true,
    },
    WhisperModelInfo {
        name: "small",
        size_mb: 466,
        english_only: false,
    },
    WhisperModelInfo {
        name: "medium.en",
        size_mb: 1533,
        english_only: true,
    },
    WhisperModelInfo {
        name: "medium",
        size_mb: 1533,
        english_only: false,
    },
];

/// Find a Whisper model by name.
pub fn get_whisper_model(name: &str) -> Option<&'static WhisperModelInfo> {
    WHISPER_MODELS.iter().find(|m| m.name == name)
}

/// Get all available Whisper models.
pub fn list_whisper_models() -> &'static [WhisperModelInfo] {
    WHISPER_MODELS
}

/// Resolve the on-disk path for a Whisper model.
///
/// Uses the given directory when set, otherwise
/// `~/.cache/lecnotes/models/ggml-<name>.bin`.
pub fn whisper_model_path(name: &str, model_dir: Option<&PathBuf>) -> PathBuf {
    let filename = format!("ggml-{}.bin", name);
    match model_dir {
        Some(dir) => dir.join(filename),
        None => dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lecnotes")
            .join("models")
            .join(filename),
    }
}

/// Metadata for a quantized T5 text-to-text model.
#[derive(Debug, Clone, PartialEq)]
pub struct T5ModelInfo {
    /// Short name used in config and CLI (e.g. "t5-small").
    pub name: &'static str,
    /// Human-readable display name.
    pub display_name: &'static str,
    /// Approximate download size in MB.
    pub size_mb: u32,
    /// HuggingFace repository containing the model.
    pub hf_repo: &'static str,
    /// GGUF model filename within the repository.
    pub hf_filename: &'static str,
    /// JSON config filename within the repository.
    pub config_filename: &'static str,
    /// Tokenizer filename within the repository.
    pub tokenizer_filename: &'static str,
    /// What the model is used for.
    pub description: &'static str,
}

/// HuggingFace repository for quantized T5 models.
pub const T5_MODEL_REPO: &str = "lmz/candle-quantized-t5";

/// Available T5 models: one abstractive summarizer, one question generator.
pub const T5_MODELS: &[T5ModelInfo] = &[
    T5ModelInfo {
        name: "t5-small",
        display_name: "T5 Small (summarization, 64 MB)",
        size_mb: 64,
        hf_repo: T5_MODEL_REPO,
        hf_filename: "model.gguf",
        config_filename: "config.json",
        tokenizer_filename: "tokenizer.json",
        description: "Abstractive summarization of transcript text.",
    },
    T5ModelInfo {
        name: "query-gen-msmarco",
        display_name: "MS MARCO query generator (questions, 263 MB)",
        size_mb: 263,
        hf_repo: "lmz/candle-query-gen-msmarco-t5",
        hf_filename: "model.gguf",
        config_filename: "config.json",
        tokenizer_filename: "tokenizer.json",
        description: "Generates one study question per candidate sentence.",
    },
];

/// Look up a T5 model by name.
pub fn get_t5_model(name: &str) -> Option<&'static T5ModelInfo> {
    T5_MODELS.iter().find(|m| m.name == name)
}

/// List all available T5 models.
pub fn list_t5_models() -> &'static [T5ModelInfo] {
    T5_MODELS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_whisper_model_exists() {
        let model = get_whisper_model("tiny.en").expect("tiny.en should exist");
        assert_eq!(model.name, "tiny.en");
        assert_eq!(model.size_mb, 75);
        assert!(model.english_only);
    }

    #[test]
    fn test_get_whisper_model_not_found() {
        assert!(get_whisper_model("nonexistent").is_none());
    }

    #[test]
    fn test_english_whisper_models_have_en_suffix() {
        for model in list_whisper_models() {
            if model.english_only {
                assert!(
                    model.name.ends_with(".en"),
                    "English-only model {} should have .en suffix",
                    model.name
                );
            }
        }
    }

    #[test]
    fn test_whisper_model_names_are_unique() {
        let names: Vec<_> = list_whisper_models().iter().map(|m| m.name).collect();
        let mut unique_names = names.clone();
        unique_names.sort_unstable();
        unique_names.dedup();
        assert_eq!(names.len(), unique_names.len(), "Model names are not unique");
    }

    #[test]
    fn test_whisper_model_path_with_explicit_dir() {
        let dir = PathBuf::from("/opt/models");
        let path = whisper_model_path("base", Some(&dir));
        assert_eq!(path, PathBuf::from("/opt/models/ggml-base.bin"));
    }

    #[test]
    fn test_whisper_model_path_default_dir_uses_cache() {
        let path = whisper_model_path("base.en", None);
        assert!(path.to_string_lossy().ends_with("ggml-base.en.bin"));
        assert!(path.to_string_lossy().contains("lecnotes"));
    }

    #[test]
    fn test_get_t5_model_summarizer() {
        let model = get_t5_model("t5-small").expect("t5-small should exist");
        assert_eq!(model.name, "t5-small");
        assert_eq!(model.hf_repo, T5_MODEL_REPO);
        assert_eq!(model.hf_filename, "model.gguf");
    }

    #[test]
    fn test_get_t5_model_question_generator() {
        let model = get_t5_model("query-gen-msmarco").expect("query-gen-msmarco should exist");
        assert_eq!(model.size_mb, 263);
        assert_eq!(model.tokenizer_filename, "tokenizer.json");
    }

    #[test]
    fn test_get_t5_model_nonexistent() {
        assert!(get_t5_model("nonexistent").is_none());
    }

    #[test]
    fn test_list_t5_models_count() {
        assert_eq!(list_t5_models().len(), 2);
    }
}
