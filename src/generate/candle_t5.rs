//! T5 text-to-text generation using candle quantized models.
//!
//! Downloads model artifacts from HuggingFace on first use, then runs
//! either beam-search or sampled decoding against the encoder output.

use crate::error::{LecnotesError, Result};
use crate::generate::{DecodeOptions, DecodeStrategy, TextGenerator};
use crate::models::catalog::T5ModelInfo;

use candle_core::{D, Device, Tensor};
use candle_nn::ops::log_softmax;
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::quantized_t5::{Config as T5Config, T5ForConditionalGeneration};
use candle_transformers::quantized_var_builder::VarBuilder;
use hf_hub::api::sync::Api;
use tokenizers::Tokenizer;
use tracing::debug;

/// T5 decoder start token (pad).
const PAD_TOKEN: u32 = 0;

/// T5 end-of-sequence token.
const EOS_TOKEN: u32 = 1;

/// T5 generator that runs quantized inference via candle.
pub struct CandleT5Generator {
    model: T5ForConditionalGeneration,
    tokenizer: Tokenizer,
    device: Device,
    model_name: String,
}

impl CandleT5Generator {
    /// Load a quantized T5 model from HuggingFace cache.
    ///
    /// Downloads model, config, and tokenizer on first call.
    pub fn load(info: &T5ModelInfo) -> Result<Self> {
        let device = Device::Cpu;
        let api = Api::new().map_err(|e| LecnotesError::GenerationModelLoad {
            name: info.name.to_string(),
            message: format!("HF Hub API init: {e}"),
        })?;
        let repo = api.model(info.hf_repo.to_string());

        // Download / resolve paths
        let model_path = repo
            .get(info.hf_filename)
            .map_err(|e| LecnotesError::GenerationModelLoad {
                name: info.name.to_string(),
                message: format!("Download model {}: {e}", info.hf_filename),
            })?;

        let config_path =
            repo.get(info.config_filename)
                .map_err(|e| LecnotesError::GenerationModelLoad {
                    name: info.name.to_string(),
                    message: format!("Download config {}: {e}", info.config_filename),
                })?;

        let tokenizer_path =
            repo.get(info.tokenizer_filename)
                .map_err(|e| LecnotesError::GenerationModelLoad {
                    name: info.name.to_string(),
                    message: format!("Download tokenizer: {e}"),
                })?;

        // Load config
        let config_bytes =
            std::fs::read(&config_path).map_err(|e| LecnotesError::GenerationModelLoad {
                name: info.name.to_string(),
                message: format!("Read config {}: {e}", config_path.display()),
            })?;
        let config: T5Config =
            serde_json::from_slice(&config_bytes).map_err(|e| LecnotesError::GenerationModelLoad {
                name: info.name.to_string(),
                message: format!("Parse T5 config: {e}"),
            })?;

        // Load quantized model
        let vb = VarBuilder::from_gguf(&model_path, &device).map_err(|e| {
            LecnotesError::GenerationModelLoad {
                name: info.name.to_string(),
                message: format!("Load GGUF model {}: {e}", model_path.display()),
            }
        })?;
        let model = T5ForConditionalGeneration::load(vb, &config).map_err(|e| {
            LecnotesError::GenerationModelLoad {
                name: info.name.to_string(),
                message: format!("Init T5 model: {e}"),
            }
        })?;

        // Load tokenizer
        let tokenizer =
            Tokenizer::from_file(&tokenizer_path).map_err(|e| LecnotesError::GenerationModelLoad {
                name: info.name.to_string(),
                message: format!("Load tokenizer {}: {e}", tokenizer_path.display()),
            })?;

        debug!(model = info.name, "T5 generator loaded");

        Ok(Self {
            model,
            tokenizer,
            device,
            model_name: info.name.to_string(),
        })
    }

    /// Tokenize the input, apply the input budget, and run the encoder.
    fn encode_input(&mut self, text: &str, options: &DecodeOptions) -> Result<Tensor> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| LecnotesError::Generation {
                message: format!("Tokenize: {e}"),
            })?;

        let mut input_ids: Vec<u32> = encoding.get_ids().to_vec();
        if let Some(budget) = options.max_input_tokens {
            truncate_ids(&mut input_ids, budget);
        }

        let input_tensor = Tensor::new(input_ids.as_slice(), &self.device)
            .map_err(|e| LecnotesError::Generation {
                message: format!("Create input tensor: {e}"),
            })?
            .unsqueeze(0)
            .map_err(|e| LecnotesError::Generation {
                message: format!("Unsqueeze input: {e}"),
            })?;

        self.model
            .encode(&input_tensor)
            .map_err(|e| LecnotesError::Generation {
                message: format!("Encoder forward: {e}"),
            })
    }

    /// Run the decoder for the given token prefix and return log-probabilities
    /// over the vocabulary for the next position.
    fn next_token_log_probs(&mut self, prefix: &[u32], encoder_output: &Tensor) -> Result<Vec<f32>> {
        let decoder_input = Tensor::new(prefix, &self.device)
            .map_err(|e| LecnotesError::Generation {
                message: format!("Create decoder input: {e}"),
            })?
            .unsqueeze(0)
            .map_err(|e| LecnotesError::Generation {
                message: format!("Unsqueeze decoder: {e}"),
            })?;

        let logits = self
            .model
            .decode(&decoder_input, encoder_output)
            .map_err(|e| LecnotesError::Generation {
                message: format!("Decoder forward: {e}"),
            })?;

        let seq_len = logits.dim(1).map_err(|e| LecnotesError::Generation {
            message: format!("Get logits dim: {e}"),
        })?;
        let last = logits
            .get_on_dim(1, seq_len - 1)
            .map_err(|e| LecnotesError::Generation {
                message: format!("Slice logits: {e}"),
            })?;

        log_softmax(&last, D::Minus1)
            .and_then(|t| t.squeeze(0))
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(|e| LecnotesError::Generation {
                message: format!("Log-softmax: {e}"),
            })
    }

    /// Deterministic beam search.
    ///
    /// Every step re-decodes each beam's full prefix with a cleared KV cache;
    /// prefixes are short (summary/question lengths), so the quadratic cost
    /// stays small. Beams are ranked by length-normalized log-probability.
    fn beam_decode(
        &mut self,
        encoder_output: &Tensor,
        width: usize,
        max_tokens: usize,
        early_stopping: bool,
    ) -> Result<Vec<u32>> {
        #[derive(Clone)]
        struct Beam {
            tokens: Vec<u32>,
            score: f32,
            finished: bool,
        }

        let width = width.max(1);
        let mut beams = vec![Beam {
            tokens: vec![PAD_TOKEN],
            score: 0.0,
            finished: false,
        }];

        for _ in 0..max_tokens {
            if early_stopping && beams.iter().all(|b| b.finished) {
                break;
            }

            let mut candidates: Vec<Beam> = Vec::with_capacity(width * width);
            for beam in &beams {
                if beam.finished {
                    candidates.push(beam.clone());
                    continue;
                }

                self.model.clear_kv_cache();
                let log_probs = self.next_token_log_probs(&beam.tokens, encoder_output)?;
                for (token, log_prob) in top_tokens(&log_probs, width) {
                    let mut tokens = beam.tokens.clone();
                    tokens.push(token);
                    candidates.push(Beam {
                        tokens,
                        score: beam.score + log_prob,
                        finished: token == EOS_TOKEN,
                    });
                }
            }

            candidates.sort_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            candidates.truncate(width);
            beams = candidates;
        }

        beams.sort_by(|a, b| {
            let a_norm = a.score / a.tokens.len() as f32;
            let b_norm = b.score / b.tokens.len() as f32;
            b_norm
                .partial_cmp(&a_norm)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        beams
            .into_iter()
            .next()
            .map(|beam| beam.tokens)
            .ok_or_else(|| LecnotesError::Generation {
                message: "beam search produced no candidates".to_string(),
            })
    }

    /// Sampled decoding with incremental KV cache.
    ///
    /// First step feeds the pad token; subsequent steps feed only the new
    /// token while the cache accumulates key-value pairs.
    fn sampled_decode(
        &mut self,
        encoder_output: &Tensor,
        temperature: f64,
        top_p: Option<f64>,
        max_tokens: usize,
    ) -> Result<Vec<u32>> {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(299_792_458);
        let mut sampler = LogitsProcessor::new(seed, Some(temperature), top_p);

        self.model.clear_kv_cache();
        let mut decoded_ids: Vec<u32> = vec![PAD_TOKEN];
        let mut next_input = vec![PAD_TOKEN];

        for _ in 0..max_tokens {
            let decoder_input = Tensor::new(next_input.as_slice(), &self.device)
                .map_err(|e| LecnotesError::Generation {
                    message: format!("Create decoder input: {e}"),
                })?
                .unsqueeze(0)
                .map_err(|e| LecnotesError::Generation {
                    message: format!("Unsqueeze decoder: {e}"),
                })?;

            let logits = self
                .model
                .decode(&decoder_input, encoder_output)
                .map_err(|e| LecnotesError::Generation {
                    message: format!("Decoder forward: {e}"),
                })?;

            let seq_len = logits.dim(1).map_err(|e| LecnotesError::Generation {
                message: format!("Get logits dim: {e}"),
            })?;
            let next_logits = logits
                .get_on_dim(1, seq_len - 1)
                .and_then(|t| t.squeeze(0))
                .map_err(|e| LecnotesError::Generation {
                    message: format!("Slice logits: {e}"),
                })?;

            let next_token = sampler
                .sample(&next_logits)
                .map_err(|e| LecnotesError::Generation {
                    message: format!("Sample token: {e}"),
                })?;

            if next_token == EOS_TOKEN {
                break;
            }

            decoded_ids.push(next_token);
            next_input = vec![next_token]; // incremental: only the new token
        }

        Ok(decoded_ids)
    }
}

impl TextGenerator for CandleT5Generator {
    fn generate(&mut self, text: &str, options: &DecodeOptions) -> Result<String> {
        self.model.clear_kv_cache();
        let encoder_output = self.encode_input(text, options)?;

        let decoded_ids = match options.strategy {
            DecodeStrategy::Beam {
                width,
                early_stopping,
            } => self.beam_decode(&encoder_output, width, options.max_tokens, early_stopping)?,
            DecodeStrategy::Sample { temperature, top_p } => {
                self.sampled_decode(&encoder_output, temperature, top_p, options.max_tokens)?
            }
        };

        // Skip the leading pad token; drop any trailing EOS via skip-special decoding
        let output = self
            .tokenizer
            .decode(&decoded_ids[1..], true)
            .map_err(|e| LecnotesError::Generation {
                message: format!("Detokenize: {e}"),
            })?;

        Ok(output.trim().to_string())
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

/// Head-truncate token ids to `budget`, keeping a trailing EOS so the
/// encoder still sees a terminated sequence.
fn truncate_ids(ids: &mut Vec<u32>, budget: usize) {
    if budget == 0 || ids.len() <= budget {
        return;
    }
    ids.truncate(budget);
    if let Some(last) = ids.last_mut() {
        *last = EOS_TOKEN;
    }
}

/// The `k` highest-probability tokens, best first.
fn top_tokens(log_probs: &[f32], k: usize) -> Vec<(u32, f32)> {
    let mut indexed: Vec<(u32, f32)> = log_probs
        .iter()
        .enumerate()
        .map(|(i, &lp)| (i as u32, lp))
        .collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    indexed.truncate(k);
    indexed
}
