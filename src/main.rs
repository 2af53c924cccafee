//! lecnotes binary entry point.
//!
//! Thin presentation layer: parses arguments, wires the model registry into
//! the pipeline, runs one study session, and prints the material through the
//! session's read-only accessors.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;

use lecnotes::audio::AudioArtifact;
use lecnotes::cli::{Cli, Commands};
use lecnotes::config::{Config, default_config_path};
use lecnotes::models::catalog::{list_t5_models, list_whisper_models};
use lecnotes::models::ModelRegistry;
use lecnotes::session::{StudySession, WorkflowState};
use lecnotes::synthesis::Orchestrator;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => match default_config_path() {
            Some(path) => Config::load_or_default(&path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => Config::default(),
        },
    }
    .with_env_overrides();

    match cli.command {
        Commands::Process {
            audio,
            model,
            language,
            json,
        } => run_process(config, &audio, model, language, json, cli.quiet),
        Commands::Models => {
            run_models();
            Ok(())
        }
    }
}

fn run_process(
    mut config: Config,
    audio_path: &Path,
    model: Option<String>,
    language: Option<String>,
    json: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    // Apply CLI overrides
    if let Some(m) = model {
        config.stt.model = m;
    }
    if let Some(l) = language {
        config.stt.language = l;
    }

    let bytes = std::fs::read(audio_path)
        .with_context(|| format!("failed to read {}", audio_path.display()))?;
    let file_name = audio_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let artifact = AudioArtifact::from_upload(bytes, file_name, mime_for_path(audio_path));

    // Load models ONCE before processing (this is the slow part)
    if !quiet {
        eprintln!(
            "Loading models '{}', '{}', '{}'...",
            config.stt.model, config.summarizer.model, config.question_gen.model
        );
    }
    let registry = ModelRegistry::load(&config)?;
    let orchestrator = Orchestrator::new(Arc::new(registry));

    if !quiet {
        eprintln!("Processing {}... (this may take several minutes)", artifact.file_name());
    }

    let mut session = StudySession::new();
    session.accept(artifact)?;
    session.begin_processing(&orchestrator)?;

    if json {
        print_json(&session)?;
    } else {
        print_material(&session)?;
    }

    Ok(())
}

/// Print the study material as JSON for downstream tooling.
fn print_json(session: &StudySession) -> anyhow::Result<()> {
    let value = serde_json::json!({
        "file_name": session.file_name(),
        "state": session.state().to_string(),
        "transcript": session.transcript().and_then(|t| t.text()),
        "error": session.transcript().and_then(|t| t.failure_reason()),
        "summary": session.summary(),
        "flashcards": session.flashcards(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Print the study material as formatted sections.
fn print_material(session: &StudySession) -> anyhow::Result<()> {
    if session.state() == WorkflowState::Errored {
        let reason = session
            .transcript()
            .and_then(|t| t.failure_reason())
            .unwrap_or("unknown failure");
        bail!("could not process the audio: {}", reason);
    }

    if let Some(name) = session.file_name() {
        println!("# Study notes for {}", name);
        println!();
    }

    if let Some(text) = session.transcript().and_then(|t| t.text()) {
        println!("## Transcription");
        println!();
        println!("{}", text);
        println!();
    }

    if let Some(summary) = session.summary() {
        println!("## Summary");
        println!();
        println!("{}", summary);
        println!();
    }

    println!("## Flashcards");
    println!();
    if session.flashcards().is_empty() {
        println!("No flashcards generated for this input.");
    } else {
        for card in session.flashcards() {
            println!("Q: {}", card.question);
            println!("A: {}", card.answer);
            println!();
        }
    }

    Ok(())
}

fn run_models() {
    println!("Speech-to-text (whisper):");
    for model in list_whisper_models() {
        let scope = if model.english_only {
            "English only"
        } else {
            "multilingual"
        };
        println!("  {:<10} {:>5} MB  {}", model.name, model.size_mb, scope);
    }

    println!();
    println!("Text generation (T5):");
    for model in list_t5_models() {
        println!("  {:<18} {}", model.name, model.display_name);
        println!("  {:<18} {}", "", model.description);
    }
}

/// Guess a MIME type from the file extension; the decoder only uses it as a
/// probe hint, so unknown extensions are fine.
fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("webm") => "audio/webm",
        Some("m4a") | Some("mp4") => "audio/mp4",
        Some("ogg") | Some("oga") => "audio/ogg",
        Some("flac") => "audio/flac",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_for_path_covers_supported_extensions() {
        assert_eq!(mime_for_path(Path::new("a.wav")), "audio/wav");
        assert_eq!(mime_for_path(Path::new("a.MP3")), "audio/mpeg");
        assert_eq!(mime_for_path(Path::new("a.webm")), "audio/webm");
        assert_eq!(mime_for_path(Path::new("a.m4a")), "audio/mp4");
        assert_eq!(mime_for_path(Path::new("a.flac")), "audio/flac");
        assert_eq!(
            mime_for_path(Path::new("no_extension")),
            "application/octet-stream"
        );
    }
}
