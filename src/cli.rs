//! Command-line interface for lecnotes
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Turn lecture recordings into study notes
#[derive(Parser, Debug)]
#[command(name = "lecnotes", version, about = "Turn lecture recordings into study notes")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress status output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcribe a recording and generate summary + flashcards
    Process {
        /// Audio file to process (wav, mp3, webm, m4a, ogg, flac)
        #[arg(value_name = "FILE")]
        audio: PathBuf,

        /// Whisper model override (e.g. base, base.en, small)
        #[arg(long, value_name = "MODEL")]
        model: Option<String>,

        /// Language code override (default: auto-detect)
        #[arg(long, value_name = "LANG")]
        language: Option<String>,

        /// Emit the study material as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List known speech-to-text and text-generation models
    Models,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_process_command() {
        let cli = Cli::parse_from(["lecnotes", "process", "lecture.mp3", "--json"]);
        match cli.command {
            Commands::Process {
                audio,
                json,
                model,
                language,
            } => {
                assert_eq!(audio, PathBuf::from("lecture.mp3"));
                assert!(json);
                assert!(model.is_none());
                assert!(language.is_none());
            }
            _ => panic!("expected Process command"),
        }
    }

    #[test]
    fn cli_parses_overrides() {
        let cli = Cli::parse_from([
            "lecnotes",
            "process",
            "talk.wav",
            "--model",
            "small.en",
            "--language",
            "en",
        ]);
        match cli.command {
            Commands::Process { model, language, .. } => {
                assert_eq!(model.as_deref(), Some("small.en"));
                assert_eq!(language.as_deref(), Some("en"));
            }
            _ => panic!("expected Process command"),
        }
    }

    #[test]
    fn cli_parses_models_command() {
        let cli = Cli::parse_from(["lecnotes", "models", "--quiet"]);
        assert!(matches!(cli.command, Commands::Models));
        assert!(cli.quiet);
    }

    #[test]
    fn cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
