use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use super::commands;

const EXAMPLES: &str = "Examples:
  # With an explicit audio file
  podcast-automator --topic \"AI in Healthcare\" --audio recordings/episode1.mp3

  # With an explicit transcript
  podcast-automator --topic \"AI in Healthcare\" --transcript transcripts/episode1.txt

  # Auto-detect from podcast_recordings/ or test_data/
  podcast-automator --topic \"AI in Healthcare\"";

/// Entry point for the `podcast-automator` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "podcast-automator",
    about = "Turn a podcast recording or transcript into a content bundle",
    version,
    long_about = None,
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Topic or title of the podcast episode
    #[arg(long)]
    pub topic: String,

    /// Path to audio file (supports .mp3, .wav, .m4a)
    #[arg(long)]
    pub audio: Option<PathBuf>,

    /// Path to transcript text file (.txt)
    #[arg(long)]
    pub transcript: Option<PathBuf>,

    /// Directory for generated files (overrides config)
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Maximum attempts per agent call (overrides config)
    #[arg(long = "max-attempts", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: Option<u32>,

    /// Enable verbose logging of agent calls and HTTP traffic
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        commands::run(self).await
    }
}
