use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::*;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::Config;
use crate::pipeline::{PipelineError, PipelineOrchestrator, PipelineReport, PipelineRequest};

use super::args::Cli;
use super::inputs::{self, InputSource, ResolvedInput};

const INTERRUPTED_EXIT_CODE: u8 = 130;

pub(crate) async fn run(cli: Cli) -> Result<ExitCode> {
    println!("{}", "🎙️ Podcast Automator".bold().blue());

    let mut config = Config::load()?;
    apply_overrides(&cli, &mut config);
    config.validate()?;

    let input = inputs::detect_inputs(
        cli.audio.as_deref(),
        cli.transcript.as_deref(),
        &config.inputs,
    )?;
    print_inputs(&cli.topic, &input);

    let cancel = CancellationToken::new();
    let orchestrator = PipelineOrchestrator::from_config(&config, cancel.clone())
        .context("Failed to initialise agents")?;

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let request = match input.source {
        InputSource::Audio(path) => PipelineRequest::new(&cli.topic).with_audio(path),
        InputSource::Transcript(path) => PipelineRequest::new(&cli.topic).with_transcript(path),
    };

    match orchestrator.run(request).await {
        Ok(report) => {
            print_summary(&report);
            Ok(ExitCode::SUCCESS)
        }
        Err(PipelineError::Cancelled) => {
            println!("\n{}", "⚠️  Pipeline interrupted by user".yellow());
            Ok(ExitCode::from(INTERRUPTED_EXIT_CODE))
        }
        Err(err) => Err(err).context("Pipeline failed"),
    }
}

fn apply_overrides(cli: &Cli, config: &mut Config) {
    if let Some(output_dir) = &cli.output_dir {
        config.pipeline.output_dir = output_dir.clone();
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.pipeline.max_attempts = max_attempts;
    }
}

fn print_inputs(topic: &str, input: &ResolvedInput) {
    println!("\n{} {}", "📌 Topic:".bold().cyan(), topic);

    if input.unusual_format {
        println!(
            "{}",
            "⚠️  Warning: Unusual audio format. Supported: .mp3, .wav, .m4a".yellow()
        );
    }

    let (label, path) = match &input.source {
        InputSource::Audio(path) if input.auto_detected => ("🎧 Auto-detected audio file:", path),
        InputSource::Audio(path) => ("🎧 Using podcast audio file:", path),
        InputSource::Transcript(path) if input.auto_detected => ("📄 Auto-detected transcript:", path),
        InputSource::Transcript(path) => ("📄 Using podcast transcript file:", path),
    };
    println!("{} {}", label.cyan(), path.display());
}

fn print_summary(report: &PipelineReport) {
    for event in &report.events {
        debug!(?event, "pipeline event");
    }

    println!();
    for failure in &report.failures {
        println!(
            "{} {}",
            format!("Asset task #{} ({}) failed:", failure.index, failure.stage).red(),
            failure.error
        );
    }
    if !report.is_complete() {
        println!(
            "{}",
            format!(
                "⚠️  {} asset(s) failed. Check raw outputs for details.",
                report.failed
            )
            .yellow()
        );
    }

    println!("{}", "✅ Podcast lifecycle completed!".bold().green());
    println!(
        "Assets: {} succeeded, {} failed",
        report.succeeded.to_string().green(),
        report.failed.to_string().red()
    );
    println!("Final JSON outputs: {}", report.output_dir.display());
    println!("Raw agent traces: {}", report.raw_dir.display());
}
