use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use crate::config::InputSettings;

use super::Cli;
use super::inputs::{InputSource, detect_inputs};

fn input_dirs(root: &Path) -> InputSettings {
    let settings = InputSettings {
        recordings_dir: root.join("podcast_recordings"),
        transcripts_dir: root.join("test_data"),
    };
    std::fs::create_dir_all(&settings.recordings_dir).unwrap();
    std::fs::create_dir_all(&settings.transcripts_dir).unwrap();
    settings
}

fn touch(path: &Path) {
    std::fs::write(path, b"data").unwrap();
}

#[test]
fn explicit_audio_wins_over_everything() {
    let root = TempDir::new().unwrap();
    let dirs = input_dirs(root.path());
    touch(&dirs.recordings_dir.join("a.mp3"));
    let audio = root.path().join("episode.WAV");
    touch(&audio);
    let transcript = root.path().join("episode.txt");
    touch(&transcript);

    let resolved = detect_inputs(Some(&audio), Some(&transcript), &dirs).unwrap();
    assert_eq!(resolved.source, InputSource::Audio(audio));
    assert!(!resolved.auto_detected);
    assert!(!resolved.unusual_format);
}

#[test]
fn explicit_audio_must_exist() {
    let root = TempDir::new().unwrap();
    let dirs = input_dirs(root.path());
    let missing = root.path().join("missing.mp3");

    let err = detect_inputs(Some(&missing), None, &dirs).unwrap_err();
    assert!(err.to_string().contains("Audio file not found"));
}

#[test]
fn unusual_audio_extension_is_flagged() {
    let root = TempDir::new().unwrap();
    let dirs = input_dirs(root.path());
    let audio = root.path().join("episode.ogg");
    touch(&audio);

    let resolved = detect_inputs(Some(&audio), None, &dirs).unwrap();
    assert!(resolved.unusual_format);
}

#[test]
fn recordings_dir_beats_explicit_transcript() {
    let root = TempDir::new().unwrap();
    let dirs = input_dirs(root.path());
    touch(&dirs.recordings_dir.join("b.m4a"));
    touch(&dirs.recordings_dir.join("a.mp3"));
    touch(&dirs.recordings_dir.join("notes.txt"));
    let transcript = root.path().join("episode.txt");
    touch(&transcript);

    let resolved = detect_inputs(None, Some(&transcript), &dirs).unwrap();
    assert_eq!(
        resolved.source,
        InputSource::Audio(dirs.recordings_dir.join("a.mp3"))
    );
    assert!(resolved.auto_detected);
}

#[test]
fn explicit_transcript_beats_transcripts_dir() {
    let root = TempDir::new().unwrap();
    let dirs = input_dirs(root.path());
    touch(&dirs.transcripts_dir.join("auto.txt"));
    let transcript = root.path().join("episode.txt");
    touch(&transcript);

    let resolved = detect_inputs(None, Some(&transcript), &dirs).unwrap();
    assert_eq!(resolved.source, InputSource::Transcript(transcript));
    assert!(!resolved.auto_detected);
}

#[test]
fn explicit_transcript_must_exist() {
    let root = TempDir::new().unwrap();
    let dirs = input_dirs(root.path());

    let err = detect_inputs(None, Some(&root.path().join("nope.txt")), &dirs).unwrap_err();
    assert!(err.to_string().contains("Transcript file not found"));
}

#[test]
fn first_sorted_transcript_is_auto_detected() {
    let root = TempDir::new().unwrap();
    let dirs = input_dirs(root.path());
    touch(&dirs.transcripts_dir.join("b.txt"));
    touch(&dirs.transcripts_dir.join("a.txt"));
    touch(&dirs.transcripts_dir.join("0.md"));

    let resolved = detect_inputs(None, None, &dirs).unwrap();
    assert_eq!(
        resolved.source,
        InputSource::Transcript(dirs.transcripts_dir.join("a.txt"))
    );
    assert!(resolved.auto_detected);
}

#[test]
fn missing_inputs_is_an_error() {
    let root = TempDir::new().unwrap();
    let dirs = InputSettings {
        recordings_dir: root.path().join("absent_recordings"),
        transcripts_dir: root.path().join("absent_transcripts"),
    };

    let err = detect_inputs(None, None, &dirs).unwrap_err();
    assert!(err.to_string().contains("No podcast audio or transcript found"));
}

#[test]
fn cli_parses_flags() {
    let cli = Cli::try_parse_from([
        "podcast-automator",
        "--topic",
        "AI in Healthcare",
        "--transcript",
        "test_data/episode.txt",
        "--max-attempts",
        "5",
        "-o",
        "out",
        "-v",
    ])
    .unwrap();

    assert_eq!(cli.topic, "AI in Healthcare");
    assert_eq!(cli.max_attempts, Some(5));
    assert_eq!(cli.output_dir.as_deref(), Some(Path::new("out")));
    assert!(cli.verbose);
    assert!(cli.audio.is_none());
}

#[test]
fn cli_requires_topic_and_positive_attempts() {
    assert!(Cli::try_parse_from(["podcast-automator"]).is_err());
    assert!(
        Cli::try_parse_from(["podcast-automator", "--topic", "t", "--max-attempts", "0"]).is_err()
    );
}
