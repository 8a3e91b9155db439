use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::config::InputSettings;

pub(crate) const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputSource {
    Audio(PathBuf),
    Transcript(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedInput {
    pub source: InputSource,
    pub auto_detected: bool,
    /// Explicit audio whose extension is not one of [`AUDIO_EXTENSIONS`].
    pub unusual_format: bool,
}

/// Picks the run input.
///
/// Priority: explicit audio, audio in the recordings directory, explicit
/// transcript, `.txt` in the transcripts directory. Directory scans take the
/// first matching name in sorted order.
pub(crate) fn detect_inputs(
    audio: Option<&Path>,
    transcript: Option<&Path>,
    dirs: &InputSettings,
) -> Result<ResolvedInput> {
    if let Some(audio) = audio {
        if !audio.exists() {
            bail!("Audio file not found: {}", audio.display());
        }
        return Ok(ResolvedInput {
            source: InputSource::Audio(audio.to_path_buf()),
            auto_detected: false,
            unusual_format: !has_extension(audio, AUDIO_EXTENSIONS),
        });
    }

    if let Some(found) = first_matching(&dirs.recordings_dir, AUDIO_EXTENSIONS) {
        return Ok(ResolvedInput {
            source: InputSource::Audio(found),
            auto_detected: true,
            unusual_format: false,
        });
    }

    if let Some(transcript) = transcript {
        if !transcript.exists() {
            bail!("Transcript file not found: {}", transcript.display());
        }
        return Ok(ResolvedInput {
            source: InputSource::Transcript(transcript.to_path_buf()),
            auto_detected: false,
            unusual_format: false,
        });
    }

    if let Some(found) = first_matching(&dirs.transcripts_dir, &["txt"]) {
        return Ok(ResolvedInput {
            source: InputSource::Transcript(found),
            auto_detected: true,
            unusual_format: false,
        });
    }

    bail!(
        "No podcast audio or transcript found. Provide --audio or --transcript, \
         add audio files to {}, or add transcript files to {}",
        dirs.recordings_dir.display(),
        dirs.transcripts_dir.display()
    )
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed)))
}

fn first_matching(dir: &Path, extensions: &[&str]) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_extension(path, extensions))
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}
