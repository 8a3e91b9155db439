use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{Client, multipart};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::config::TranscriptionSettings;

use super::ToolResult;

/// Turns an audio file into transcript text.
///
/// Implementations may block; callers run them on a blocking worker thread.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, path: &Path) -> ToolResult;
}

/// Transcriber backed by an OpenAI-compatible `/audio/transcriptions` endpoint.
pub struct WhisperTranscriber {
    settings: TranscriptionSettings,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl WhisperTranscriber {
    pub fn new(settings: TranscriptionSettings, timeout: Duration) -> Self {
        Self { settings, timeout }
    }
}

impl Transcriber for WhisperTranscriber {
    fn transcribe(&self, path: &Path) -> ToolResult {
        if self.settings.api_key.trim().is_empty() {
            return ToolResult::failure(
                "Transcription API key not set. Set PODCAST_TRANSCRIPTION_API_KEY or OPENAI_API_KEY.",
            );
        }

        let client = match Client::builder().timeout(self.timeout).build() {
            Ok(client) => client,
            Err(err) => return ToolResult::failure(format!("Failed to create HTTP client: {err}")),
        };

        let form = match multipart::Form::new()
            .text("model", self.settings.model.clone())
            .file("file", path)
        {
            Ok(form) => form,
            Err(err) => return ToolResult::failure(format!("Error uploading file: {err}")),
        };

        info!(path = %path.display(), model = %self.settings.model, "uploading audio for transcription");
        let url = format!(
            "{}/audio/transcriptions",
            self.settings.base_url.trim_end_matches('/')
        );
        let response = match client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .multipart(form)
            .send()
        {
            Ok(response) => response,
            Err(err) => return ToolResult::failure(format!("Error generating transcript: {err}")),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return ToolResult::failure(format!(
                "Transcription request failed (status {status}): {body}"
            ));
        }

        let parsed: TranscriptionResponse = match response.json() {
            Ok(parsed) => parsed,
            Err(err) => {
                return ToolResult::failure(format!("Failed to parse transcription response: {err}"));
            }
        };

        if parsed.text.trim().is_empty() {
            return ToolResult::failure("No transcript text returned from model.");
        }

        ToolResult::success(json!({"transcript": parsed.text}))
            .with_meta("source", path.display().to_string())
            .with_meta("model", self.settings.model.clone())
    }
}
