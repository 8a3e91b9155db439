use super::constants::*;
use super::types::{
    InputSettings, LlmProvider, LlmSettings, ModelSettings, PipelineSettings,
    TranscriptionSettings,
};

pub fn default_user_agent() -> String {
    format!("podcast-automator/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for LlmSettings {
    fn default() -> Self {
        let provider = LlmProvider::OpenRouter;
        Self {
            provider,
            api_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: provider.default_base_url().to_string(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            output_dir: DEFAULT_OUTPUT_DIR.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_base_secs: DEFAULT_BACKOFF_BASE_SECS,
            transcript_sample_chars: DEFAULT_TRANSCRIPT_SAMPLE_CHARS,
            session_id: DEFAULT_SESSION_ID.to_string(),
        }
    }
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            recordings_dir: DEFAULT_RECORDINGS_DIR.into(),
            transcripts_dir: DEFAULT_TRANSCRIPTS_DIR.into(),
        }
    }
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
        }
    }
}
