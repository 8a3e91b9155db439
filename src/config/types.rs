use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;
use serde::Deserialize;

use super::constants::{
    DEFAULT_CEREBRAS_BASE_URL, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENROUTER_BASE_URL,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmSettings,
    pub models: ModelSettings,
    pub pipeline: PipelineSettings,
    pub inputs: InputSettings,
    pub transcription: TranscriptionSettings,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub timeout_secs: u64,
    pub base_url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenRouter,
    Cerebras,
    OpenAi,
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::OpenRouter => write!(f, "openrouter"),
            LlmProvider::Cerebras => write!(f, "cerebras"),
            LlmProvider::OpenAi => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openrouter" => Ok(LlmProvider::OpenRouter),
            "cerebras" => Ok(LlmProvider::Cerebras),
            "openai" => Ok(LlmProvider::OpenAi),
            other => Err(anyhow!("Unknown LLM provider '{other}'")),
        }
    }
}

impl LlmProvider {
    pub fn default_base_url(self) -> &'static str {
        match self {
            LlmProvider::OpenRouter => DEFAULT_OPENROUTER_BASE_URL,
            LlmProvider::Cerebras => DEFAULT_CEREBRAS_BASE_URL,
            LlmProvider::OpenAi => DEFAULT_OPENAI_BASE_URL,
        }
    }

    pub fn api_key_env_var(self) -> &'static str {
        match self {
            LlmProvider::OpenRouter => "OPENROUTER_API_KEY",
            LlmProvider::Cerebras => "CEREBRAS_API_KEY",
            LlmProvider::OpenAi => "OPENAI_API_KEY",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LlmProvider::OpenRouter => "OpenRouter",
            LlmProvider::Cerebras => "Cerebras",
            LlmProvider::OpenAi => "OpenAI",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub name: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub output_dir: PathBuf,
    pub max_attempts: u32,
    pub backoff_base_secs: u64,
    pub transcript_sample_chars: usize,
    pub session_id: String,
}

impl PipelineSettings {
    pub fn backoff_base(&self) -> Duration {
        Duration::from_secs(self.backoff_base_secs)
    }
}

#[derive(Debug, Clone)]
pub struct InputSettings {
    pub recordings_dir: PathBuf,
    pub transcripts_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct TranscriptionSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

// File configuration types
#[derive(Debug, Default, Deserialize)]
pub(super) struct FileConfig {
    #[serde(default)]
    pub llm: Option<FileLlmSettings>,
    #[serde(default)]
    pub models: Option<FileModelSettings>,
    #[serde(default)]
    pub pipeline: Option<FilePipelineSettings>,
    #[serde(default)]
    pub inputs: Option<FileInputSettings>,
    #[serde(default)]
    pub transcription: Option<FileTranscriptionSettings>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FileLlmSettings {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FileModelSettings {
    pub name: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FilePipelineSettings {
    pub output_dir: Option<PathBuf>,
    pub max_attempts: Option<u32>,
    pub backoff_base_secs: Option<u64>,
    pub transcript_sample_chars: Option<usize>,
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FileInputSettings {
    pub recordings_dir: Option<PathBuf>,
    pub transcripts_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FileTranscriptionSettings {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
}
