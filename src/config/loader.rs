use anyhow::{Context, Result};
use dirs::home_dir;
use std::{fs, path::Path};

use super::builder::ConfigBuilder;
use super::environment::apply_env_overrides;
use super::types::{FileConfig, LlmProvider};
use super::validation::validate;
use super::Config;

impl Config {
    pub fn config_path() -> Result<std::path::PathBuf> {
        let mut path = home_dir().context("Could not determine home directory")?;
        path.push(".podcast-automator/config");
        Ok(path)
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut builder = Self::builder();

        if path.exists() {
            builder = Self::apply_file(builder, &path)?;
        }

        builder = apply_env_overrides(builder)?;

        let config = builder.build()?;
        validate(&config)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate(self)
    }

    fn apply_file(builder: ConfigBuilder, path: &Path) -> Result<ConfigBuilder> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed reading config at {}", path.display()))?;

        if contents.trim().is_empty() {
            return Ok(builder);
        }

        let file: FileConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed parsing JSON config at {}", path.display()))?;

        file.apply(builder)
    }
}

impl FileConfig {
    pub fn apply(self, mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
        if let Some(llm) = self.llm {
            let provider = llm
                .provider
                .as_deref()
                .map(str::parse::<LlmProvider>)
                .transpose()?;
            builder = builder.with_llm(|settings| {
                if let Some(parsed) = provider {
                    if settings.provider != parsed {
                        settings.provider = parsed;
                        settings.base_url = parsed.default_base_url().to_string();
                    }
                }
                if let Some(api_key) = llm.api_key {
                    settings.api_key = api_key;
                }
                if let Some(timeout) = llm.timeout_secs {
                    settings.timeout_secs = timeout;
                }
                if let Some(base_url) = llm.base_url {
                    settings.base_url = base_url;
                }
                if let Some(user_agent) = llm.user_agent {
                    settings.user_agent = user_agent;
                }
            });
        }

        if let Some(models) = self.models {
            builder = builder.with_models(|settings| {
                if let Some(name) = models.name {
                    settings.name = name;
                }
                if let Some(max_tokens) = models.max_tokens {
                    settings.max_tokens = max_tokens;
                }
                if let Some(temperature) = models.temperature {
                    settings.temperature = temperature;
                }
            });
        }

        if let Some(pipeline) = self.pipeline {
            builder = builder.with_pipeline(|settings| {
                if let Some(output_dir) = pipeline.output_dir {
                    settings.output_dir = output_dir;
                }
                if let Some(max_attempts) = pipeline.max_attempts {
                    settings.max_attempts = max_attempts;
                }
                if let Some(backoff) = pipeline.backoff_base_secs {
                    settings.backoff_base_secs = backoff;
                }
                if let Some(sample) = pipeline.transcript_sample_chars {
                    settings.transcript_sample_chars = sample;
                }
                if let Some(session_id) = pipeline.session_id {
                    settings.session_id = session_id;
                }
            });
        }

        if let Some(inputs) = self.inputs {
            builder = builder.with_inputs(|settings| {
                if let Some(recordings) = inputs.recordings_dir {
                    settings.recordings_dir = recordings;
                }
                if let Some(transcripts) = inputs.transcripts_dir {
                    settings.transcripts_dir = transcripts;
                }
            });
        }

        if let Some(transcription) = self.transcription {
            builder = builder.with_transcription(|settings| {
                if let Some(base_url) = transcription.base_url {
                    settings.base_url = base_url;
                }
                if let Some(api_key) = transcription.api_key {
                    settings.api_key = api_key;
                }
                if let Some(model) = transcription.model {
                    settings.model = model;
                }
            });
        }

        Ok(builder)
    }
}
