use anyhow::{Context, Result, anyhow};
use std::env;

use super::builder::ConfigBuilder;
use super::types::LlmProvider;

pub fn apply_env_overrides(mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
    if let Some(provider_raw) = env_string("PODCAST_PROVIDER")? {
        let provider = provider_raw
            .parse::<LlmProvider>()
            .with_context(|| format!("Failed to parse PODCAST_PROVIDER value '{provider_raw}'"))?;
        builder = builder.with_llm(|llm| {
            if llm.provider != provider {
                llm.provider = provider;
                llm.base_url = provider.default_base_url().to_string();
            }
        });
    }

    if let Some(base_url) = env_string("PODCAST_LLM_BASE_URL")? {
        builder = builder.with_llm(|llm| llm.base_url = base_url);
    }

    for provider in [
        LlmProvider::OpenRouter,
        LlmProvider::Cerebras,
        LlmProvider::OpenAi,
    ] {
        if let Some(api_key) = env_string(provider.api_key_env_var())? {
            builder = builder.with_llm(|llm| {
                if llm.provider == provider {
                    llm.api_key = api_key;
                }
            });
        }
    }

    if let Some(timeout) = env_u64("PODCAST_TIMEOUT_SECS")? {
        builder = builder.with_llm(|llm| llm.timeout_secs = timeout);
    }

    if let Some(model) = env_string("PODCAST_MODEL")? {
        builder = builder.with_models(|models| models.name = model);
    }

    if let Some(max_tokens) = env_u32("PODCAST_MAX_TOKENS")? {
        builder = builder.with_models(|models| models.max_tokens = max_tokens);
    }

    if let Some(output_dir) = env_string("PODCAST_OUTPUT_DIR")? {
        builder = builder.with_pipeline(|pipeline| pipeline.output_dir = output_dir.into());
    }

    if let Some(max_attempts) = env_u32("PODCAST_MAX_ATTEMPTS")? {
        builder = builder.with_pipeline(|pipeline| pipeline.max_attempts = max_attempts);
    }

    if let Some(backoff) = env_u64("PODCAST_BACKOFF_SECS")? {
        builder = builder.with_pipeline(|pipeline| pipeline.backoff_base_secs = backoff);
    }

    if let Some(session_id) = env_string("PODCAST_SESSION_ID")? {
        builder = builder.with_pipeline(|pipeline| pipeline.session_id = session_id);
    }

    let transcription_key = match env_string("PODCAST_TRANSCRIPTION_API_KEY")? {
        Some(key) => Some(key),
        None => env_string("OPENAI_API_KEY")?,
    };
    if let Some(api_key) = transcription_key {
        builder = builder.with_transcription(|transcription| transcription.api_key = api_key);
    }

    if let Some(model) = env_string("PODCAST_TRANSCRIPTION_MODEL")? {
        builder = builder.with_transcription(|transcription| transcription.model = model);
    }

    Ok(builder)
}

pub fn env_string(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(anyhow!("{key} contains invalid UTF-8")),
    }
}

pub fn env_u64(key: &str) -> Result<Option<u64>> {
    if let Some(value) = env_string(key)? {
        let parsed = value
            .parse::<u64>()
            .with_context(|| format!("Failed to parse {key} as u64"))?;
        Ok(Some(parsed))
    } else {
        Ok(None)
    }
}

pub fn env_u32(key: &str) -> Result<Option<u32>> {
    if let Some(value) = env_string(key)? {
        let parsed = value
            .parse::<u32>()
            .with_context(|| format!("Failed to parse {key} as u32"))?;
        Ok(Some(parsed))
    } else {
        Ok(None)
    }
}
