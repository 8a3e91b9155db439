use anyhow::{Result, anyhow, bail};

use super::types::Config;

pub fn validate(config: &Config) -> Result<()> {
    if config.llm.api_key.trim().is_empty() {
        let provider = config.llm.provider;
        return Err(anyhow!(
            "{} API key not found. Set {} or add it to {}",
            provider.display_name(),
            provider.api_key_env_var(),
            Config::config_path()?.display()
        ));
    }

    if config.pipeline.max_attempts == 0 {
        bail!("pipeline.max_attempts must be at least 1");
    }

    Ok(())
}
