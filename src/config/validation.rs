use anyhow::{Result, anyhow, bail};

use super::constants::{GROQ_API_KEY_ENV, SERP_API_KEY_ENV};
use super::types::Config;

pub fn validate(config: &Config) -> Result<()> {
    if config.llm.api_key.trim().is_empty() {
        return Err(anyhow!(
            "Groq API key not found. Set {}, pass --groq-api-key, or add it to {}",
            GROQ_API_KEY_ENV,
            Config::config_path()?.display()
        ));
    }

    if config.search.api_key.trim().is_empty() {
        return Err(anyhow!(
            "SerpAPI key not found. Set {}, pass --serpapi-key, or add it to {}",
            SERP_API_KEY_ENV,
            Config::config_path()?.display()
        ));
    }

    if config.llm.timeout_secs == 0 {
        bail!("Timeout must be greater than zero seconds");
    }

    if config.agent.model.trim().is_empty() {
        bail!("Model identifier cannot be empty");
    }

    Ok(())
}
