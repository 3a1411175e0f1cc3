use anyhow::{anyhow, Result, Context};
use std::env;

use super::builder::ConfigBuilder;
use super::constants::{GROQ_API_KEY_ENV, SERP_API_KEY_ENV};

pub fn apply_env_overrides(mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
    if let Some(api_key) = env_string(GROQ_API_KEY_ENV)? {
        builder = builder.with_llm(|llm| llm.api_key = api_key);
    }

    if let Some(base_url) = env_string("ROAM_LLM_BASE_URL")? {
        builder = builder.with_llm(|llm| llm.base_url = base_url);
    }

    if let Some(timeout) = env_u64("ROAM_TIMEOUT_SECS")? {
        builder = builder.with_llm(|llm| llm.timeout_secs = timeout);
    }

    if let Some(api_key) = env_string(SERP_API_KEY_ENV)? {
        builder = builder.with_search(|search| search.api_key = api_key);
    }

    if let Some(base_url) = env_string("ROAM_SEARCH_BASE_URL")? {
        builder = builder.with_search(|search| search.base_url = base_url);
    }

    if let Some(model) = env_string("ROAM_MODEL")? {
        builder = builder.with_agent(|agent| agent.model = model);
    }

    if let Some(max_tokens) = env_u32("ROAM_MAX_TOKENS")? {
        builder = builder.with_agent(|agent| agent.max_tokens = max_tokens);
    }

    if let Some(rounds) = env_u32("ROAM_MAX_TOOL_ROUNDS")? {
        builder = builder.with_agent(|agent| agent.max_tool_rounds = rounds);
    }

    Ok(builder)
}

pub fn env_string(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) if val.trim().is_empty() => Ok(None),
        Ok(val) => Ok(Some(val.trim().to_string())),
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
