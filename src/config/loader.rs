use anyhow::{Context, Result};
use dirs::home_dir;
use std::{fs, path::Path};
use tracing::debug;

use super::builder::ConfigBuilder;
use super::environment::apply_env_overrides;
use super::types::{FileConfig, PersistedConfig};
use super::validation::validate;
use super::Config;

impl Config {
    pub fn config_path() -> Result<std::path::PathBuf> {
        let mut path = home_dir().context("Could not determine home directory")?;
        path.push(".roam/config");
        Ok(path)
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Loads defaults, file and environment, then applies `overrides` before
    /// validating. Command-line flags go through `overrides`.
    pub fn load_with<F>(overrides: F) -> Result<Self>
    where
        F: FnOnce(ConfigBuilder) -> ConfigBuilder,
    {
        let config = Self::resolve(overrides)?;
        validate(&config)?;
        Ok(config)
    }

    /// Same layering as [`Config::load_with`] but without validation, for
    /// callers that can still fill in missing keys or that edit the file.
    pub fn resolve<F>(overrides: F) -> Result<Self>
    where
        F: FnOnce(ConfigBuilder) -> ConfigBuilder,
    {
        overrides(Self::layered()?).build()
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Unable to create config directory {}", parent.display())
            })?;
        }

        let payload = PersistedConfig::from(self);
        let json = serde_json::to_string_pretty(&payload)
            .context("Failed to serialize configuration to JSON")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        validate(self)
    }

    fn layered() -> Result<ConfigBuilder> {
        let path = Self::config_path()?;
        let mut builder = Self::builder();

        if path.exists() {
            builder = Self::apply_file(builder, &path)?;
        }

        apply_env_overrides(builder)
    }

    fn apply_file(builder: ConfigBuilder, path: &Path) -> Result<ConfigBuilder> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed reading config at {}", path.display()))?;

        if contents.trim().is_empty() {
            return Ok(builder);
        }

        let file: FileConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed parsing JSON config at {}", path.display()))?;
        debug!(path = %path.display(), "applying config file");

        Ok(file.apply(builder))
    }
}

impl FileConfig {
    pub fn apply(self, builder: ConfigBuilder) -> ConfigBuilder {
        let FileConfig { llm, search, agent } = self;

        builder
            .with_llm(|settings| {
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
            })
            .with_search(|settings| {
                if let Some(api_key) = search.api_key {
                    settings.api_key = api_key;
                }
                if let Some(base_url) = search.base_url {
                    settings.base_url = base_url;
                }
                if let Some(max_results) = search.max_results {
                    settings.max_results = max_results;
                }
            })
            .with_agent(|settings| {
                if let Some(model) = agent.model {
                    settings.model = model;
                }
                if let Some(max_tokens) = agent.max_tokens {
                    settings.max_tokens = max_tokens;
                }
                if let Some(rounds) = agent.max_tool_rounds {
                    settings.max_tool_rounds = rounds;
                }
                if let Some(show) = agent.show_tool_calls {
                    settings.show_tool_calls = show;
                }
                if let Some(markdown) = agent.markdown {
                    settings.markdown = markdown;
                }
            })
    }
}
