use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmSettings,
    pub search: SearchSettings,
    pub agent: AgentSettings,
}

/// Connection settings for the OpenAI-compatible chat completions provider.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: String,
    pub timeout_secs: u64,
    pub base_url: String,
    pub user_agent: String,
}

/// Connection settings for the live web-search tool.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub api_key: String,
    pub base_url: String,
    pub max_results: u32,
}

#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub model: String,
    /// Context budget shared by the prompt and the completion.
    pub max_tokens: u32,
    pub max_tool_rounds: u32,
    pub show_tool_calls: bool,
    pub markdown: bool,
}

// File configuration types
#[derive(Debug, Default, Deserialize)]
pub(super) struct FileConfig {
    #[serde(default)]
    pub llm: FileLlmSettings,
    #[serde(default)]
    pub search: FileSearchSettings,
    #[serde(default)]
    pub agent: FileAgentSettings,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileLlmSettings {
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileSearchSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub max_results: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileAgentSettings {
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub max_tool_rounds: Option<u32>,
    pub show_tool_calls: Option<bool>,
    pub markdown: Option<bool>,
}

// Serialization helpers
#[derive(Serialize)]
pub(super) struct PersistedConfig<'a> {
    pub llm: PersistedLlm<'a>,
    pub search: PersistedSearch<'a>,
    pub agent: PersistedAgent<'a>,
}

#[derive(Serialize)]
pub(super) struct PersistedLlm<'a> {
    pub api_key: &'a str,
    pub timeout_secs: u64,
    pub base_url: &'a str,
    pub user_agent: &'a str,
}

#[derive(Serialize)]
pub(super) struct PersistedSearch<'a> {
    pub api_key: &'a str,
    pub base_url: &'a str,
    pub max_results: u32,
}

#[derive(Serialize)]
pub(super) struct PersistedAgent<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub max_tool_rounds: u32,
    pub show_tool_calls: bool,
    pub markdown: bool,
}

impl<'a> From<&'a Config> for PersistedConfig<'a> {
    fn from(config: &'a Config) -> Self {
        PersistedConfig {
            llm: PersistedLlm {
                api_key: &config.llm.api_key,
                timeout_secs: config.llm.timeout_secs,
                base_url: &config.llm.base_url,
                user_agent: &config.llm.user_agent,
            },
            search: PersistedSearch {
                api_key: &config.search.api_key,
                base_url: &config.search.base_url,
                max_results: config.search.max_results,
            },
            agent: PersistedAgent {
                model: &config.agent.model,
                max_tokens: config.agent.max_tokens,
                max_tool_rounds: config.agent.max_tool_rounds,
                show_tool_calls: config.agent.show_tool_calls,
                markdown: config.agent.markdown,
            },
        }
    }
}
