use super::constants::*;
use super::types::{AgentSettings, LlmSettings, SearchSettings};

pub fn default_user_agent() -> String {
    format!("roam/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_SERPAPI_BASE_URL.to_string(),
            max_results: DEFAULT_SEARCH_RESULTS,
        }
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            show_tool_calls: true,
            markdown: true,
        }
    }
}
