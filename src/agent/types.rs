use std::fmt;

use crate::config::{AgentSettings, SearchSettings};
use crate::planner::{AGENT_INSTRUCTIONS, AGENT_NAME};

/// Immutable agent setup, built once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub name: String,
    pub model: String,
    pub instructions: Vec<String>,
    pub show_tool_calls: bool,
    pub markdown: bool,
    pub max_tokens: u32,
    pub max_tool_rounds: u32,
    pub search_results: u32,
}

impl AgentConfig {
    pub fn travel_planner(agent: &AgentSettings, search: &SearchSettings) -> Self {
        Self {
            name: AGENT_NAME.to_string(),
            model: agent.model.clone(),
            instructions: AGENT_INSTRUCTIONS.iter().map(|s| s.to_string()).collect(),
            show_tool_calls: agent.show_tool_calls,
            markdown: agent.markdown,
            max_tokens: agent.max_tokens,
            max_tool_rounds: agent.max_tool_rounds,
            search_results: search.max_results,
        }
    }

    pub fn system_message(&self) -> String {
        let mut message = format!("You are {}.\n\n## Instructions\n", self.name);
        for instruction in &self.instructions {
            message.push_str("- ");
            message.push_str(instruction);
            message.push('\n');
        }
        if self.markdown {
            message.push_str("- Use markdown to format your answers.\n");
        }
        message
    }
}

/// One tool invocation made while answering a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallRecord {
    pub name: String,
    pub arguments: String,
    pub succeeded: bool,
}

impl fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(&self.arguments)
            .map(|map| {
                map.iter()
                    .map(|(key, value)| match value {
                        serde_json::Value::String(s) => format!("{key}={s}"),
                        other => format!("{key}={other}"),
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_else(|_| self.arguments.clone());
        write!(f, "{}({})", self.name, args)?;
        if !self.succeeded {
            f.write_str(" [failed]")?;
        }
        Ok(())
    }
}

/// What the agent produced. `content` may be absent; the `Display` impl is
/// the text fallback for that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentResponse {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCallRecord>,
    pub model: Option<String>,
}

impl AgentResponse {
    #[cfg(test)]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
            model: None,
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

impl fmt::Display for AgentResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(content) = &self.content {
            return f.write_str(content);
        }

        write!(
            f,
            "The agent returned no text (model: {}, tool calls: {})",
            self.model.as_deref().unwrap_or("unknown"),
            self.tool_calls.len()
        )
    }
}
