use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::client::{AIClient, ChatCompletionRequest, ChatMessage, DynLlmClient};
use crate::config::Config;
use crate::search::{SerpApiSearch, WebSearch};
use crate::tokens::compute_completion_token_budget;

use super::Agent;
use super::tools::{execute_tool_call, search_tool_definition};
use super::types::{AgentConfig, AgentResponse, ToolCallRecord};

/// LLM agent that may call the web-search tool before answering.
pub struct TravelAgent {
    config: AgentConfig,
    llm: Arc<DynLlmClient>,
    search: Arc<dyn WebSearch>,
}

impl TravelAgent {
    pub fn new(config: AgentConfig, llm: Arc<DynLlmClient>, search: Arc<dyn WebSearch>) -> Self {
        Self {
            config,
            llm,
            search,
        }
    }

    /// Wires the Groq client and SerpAPI search from explicit credentials.
    pub fn from_config(config: &Config) -> Result<Self> {
        let llm = AIClient::new(&config.llm)?;
        let search = SerpApiSearch::new(&config.search, config.llm.timeout_secs)?;
        Ok(Self::new(
            AgentConfig::travel_planner(&config.agent, &config.search),
            Arc::new(llm),
            Arc::new(search),
        ))
    }

    fn request(&self, messages: &[ChatMessage], allow_tools: bool) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: messages.to_vec(),
            max_tokens: Some(compute_completion_token_budget(self.config.max_tokens, messages)),
            temperature: None,
            tools: if allow_tools {
                vec![search_tool_definition()]
            } else {
                Vec::new()
            },
            tool_choice: allow_tools.then(|| "auto".to_string()),
        }
    }

    fn finish(
        &self,
        content: Option<String>,
        tool_calls: Vec<ToolCallRecord>,
        model: Option<String>,
    ) -> AgentResponse {
        let content = content
            .filter(|text| !text.trim().is_empty())
            .map(|text| {
                if self.config.show_tool_calls && !tool_calls.is_empty() {
                    let running = tool_calls
                        .iter()
                        .map(|call| format!(" - {call}"))
                        .collect::<Vec<_>>()
                        .join("\n");
                    format!("Running:\n{running}\n\n{text}")
                } else {
                    text
                }
            });

        AgentResponse {
            content,
            tool_calls,
            model,
        }
    }
}

#[async_trait]
impl Agent for TravelAgent {
    async fn run(&self, prompt: &str) -> Result<AgentResponse> {
        let mut messages = vec![
            ChatMessage::system(self.config.system_message()),
            ChatMessage::user(prompt),
        ];
        let mut records: Vec<ToolCallRecord> = Vec::new();
        let mut model: Option<String> = None;
        let mut round = 0u32;

        loop {
            // The last round withholds the tool so the model has to answer.
            let allow_tools = round < self.config.max_tool_rounds;
            let request = self.request(&messages, allow_tools);
            debug!(round, allow_tools, max_tokens = ?request.max_tokens, "agent round");

            let response = self
                .llm
                .chat_completion(request)
                .await
                .context("Travel agent call failed")?;

            if let Some(usage) = &response.usage {
                debug!(
                    prompt_tokens = usage.prompt_tokens,
                    completion_tokens = usage.completion_tokens,
                    total_tokens = usage.total_tokens,
                    "token usage"
                );
            }
            if response.model.is_some() {
                model = response.model;
            }

            let choice = response
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("Travel agent returned no choices"))?;
            debug!(finish_reason = ?choice.finish_reason, "agent round finished");
            let message = choice.message;

            let calls = match message.tool_calls {
                Some(calls) if allow_tools && !calls.is_empty() => calls,
                _ => {
                    info!(tool_calls = records.len(), rounds = round + 1, "agent finished");
                    return Ok(self.finish(message.content, records, model));
                }
            };

            messages.push(ChatMessage::assistant_tool_calls(message.content, calls.clone()));
            for call in &calls {
                let (output, succeeded) =
                    execute_tool_call(self.search.as_ref(), call, self.config.search_results).await;
                records.push(ToolCallRecord {
                    name: call.function.name.clone(),
                    arguments: call.function.arguments.clone(),
                    succeeded,
                });
                messages.push(ChatMessage::tool_result(call.id.clone(), output));
            }

            round += 1;
        }
    }
}
