//! The travel agent: an LLM with a live web-search tool and a fixed set of
//! behavioural instructions.

mod tools;
mod travel;
mod types;

use anyhow::Result;
use async_trait::async_trait;

pub use travel::TravelAgent;
pub use types::AgentResponse;

/// Anything that can turn a prompt into a response. Session actions only
/// depend on this, so they run against stubs in tests.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn run(&self, prompt: &str) -> Result<AgentResponse>;
}
