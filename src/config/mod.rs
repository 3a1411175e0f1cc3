//! Configuration for the roam travel planner.
//!
//! Settings are layered in this order, later layers winning:
//! - built-in defaults
//! - the JSON file at `~/.roam/config`
//! - environment variables (`GROQ_API_KEY`, `SERP_API_KEY`, `ROAM_*`)
//! - command-line overrides applied through [`ConfigBuilder`]
//!
//! Credentials travel inside [`Config`] and are handed to the agent and the
//! search tool explicitly; nothing here writes to the process environment.

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

pub use builder::ConfigBuilder;
pub use constants::{GROQ_API_KEY_ENV, SERP_API_KEY_ENV};
pub use types::{AgentSettings, Config, LlmSettings, SearchSettings};
