use anyhow::Result;
use super::types::{AgentSettings, Config, LlmSettings, SearchSettings};

#[derive(Debug)]
pub struct ConfigBuilder {
    pub(super) llm: LlmSettings,
    pub(super) search: SearchSettings,
    pub(super) agent: AgentSettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            llm: LlmSettings::default(),
            search: SearchSettings::default(),
            agent: AgentSettings::default(),
        }
    }

    pub fn with_llm<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut LlmSettings),
    {
        update(&mut self.llm);
        self
    }

    pub fn with_search<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut SearchSettings),
    {
        update(&mut self.search);
        self
    }

    pub fn with_agent<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut AgentSettings),
    {
        update(&mut self.agent);
        self
    }

    pub fn build(self) -> Result<Config> {
        Ok(Config {
            llm: self.llm,
            search: self.search,
            agent: self.agent,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
