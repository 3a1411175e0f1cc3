//! Live web search used by the travel agent to verify attractions, prices
//! and links.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::SearchSettings;

pub const MAX_SEARCH_RESULTS: u32 = 20;
const SNIPPET_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str, num_results: u32) -> Result<Vec<SearchHit>>;
}

/// Google results through SerpAPI.
#[derive(Debug, Clone)]
pub struct SerpApiSearch {
    http: Client,
    base_url: String,
    api_key: String,
}

impl SerpApiSearch {
    pub fn new(settings: &SearchSettings, timeout_secs: u64) -> Result<Self> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(anyhow!("Search base URL cannot be empty"));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build search HTTP client")?;

        Ok(Self {
            http,
            base_url,
            api_key: settings.api_key.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

#[async_trait]
impl WebSearch for SerpApiSearch {
    async fn search(&self, query: &str, num_results: u32) -> Result<Vec<SearchHit>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(anyhow!("Search query cannot be empty"));
        }

        let num = num_results.clamp(1, MAX_SEARCH_RESULTS);
        let num_param = num.to_string();
        debug!(query, num, "searching the web");

        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("num", num_param.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("Search request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(match status {
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                    anyhow!("Invalid SerpAPI key. Please check your SerpAPI key configuration.")
                }
                _ => anyhow!("SerpAPI error {}: {}", status, error_text),
            });
        }

        let payload: SerpApiResponse = response
            .json()
            .await
            .context("Failed to parse SerpAPI response JSON")?;

        if let Some(error) = payload.error {
            // SerpAPI reports "no results" as an error string with a 200 status.
            if error.contains("hasn't returned any results") {
                return Ok(Vec::new());
            }
            return Err(anyhow!("SerpAPI error: {}", error));
        }

        let hits = payload
            .organic_results
            .into_iter()
            .take(num as usize)
            .map(|result| SearchHit {
                title: result.title.unwrap_or_else(|| "(no title)".to_string()),
                link: result.link.unwrap_or_default(),
                snippet: result.snippet.unwrap_or_default(),
            })
            .collect::<Vec<_>>();

        debug!(hits = hits.len(), "search finished");
        Ok(hits)
    }
}

/// Renders hits as the numbered list handed back to the model.
pub fn format_hits(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "No results found".to_string();
    }

    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            format!(
                "{}. {}\n   {}\n   {}\n",
                i + 1,
                hit.title,
                hit.link,
                truncate(&hit.snippet, SNIPPET_LIMIT)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests;
