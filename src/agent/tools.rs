use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::client::{ToolCall, ToolDefinition};
use crate::search::{MAX_SEARCH_RESULTS, WebSearch, format_hits};

pub const SEARCH_TOOL_NAME: &str = "search_google";

pub fn search_tool_definition() -> ToolDefinition {
    ToolDefinition::function(
        SEARCH_TOOL_NAME,
        "Search Google for up-to-date information on attractions, restaurants, \
         accommodation, transport, opening hours and prices. Returns titles, links and snippets.",
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                },
                "num_results": {
                    "type": "integer",
                    "description": format!("Number of results to return (1-{MAX_SEARCH_RESULTS})")
                }
            },
            "required": ["query"]
        }),
    )
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    num_results: Option<u32>,
}

/// Runs one tool call and returns the text handed back to the model along
/// with whether it succeeded. Failures are reported to the model, not raised.
pub(super) async fn execute_tool_call(
    search: &dyn WebSearch,
    call: &ToolCall,
    default_results: u32,
) -> (String, bool) {
    if call.function.name != SEARCH_TOOL_NAME {
        warn!(tool = %call.function.name, "model requested an unknown tool");
        return (format!("Error: unknown tool '{}'", call.function.name), false);
    }

    let args: SearchArgs = match serde_json::from_str(&call.function.arguments) {
        Ok(args) => args,
        Err(err) => {
            warn!(arguments = %call.function.arguments, "invalid search arguments");
            return (format!("Error: invalid arguments for {SEARCH_TOOL_NAME}: {err}"), false);
        }
    };

    let num_results = args.num_results.unwrap_or(default_results);
    match search.search(&args.query, num_results).await {
        Ok(hits) => {
            debug!(query = %args.query, hits = hits.len(), "search tool call finished");
            (format_hits(&hits), true)
        }
        Err(err) => {
            warn!(query = %args.query, error = %err, "search tool call failed");
            (format!("Error: {err}"), false)
        }
    }
}
