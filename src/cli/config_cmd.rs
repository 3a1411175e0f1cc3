use anyhow::{Result, bail};
use std::io::{self, Write};

use crate::config::Config;
use crate::search::MAX_SEARCH_RESULTS;

use super::args::ConfigArgs;
use super::util::mask_api_key;

pub(crate) fn handle_config(args: &ConfigArgs) -> Result<()> {
    let mut config = Config::resolve(|builder| builder)?;
    let mut out = io::stdout();

    if args.has_changes() {
        apply_changes(args, &mut config)?;
        config.save()?;
        writeln!(
            out,
            "✅ Configuration saved to {}",
            Config::config_path()?.display()
        )?;
    }

    print_summary(&mut out, &config)
}

fn apply_changes(args: &ConfigArgs, config: &mut Config) -> Result<()> {
    if let Some(ref api_key) = args.groq_api_key {
        config.llm.api_key = api_key.trim().to_string();
    }

    if let Some(ref api_key) = args.serpapi_key {
        config.search.api_key = api_key.trim().to_string();
    }

    if let Some(ref model) = args.model {
        if model.trim().is_empty() {
            bail!("Model identifier cannot be empty");
        }
        config.agent.model = model.trim().to_string();
    }

    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            bail!("Timeout must be greater than zero seconds");
        }
        config.llm.timeout_secs = timeout;
    }

    if let Some(max_tokens) = args.max_tokens {
        config.agent.max_tokens = max_tokens;
    }

    if let Some(rounds) = args.max_tool_rounds {
        config.agent.max_tool_rounds = rounds;
    }

    if let Some(results) = args.search_results {
        if !(1..=MAX_SEARCH_RESULTS).contains(&results) {
            bail!("Search results must be between 1 and {MAX_SEARCH_RESULTS}");
        }
        config.search.max_results = results;
    }

    if let Some(show) = args.show_tool_calls {
        config.agent.show_tool_calls = show;
    }

    Ok(())
}

pub(crate) fn print_summary<W: Write>(out: &mut W, config: &Config) -> Result<()> {
    writeln!(out, "📋 Current configuration:")?;
    writeln!(out, "   Groq API Key: {}", mask_api_key(&config.llm.api_key))?;
    writeln!(out, "   SerpAPI Key: {}", mask_api_key(&config.search.api_key))?;
    writeln!(out, "   Base URL: {}", config.llm.base_url)?;
    writeln!(out, "   Timeout: {}s", config.llm.timeout_secs)?;
    writeln!(out, "   Model: {}", config.agent.model)?;
    writeln!(out, "   Max Tokens: {}", config.agent.max_tokens)?;
    writeln!(out, "   Max Tool Rounds: {}", config.agent.max_tool_rounds)?;
    writeln!(out, "   Search Results: {}", config.search.max_results)?;
    writeln!(out, "   Show Tool Calls: {}", config.agent.show_tool_calls)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ConfigArgs {
        ConfigArgs {
            groq_api_key: None,
            serpapi_key: None,
            model: None,
            timeout: None,
            max_tokens: None,
            max_tool_rounds: None,
            search_results: None,
            show_tool_calls: None,
        }
    }

    #[test]
    fn apply_changes_sets_only_given_fields() {
        let mut config = Config::builder().build().unwrap();
        let before = config.clone();
        let args = ConfigArgs {
            groq_api_key: Some("  gsk_cli  ".into()),
            timeout: Some(45),
            show_tool_calls: Some(false),
            ..args()
        };

        apply_changes(&args, &mut config).unwrap();

        assert_eq!(config.llm.api_key, "gsk_cli");
        assert_eq!(config.llm.timeout_secs, 45);
        assert!(!config.agent.show_tool_calls);
        assert_eq!(config.agent.model, before.agent.model);
        assert_eq!(config.search.max_results, before.search.max_results);
    }

    #[test]
    fn apply_changes_rejects_bad_values() {
        let mut config = Config::builder().build().unwrap();

        let zero_timeout = ConfigArgs {
            timeout: Some(0),
            ..args()
        };
        assert!(apply_changes(&zero_timeout, &mut config).is_err());

        let too_many = ConfigArgs {
            search_results: Some(50),
            ..args()
        };
        let err = apply_changes(&too_many, &mut config).unwrap_err();
        assert!(err.to_string().contains("between 1 and 20"));
    }

    #[test]
    fn summary_masks_keys() {
        let config = Config::builder()
            .with_llm(|llm| llm.api_key = "gsk_abcdefghijklmnop".into())
            .build()
            .unwrap();
        let mut out = Vec::new();

        print_summary(&mut out, &config).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Groq API Key: gsk_abcd***"));
        assert!(text.contains("SerpAPI Key: (not set)"));
        assert!(!text.contains("ijklmnop"));
    }
}
