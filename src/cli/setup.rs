use anyhow::Result;
use std::io::{BufRead, Write};

use crate::config::Config;

use super::config_cmd::print_summary;
use super::util::Prompter;

pub(crate) fn run_setup() -> Result<()> {
    let mut prompter = Prompter::stdio();
    let out = prompter.output();
    writeln!(out, "🚀 Welcome to roam setup!")?;
    writeln!(out, "Let's configure your Groq and SerpAPI access.\n")?;

    let config = configure(&mut prompter, Config::resolve(|builder| builder)?)?;
    config.validate()?;
    config.save()?;

    let out = prompter.output();
    writeln!(
        out,
        "\n✅ Configuration saved to {}",
        Config::config_path()?.display()
    )?;
    print_summary(out, &config)?;
    writeln!(out, "\n🎉 Setup complete! Start planning with:")?;
    writeln!(out, "   roam                                   # interactive session")?;
    writeln!(out, "   roam plan -d Lisbon --days 4 --yes     # one-shot itinerary")?;

    Ok(())
}

/// Walks through every setting, offering the current value as the default.
fn configure<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    mut config: Config,
) -> Result<Config> {
    config.llm.api_key = prompter.secret("🔑 Enter your Groq API Key", &config.llm.api_key)?;
    config.search.api_key =
        prompter.secret("🔑 Enter your SerpAPI Key", &config.search.api_key)?;
    config.llm.timeout_secs =
        prompter.u64_positive("⏱️  Enter timeout in seconds", config.llm.timeout_secs)?;
    config.agent.model = prompter.string_with_default("🤖 Model ID", &config.agent.model)?;
    config.agent.show_tool_calls = prompter.yes_no(
        "🔍 Show the web searches the agent runs above each answer?",
        config.agent.show_tool_calls,
    )?;

    Ok(config)
}
