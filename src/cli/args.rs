use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::ConfigBuilder;
use crate::planner::{
    AccommodationPreference, BudgetTier, DEFAULT_DURATION_DAYS, Interest, MobilityLevel,
    TravelStyle, TripPreferences,
};

use super::commands;

/// Entry point for the `roam` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "roam",
    about = "AI travel planner backed by a live web-searching agent",
    version,
    long_about = None
)]
pub struct Cli {
    /// Optional subcommand; without one roam starts an interactive session.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Interactive setup for first-time configuration
    #[arg(long = "setup")]
    pub setup: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plan a trip interactively and ask follow-up questions.
    Session(SessionArgs),
    /// Generate one itinerary from flags and print it.
    Plan(PlanArgs),
    /// Show or change the saved configuration.
    Config(ConfigArgs),
}

/// Per-run credential and model overrides; these are never saved.
#[derive(Debug, Default, Clone, Args)]
pub struct CredentialArgs {
    /// Groq API key (overrides GROQ_API_KEY and the config file)
    #[arg(long)]
    pub groq_api_key: Option<String>,

    /// SerpAPI key (overrides SERP_API_KEY and the config file)
    #[arg(long)]
    pub serpapi_key: Option<String>,

    /// Model identifier to use for this run
    #[arg(long)]
    pub model: Option<String>,
}

impl CredentialArgs {
    pub fn apply(&self, builder: ConfigBuilder) -> ConfigBuilder {
        let mut builder = builder;
        if let Some(key) = non_blank(&self.groq_api_key) {
            builder = builder.with_llm(|llm| llm.api_key = key);
        }
        if let Some(key) = non_blank(&self.serpapi_key) {
            builder = builder.with_search(|search| search.api_key = key);
        }
        if let Some(model) = non_blank(&self.model) {
            builder = builder.with_agent(|agent| agent.model = model);
        }
        builder
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Args)]
pub struct SessionArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Where you are going
    #[arg(short = 'd', long)]
    pub destination: String,

    /// Trip duration in days (1-30)
    #[arg(long, default_value_t = DEFAULT_DURATION_DAYS, value_parser = clap::value_parser!(u32).range(1..=30))]
    pub days: u32,

    /// Budget level
    #[arg(long, value_enum, default_value_t = BudgetTier::Moderate)]
    pub budget: BudgetTier,

    /// Dietary preferences, e.g. vegetarian
    #[arg(long)]
    pub dietary: Option<String>,

    /// Mobility concerns
    #[arg(long, value_enum, default_value_t = MobilityLevel::NoIssues)]
    pub mobility: MobilityLevel,

    /// Accommodation preference; repeat for several [default: central-location]
    #[arg(long = "accommodation", value_enum)]
    pub accommodation: Vec<AccommodationPreference>,

    /// Travel style; repeat for several [default: culture, nature]
    #[arg(long = "style", value_enum)]
    pub style: Vec<TravelStyle>,

    /// Specific interest; repeat for several
    #[arg(long = "interest", value_enum)]
    pub interest: Vec<Interest>,

    /// Anything else the planner should know
    #[arg(long)]
    pub details: Option<String>,

    /// Confirm the details without being asked
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Follow-up question to ask once the plan exists; repeatable
    #[arg(long = "ask")]
    pub ask: Vec<String>,
}

impl PlanArgs {
    pub fn preferences(&self) -> TripPreferences {
        let defaults = TripPreferences::default();
        TripPreferences {
            destination: self.destination.clone(),
            duration_days: self.days,
            budget: self.budget,
            dietary: self.dietary.clone().unwrap_or_default(),
            mobility: self.mobility,
            accommodation: or_default(&self.accommodation, defaults.accommodation),
            travel_style: or_default(&self.style, defaults.travel_style),
            interests: self.interest.clone(),
            extra_details: self.details.clone().unwrap_or_default(),
            confirmed: self.yes,
        }
        .normalized()
    }
}

fn or_default<T: Clone>(selected: &[T], default: Vec<T>) -> Vec<T> {
    if selected.is_empty() {
        default
    } else {
        selected.to_vec()
    }
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Save the Groq API key
    #[arg(long)]
    pub groq_api_key: Option<String>,

    /// Save the SerpAPI key
    #[arg(long)]
    pub serpapi_key: Option<String>,

    /// Save the model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Save the HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Save the context token budget
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Save how many search rounds the agent may run per prompt
    #[arg(long)]
    pub max_tool_rounds: Option<u32>,

    /// Save how many search results to request by default
    #[arg(long)]
    pub search_results: Option<u32>,

    /// Show the searches the agent ran above each answer (true/false)
    #[arg(long, action = ArgAction::Set)]
    pub show_tool_calls: Option<bool>,
}

impl ConfigArgs {
    pub fn has_changes(&self) -> bool {
        self.groq_api_key.is_some()
            || self.serpapi_key.is_some()
            || self.model.is_some()
            || self.timeout.is_some()
            || self.max_tokens.is_some()
            || self.max_tool_rounds.is_some()
            || self.search_results.is_some()
            || self.show_tool_calls.is_some()
    }
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        commands::run(self).await
    }
}
