use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};
use std::mem;
use std::process::ExitCode;

use crate::agent::{Agent, TravelAgent};
use crate::config::{Config, GROQ_API_KEY_ENV, SERP_API_KEY_ENV};
use crate::planner::{
    AccommodationPreference, BudgetTier, Interest, MAX_DURATION_DAYS, MIN_DURATION_DAYS,
    MobilityLevel, TravelStyle, TripPreferences,
};
use crate::session::{SessionState, ask_question, generate_plan};

use super::args::CredentialArgs;
use super::render;
use super::util::Prompter;

const CLEAR_MARKER: &str = "-";

pub(crate) async fn run_session(credentials: &CredentialArgs) -> Result<ExitCode> {
    let mut prompter = Prompter::stdio();
    render::banner(prompter.output())?;

    let config = session_config(&mut prompter, credentials)?;
    let agent = TravelAgent::from_config(&config)?;

    InteractiveSession::new(&agent).run(&mut prompter).await?;
    Ok(ExitCode::SUCCESS)
}

/// Layered config plus per-run flags; keys still missing are asked for and
/// kept in memory for this session only.
fn session_config<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    credentials: &CredentialArgs,
) -> Result<Config> {
    let mut config = Config::resolve(|builder| credentials.apply(builder))?;

    if config.llm.api_key.trim().is_empty() || config.search.api_key.trim().is_empty() {
        writeln!(
            prompter.output(),
            "\nAPI keys can also come from {GROQ_API_KEY_ENV} / {SERP_API_KEY_ENV} or 'roam --setup'."
        )?;
    }
    if config.llm.api_key.trim().is_empty() {
        config.llm.api_key = prompter.secret("🔑 Enter your Groq API Key", "")?;
    }
    if config.search.api_key.trim().is_empty() {
        config.search.api_key = prompter.secret("🔑 Enter your SerpAPI Key", "")?;
    }

    config.validate()?;
    Ok(config)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    EditSettings,
    Generate,
    Ask,
    ShowPlan,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 5] = [
        MenuItem::EditSettings,
        MenuItem::Generate,
        MenuItem::Ask,
        MenuItem::ShowPlan,
        MenuItem::Quit,
    ];

    fn label(self, state: &SessionState) -> &'static str {
        match self {
            MenuItem::EditSettings => "Edit trip settings",
            MenuItem::Generate => "✨ Generate my perfect travel plan",
            MenuItem::Ask if state.qa_expanded() => "🤔 Ask another question about the plan",
            MenuItem::Ask => "🤔 Ask a specific question about your destination or travel plan",
            MenuItem::ShowPlan => "Show current plan",
            MenuItem::Quit => "Quit",
        }
    }

    fn parse(input: &str) -> Option<Self> {
        match input.to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => Some(MenuItem::Quit),
            other => other
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| Self::ALL.get(idx).copied()),
        }
    }
}

/// One user's planning session: the current form inputs plus the state the
/// actions carry between turns.
pub(crate) struct InteractiveSession<'a> {
    agent: &'a dyn Agent,
    prefs: TripPreferences,
    state: SessionState,
}

impl<'a> InteractiveSession<'a> {
    pub(crate) fn new(agent: &'a dyn Agent) -> Self {
        Self {
            agent,
            prefs: TripPreferences::default(),
            state: SessionState::new(),
        }
    }

    pub(crate) async fn run<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<()> {
        loop {
            let Some(item) = self.menu(prompter)? else {
                break;
            };

            match item {
                MenuItem::EditSettings => self.edit_settings(prompter)?,
                MenuItem::Generate => self.generate(prompter).await?,
                MenuItem::Ask => self.ask(prompter).await?,
                MenuItem::ShowPlan => self.show_plan(prompter)?,
                MenuItem::Quit => break,
            }
        }

        writeln!(prompter.output(), "👋 Safe travels!")?;
        Ok(())
    }

    fn menu<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Option<MenuItem>> {
        loop {
            let out = prompter.output();
            writeln!(out, "\n{} ({})", "Trip Settings".bold(), self.state.phase())?;
            for (idx, item) in MenuItem::ALL.iter().enumerate() {
                writeln!(out, "  {}. {}", idx + 1, item.label(&self.state))?;
            }

            let Some(input) = prompter.try_line("Choose an option: ")? else {
                return Ok(None);
            };
            match MenuItem::parse(&input) {
                Some(item) => return Ok(Some(item)),
                None => writeln!(
                    prompter.output(),
                    "❌ Please choose 1-{}.",
                    MenuItem::ALL.len()
                )?,
            }
        }
    }

    fn edit_settings<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<()> {
        let current = mem::take(&mut self.prefs);

        let destination = optional_text(prompter, "🌍 Destination", &current.destination)?;
        let duration_days = prompter.u32_in_range(
            "📅 Trip Duration (days)",
            current.duration_days,
            MIN_DURATION_DAYS,
            MAX_DURATION_DAYS,
        )?;
        let budget = prompter.choice::<BudgetTier>("💰 Budget Level", current.budget)?;
        let dietary = optional_text(
            prompter,
            "🍽️ Dietary Preferences (e.g., vegetarian, vegan, etc.)",
            &current.dietary,
        )?;
        let mobility = prompter.choice::<MobilityLevel>("🚶 Mobility Concerns", current.mobility)?;
        let accommodation = prompter.multi_choice::<AccommodationPreference>(
            "🏨 Accommodation Preferences",
            &current.accommodation,
        )?;
        let travel_style =
            prompter.multi_choice::<TravelStyle>("🎯 Travel Style", &current.travel_style)?;
        let interests = prompter
            .multi_choice::<Interest>("🔍 Specific Interests (Optional)", &current.interests)?;

        self.prefs = TripPreferences {
            destination,
            duration_days,
            budget,
            dietary,
            mobility,
            accommodation,
            travel_style,
            interests,
            extra_details: current.extra_details,
            confirmed: false,
        }
        .normalized();
        Ok(())
    }

    async fn generate<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<()> {
        render::travel_summary(prompter.output(), &self.prefs)?;

        writeln!(prompter.output(), "{}", "Can you confirm the details?".bold())?;
        let confirmed = prompter.yes_no("I confirm that the above details are correct.", false)?;
        let extra_details = optional_text(
            prompter,
            "Is there anything else you'd like to add?",
            &self.prefs.extra_details,
        )?;

        self.prefs.confirmed = confirmed;
        self.prefs.extra_details = extra_details;

        if confirmed && self.prefs.has_destination() {
            writeln!(
                prompter.output(),
                "🔍 Researching your destination and creating your itinerary..."
            )?;
        }

        let result = generate_plan(mem::take(&mut self.state), &self.prefs, self.agent).await;
        self.state = result.state;
        self.prefs.confirmed = false;
        render::outcome(prompter.output(), &result.outcome)
    }

    async fn ask<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<()> {
        let question = prompter.line("Your question: ")?;
        if self.state.travel_plan().is_some() && !question.is_empty() {
            writeln!(prompter.output(), "🔍 Finding answer...")?;
        }

        let result = ask_question(
            mem::take(&mut self.state),
            &self.prefs.destination,
            &question,
            self.agent,
        )
        .await;
        self.state = result.state;
        render::outcome(prompter.output(), &result.outcome)
    }

    fn show_plan<R: BufRead, W: Write>(&self, prompter: &mut Prompter<R, W>) -> Result<()> {
        match self.state.travel_plan() {
            Some(plan) => render::markdown(prompter.output(), plan.as_str()),
            None => {
                writeln!(prompter.output(), "No travel plan yet.")?;
                Ok(())
            }
        }
    }

    #[cfg(test)]
    fn state(&self) -> &SessionState {
        &self.state
    }
}

/// Free-text prompt where enter keeps the current value and `-` clears it.
fn optional_text<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    prompt: &str,
    current: &str,
) -> Result<String> {
    let label = if current.is_empty() {
        format!("{prompt} ('{CLEAR_MARKER}' for none)")
    } else {
        format!("{prompt} ('{CLEAR_MARKER}' to clear)")
    };
    let value = prompter.string_with_default(&label, current)?;
    if value == CLEAR_MARKER {
        Ok(String::new())
    } else {
        Ok(value)
    }
}
