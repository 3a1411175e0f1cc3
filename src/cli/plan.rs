use anyhow::Result;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use crate::agent::{Agent, TravelAgent};
use crate::config::Config;
use crate::planner::TripPreferences;
use crate::session::{ActionOutcome, SessionState, ask_question, generate_plan};

use super::args::PlanArgs;
use super::render;
use super::util::Prompter;

pub(crate) async fn run_plan(args: PlanArgs) -> Result<ExitCode> {
    let config = Config::load_with(|builder| args.credentials.apply(builder))?;
    let agent = TravelAgent::from_config(&config)?;

    let mut prefs = args.preferences();
    let mut prompter = Prompter::stdio();
    render::travel_summary(prompter.output(), &prefs)?;

    if !prefs.confirmed && io::stdin().is_terminal() {
        prefs.confirmed =
            prompter.yes_no("I confirm that the above details are correct.", false)?;
    }

    execute_plan(&agent, &prefs, &args.ask, prompter.output()).await
}

/// Generates the plan, then answers each question against it. The exit code
/// reflects whether a plan was produced; failed answers are only reported.
async fn execute_plan<W: Write>(
    agent: &dyn Agent,
    prefs: &TripPreferences,
    questions: &[String],
    out: &mut W,
) -> Result<ExitCode> {
    let result = generate_plan(SessionState::new(), prefs, agent).await;
    render::outcome(out, &result.outcome)?;
    if !matches!(result.outcome, ActionOutcome::PlanReady(_)) {
        return Ok(ExitCode::FAILURE);
    }

    let mut state = result.state;
    for question in questions {
        writeln!(out, "\n❓ {}", question.trim())?;
        let answered = ask_question(state, &prefs.destination, question, agent).await;
        render::outcome(out, &answered.outcome)?;
        state = answered.state;
    }

    Ok(ExitCode::SUCCESS)
}
