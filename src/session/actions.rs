use std::fmt;

use tracing::{Instrument, debug, info, info_span, warn};

use crate::agent::Agent;
use crate::planner::{
    ItineraryResult, MAX_DURATION_DAYS, MIN_DURATION_DAYS, TripPreferences, follow_up_prompt,
    itinerary_prompt, refinement_prompt,
};

use super::state::{Phase, SessionState};

pub const RETRY_HINT: &str = "Please try again in a few moments.";

/// Input problems caught before any agent call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationWarning {
    MissingDestination,
    Unconfirmed,
    DurationOutOfRange,
    NoPlan,
    EmptyQuestion,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::MissingDestination => write!(f, "Please enter a destination"),
            ValidationWarning::Unconfirmed => {
                write!(f, "Please confirm your details before proceeding")
            }
            ValidationWarning::DurationOutOfRange => write!(
                f,
                "Trip duration must be between {MIN_DURATION_DAYS} and {MAX_DURATION_DAYS} days"
            ),
            ValidationWarning::NoPlan => write!(
                f,
                "Please generate a travel plan first before asking questions."
            ),
            ValidationWarning::EmptyQuestion => write!(f, "Please enter a question"),
        }
    }
}

/// What the user should see after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Warning(ValidationWarning),
    PlanReady(ItineraryResult),
    Answer(String),
    Failed {
        message: String,
        hint: Option<&'static str>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub state: SessionState,
    pub outcome: ActionOutcome,
}

impl ActionResult {
    fn unchanged(state: SessionState, warning: ValidationWarning) -> Self {
        debug!(%warning, phase = %state.phase(), "action rejected by validation");
        Self {
            state,
            outcome: ActionOutcome::Warning(warning),
        }
    }
}

/// "Generate" action: refinement call, then itinerary call.
///
/// The refinement response is not used beyond a debug log. On failure the
/// previous plan (if any) stays in place.
pub async fn generate_plan(
    state: SessionState,
    prefs: &TripPreferences,
    agent: &dyn Agent,
) -> ActionResult {
    if !prefs.has_destination() {
        return ActionResult::unchanged(state, ValidationWarning::MissingDestination);
    }
    if !prefs.confirmed {
        return ActionResult::unchanged(state, ValidationWarning::Unconfirmed);
    }
    if !prefs.duration_in_range() {
        return ActionResult::unchanged(state, ValidationWarning::DurationOutOfRange);
    }

    let span = info_span!(
        "generate_plan",
        phase = %Phase::Generating,
        destination = %prefs.destination.trim(),
        days = prefs.duration_days
    );

    async move {
        let itinerary = async {
            let refinement = agent.run(&refinement_prompt(prefs)).await?;
            debug!(refinement = %refinement, "refinement response discarded");

            let response = agent.run(&itinerary_prompt(prefs)).await?;
            Ok::<_, anyhow::Error>(match response.content() {
                Some(content) => ItineraryResult::from_content(content),
                None => ItineraryResult::from_raw(response.to_string()),
            })
        }
        .await;

        match itinerary {
            Ok(itinerary) => {
                info!(chars = itinerary.as_str().len(), "travel plan stored");
                let mut state = state;
                state.travel_plan = Some(itinerary.clone());
                ActionResult {
                    state,
                    outcome: ActionOutcome::PlanReady(itinerary),
                }
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "travel plan generation failed");
                ActionResult {
                    state,
                    outcome: ActionOutcome::Failed {
                        message: format!("Error generating travel plan: {err:#}"),
                        hint: Some(RETRY_HINT),
                    },
                }
            }
        }
    }
    .instrument(span)
    .await
}

/// "Ask question" action: one agent call with the stored plan as context.
/// The answer is shown, never stored.
pub async fn ask_question(
    mut state: SessionState,
    destination: &str,
    question: &str,
    agent: &dyn Agent,
) -> ActionResult {
    let Some(plan) = state.travel_plan.clone() else {
        return ActionResult::unchanged(state, ValidationWarning::NoPlan);
    };
    if question.trim().is_empty() {
        return ActionResult::unchanged(state, ValidationWarning::EmptyQuestion);
    }
    state.qa_expanded = true;

    let span = info_span!("ask_question", phase = %Phase::Answering);
    let prompt = follow_up_prompt(destination, plan.as_str(), question);

    async move {
        match agent.run(&prompt).await {
            Ok(response) => {
                let answer = match response.content() {
                    Some(content) => content.to_string(),
                    None => response.to_string(),
                };
                info!(chars = answer.len(), "follow-up answered");
                ActionResult {
                    state,
                    outcome: ActionOutcome::Answer(answer),
                }
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "follow-up question failed");
                ActionResult {
                    state,
                    outcome: ActionOutcome::Failed {
                        message: format!("Error getting answer: {err:#}"),
                        hint: None,
                    },
                }
            }
        }
    }
    .instrument(span)
    .await
}
