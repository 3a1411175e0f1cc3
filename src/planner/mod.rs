//! Trip preferences and the prompts built from them.
//!
//! Everything here is pure: no I/O and no failure paths. Callers decide
//! whether a prompt should be built at all.

mod normalize;
mod prompt;
mod types;

pub use normalize::ItineraryResult;
pub use prompt::{
    AGENT_INSTRUCTIONS, AGENT_NAME, follow_up_prompt, itinerary_prompt, refinement_prompt,
};
pub use types::{
    AccommodationPreference, BudgetTier, Choice, DEFAULT_DURATION_DAYS, Interest,
    MAX_DURATION_DAYS, MIN_DURATION_DAYS, MobilityLevel, TravelStyle, TripPreferences,
    join_labels,
};

#[cfg(test)]
mod tests;
