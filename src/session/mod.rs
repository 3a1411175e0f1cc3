//! Per-session state and the two user actions that change it.
//!
//! State is an explicit value: each action takes the current
//! [`SessionState`] and hands back the next one inside an `ActionResult`.

mod actions;
mod state;

pub use actions::{ActionOutcome, ValidationWarning, ask_question, generate_plan};
pub use state::SessionState;
