use std::fmt;

use crate::planner::ItineraryResult;

/// Where the session is in the generate / ask cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Generating,
    Ready,
    Answering,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Idle => "idle",
            Phase::Generating => "generating",
            Phase::Ready => "ready",
            Phase::Answering => "answering",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub(super) travel_plan: Option<ItineraryResult>,
    pub(super) qa_expanded: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn travel_plan(&self) -> Option<&ItineraryResult> {
        self.travel_plan.as_ref()
    }

    pub fn qa_expanded(&self) -> bool {
        self.qa_expanded
    }

    /// Resting phase; `Generating` and `Answering` only exist while an
    /// action is in flight.
    pub fn phase(&self) -> Phase {
        if self.travel_plan.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }
}
