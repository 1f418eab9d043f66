//! Planning state of a single user session.
//!
//! ```text
//! Idle ──begin──▶ Submitting ──settle(Ok)──▶ Ready ──restart──▶ Idle
//!                     │
//!                     └──settle(Err)──▶ Failed ──dismiss_error──▶ Idle
//! ```
//!
//! `begin` is also accepted from Ready and Failed, discarding the previous
//! outcome. Only one request can be in flight.

use serde::Serialize;
use thiserror::Error;

use crate::error::TripcalResult;
use crate::ics::{CalendarDownload, CalendarOverview};
use crate::response::TripResult;
use crate::trip::TripRequest;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("A trip is already being planned, wait for it to finish")]
    AlreadySubmitting,

    #[error("No trip is being planned")]
    NotSubmitting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlannerState {
    #[default]
    Idle,
    Submitting {
        request: TripRequest,
    },
    Ready {
        request: TripRequest,
        result: TripResult,
    },
    Failed {
        request: TripRequest,
        message: String,
    },
}

#[derive(Debug, Default)]
pub struct PlannerSession {
    state: PlannerState,
}

impl PlannerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, PlannerState::Submitting { .. })
    }

    /// Start planning `request`. Clears any previous result or error.
    pub fn begin(&mut self, request: TripRequest) -> Result<(), SessionError> {
        if self.is_submitting() {
            return Err(SessionError::AlreadySubmitting);
        }
        self.state = PlannerState::Submitting { request };
        Ok(())
    }

    /// Record the outcome of the in-flight request.
    pub fn settle(
        &mut self,
        outcome: TripcalResult<TripResult>,
    ) -> Result<&PlannerState, SessionError> {
        let request = match std::mem::take(&mut self.state) {
            PlannerState::Submitting { request } => request,
            other => {
                self.state = other;
                return Err(SessionError::NotSubmitting);
            }
        };

        self.state = match outcome {
            Ok(result) => PlannerState::Ready { request, result },
            Err(err) => PlannerState::Failed {
                request,
                message: err.user_message(),
            },
        };
        Ok(&self.state)
    }

    /// Clear a failure so the form can be submitted again.
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, PlannerState::Failed { .. }) {
            self.state = PlannerState::Idle;
        }
    }

    /// Discard the current result (or error) and go back to the form.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        if self.is_submitting() {
            return Err(SessionError::AlreadySubmitting);
        }
        self.state = PlannerState::Idle;
        Ok(())
    }

    /// The calendar file, once a result is available.
    pub fn download(&self) -> Option<CalendarDownload> {
        match &self.state {
            PlannerState::Ready { request, result } => Some(CalendarDownload::new(request, result)),
            _ => None,
        }
    }

    /// Events in the current result, for display.
    pub fn overview(&self) -> Option<CalendarOverview> {
        match &self.state {
            PlannerState::Ready { result, .. } => CalendarOverview::inspect(&result.ics),
            _ => None,
        }
    }
}
