//! Core types for tripcal.
//!
//! This crate holds everything the CLI and the server share:
//! - `trip` for the trip parameters collected from the user
//! - `prompt` for turning them into a completion request
//! - `response` for splitting the service output into preview and calendar
//! - `provider` for the completion service clients
//! - `session` for the single-user planning state machine

pub mod config;
pub mod error;
pub mod ics;
pub mod planner;
pub mod progress;
pub mod prompt;
pub mod provider;
pub mod response;
pub mod session;
pub mod trip;

pub use error::{TripcalError, TripcalResult};
pub use planner::Planner;
pub use response::{TripResult, parse_response};
pub use trip::{Pace, TripForm, TripRequest};
