//! Error types for tripcal.

use thiserror::Error;

use crate::provider::ProviderError;
use crate::response::ParseError;

/// Shown when the completion service fails without telling us why.
pub const GENERIC_FAILURE_MESSAGE: &str = "Itinerary generation failed, please try again later.";

/// Errors that can occur while planning a trip.
#[derive(Error, Debug)]
pub enum TripcalError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid pace preference '{0}'. Expected one of: relaxed, normal, packed")]
    InvalidPace(String),

    #[error("Invalid date for {field}: '{value}'. Expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("Invalid time for {field}: '{value}'. Expected HH:MM")]
    InvalidTime { field: &'static str, value: String },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The planning run itself broke down, e.g. its task panicked.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TripcalError {
    /// True for errors caused by what the user typed into the form.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            TripcalError::MissingField(_)
                | TripcalError::InvalidPace(_)
                | TripcalError::InvalidDate { .. }
                | TripcalError::InvalidTime { .. }
        )
    }

    /// The single message shown to the user when a planning cycle fails.
    ///
    /// Service errors surface the service-provided message, falling back to
    /// [`GENERIC_FAILURE_MESSAGE`] when the service gave none.
    pub fn user_message(&self) -> String {
        match self {
            TripcalError::Provider(err) => err
                .service_message()
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            TripcalError::Internal(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for tripcal operations.
pub type TripcalResult<T> = Result<T, TripcalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_uses_service_message() {
        let err = TripcalError::Provider(ProviderError::ApiError {
            status: 403,
            message: "API key not valid".to_string(),
        });
        assert_eq!(err.user_message(), "API key not valid");
    }

    #[test]
    fn test_user_message_falls_back_when_service_is_silent() {
        let err = TripcalError::Provider(ProviderError::ApiError {
            status: 500,
            message: "  ".to_string(),
        });
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_user_message_for_format_error() {
        let err = TripcalError::Parse(ParseError::MissingCalendarMarker);
        assert_eq!(
            err.user_message(),
            "AI response format error: missing CALENDAR_ICS"
        );
    }

    #[test]
    fn test_internal_error_shows_generic_message() {
        let err = TripcalError::Internal("task 7 panicked".into());
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_invalid_input_classification() {
        assert!(TripcalError::MissingField("destination").is_invalid_input());
        assert!(TripcalError::InvalidPace("fast".into()).is_invalid_input());
        assert!(!TripcalError::Parse(ParseError::MissingPreviewMarker).is_invalid_input());
    }
}
