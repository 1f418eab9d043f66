//! One request/parse cycle against the completion service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{DEFAULT_TEMPERATURE, TripcalConfig};
use crate::error::TripcalResult;
use crate::prompt::build_prompt;
use crate::provider::{CompletionProvider, CompletionRequest, create_provider};
use crate::response::{TripResult, parse_response};
use crate::trip::TripRequest;

/// Turns trip requests into itineraries using a completion provider.
#[derive(Debug, Clone)]
pub struct Planner {
    provider: Arc<dyn CompletionProvider>,
    temperature: f32,
}

impl Planner {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Planner {
            provider,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn from_config(config: &TripcalConfig) -> TripcalResult<Self> {
        let provider = create_provider(config)?;
        Ok(Planner::new(provider).with_temperature(config.temperature))
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn provider(&self) -> &dyn CompletionProvider {
        self.provider.as_ref()
    }

    /// Send the trip to the service and return its raw text.
    ///
    /// Service failures are passed through untouched.
    pub async fn request_raw(&self, trip: &TripRequest) -> TripcalResult<String> {
        trip.validate()?;

        let prompt = build_prompt(trip);
        let request = CompletionRequest {
            system_instruction: prompt.system_instruction,
            prompt: prompt.user_prompt,
            temperature: self.temperature,
        };

        info!(
            destination = %trip.destination,
            provider = self.provider.provider_name(),
            model = self.provider.model_name(),
            "Requesting itinerary"
        );

        let text = self.provider.complete(&request).await.inspect_err(|e| {
            warn!(error = %e, "Completion request failed");
        })?;

        info!(chars = text.len(), "Received completion");
        Ok(text)
    }

    /// Full cycle: prompt, one completion call, parse.
    pub async fn plan(&self, trip: &TripRequest) -> TripcalResult<TripResult> {
        let raw = self.request_raw(trip).await?;
        let result = parse_response(&raw).inspect_err(|e| {
            warn!(error = %e, "Completion did not follow the output format");
        })?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TripcalError;
    use crate::prompt::SYSTEM_INSTRUCTION;
    use crate::provider::{FakeProvider, ProviderError};
    use crate::response::ParseError;
    use chrono::NaiveDate;

    fn trip(destination: &str) -> TripRequest {
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        TripRequest::new(destination, date, date, "Central Hotel")
    }

    #[tokio::test]
    async fn test_plan_sends_prompt_and_parses() {
        let fake = Arc::new(FakeProvider::with_response(
            "===TRIP_PREVIEW===<p>Day 1</p>===CALENDAR_ICS===BEGIN:VCALENDAR",
        ));
        let planner = Planner::new(fake.clone()).with_temperature(0.2);

        let result = planner.plan(&trip("Seoul")).await.unwrap();

        assert_eq!(result.html, "<p>Day 1</p>");
        assert_eq!(result.ics, "BEGIN:VCALENDAR");

        let requests = fake.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system_instruction, SYSTEM_INSTRUCTION);
        assert!(requests[0].prompt.contains("Destination: Seoul"));
        assert_eq!(requests[0].temperature, 0.2);
    }

    #[tokio::test]
    async fn test_plan_reports_format_error() {
        let planner = Planner::new(Arc::new(FakeProvider::with_response("no markers here")));

        let err = planner.plan(&trip("Seoul")).await.unwrap_err();

        assert!(matches!(
            err,
            TripcalError::Parse(ParseError::MissingPreviewMarker)
        ));
    }

    #[tokio::test]
    async fn test_plan_passes_service_errors_through() {
        let planner = Planner::new(Arc::new(FakeProvider::failing("API key expired")));

        let err = planner.plan(&trip("Seoul")).await.unwrap_err();

        match err {
            TripcalError::Provider(ProviderError::ApiError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "API key expired");
            }
            other => panic!("Expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_plan_rejects_missing_fields_without_calling_service() {
        let fake = Arc::new(FakeProvider::default());
        let planner = Planner::new(fake.clone());

        let err = planner.plan(&trip("  ")).await.unwrap_err();

        assert!(matches!(err, TripcalError::MissingField("destination")));
        assert!(fake.requests().is_empty());
    }
}
