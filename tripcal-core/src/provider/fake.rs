//! Fake completion provider for tests and offline demos.
//!
//! Returns a fixed response (or a fixed failure) and records every request
//! it receives, so tests can assert on the prompt without network access.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionProvider, CompletionRequest, ProviderError};

/// A small itinerary in the two-marker format.
pub const SAMPLE_RESPONSE: &str = r#"===TRIP_PREVIEW===
<section class="day-card">
  <h2>Day 1</h2>
  <div class="stop">
    <h3>09:00 – 11:00 Old Town Walk</h3>
    <div class="transport">Transit: from your hotel, walk about 10 minutes</div>
    <a href="https://www.google.com/maps/search/?api=1&query=Old%20Town" target="_blank">View on Google Maps</a>
  </div>
  <div class="stop">
    <h3>12:00 – 13:30 Central Market Lunch</h3>
    <div class="transport">Transit: from "Old Town" take tram 1 to Market station, walk about 3 minutes</div>
    <a href="https://www.google.com/maps/search/?api=1&query=Central%20Market" target="_blank">View on Google Maps</a>
  </div>
</section>
===CALENDAR_ICS===
BEGIN:VCALENDAR
VERSION:2.0
PRODID:-//AI Travel Calendar//EN
BEGIN:VEVENT
UID:day1-old-town@tripcal
DTSTAMP:20250101T000000Z
SUMMARY:Old Town Walk
LOCATION:Old Town
DTSTART:20250401T090000
DTEND:20250401T110000
DESCRIPTION:Walk from the hotel. https://www.google.com/maps/search/?api=1&query=Old%20Town
END:VEVENT
BEGIN:VEVENT
UID:day1-market@tripcal
DTSTAMP:20250101T000000Z
SUMMARY:Central Market Lunch
LOCATION:Central Market
DTSTART:20250401T120000
DTEND:20250401T133000
DESCRIPTION:Tram 1 to Market station. https://www.google.com/maps/search/?api=1&query=Central%20Market
END:VEVENT
END:VCALENDAR
"#;

#[derive(Debug)]
enum Outcome {
    Respond(String),
    Fail(String),
}

/// A fake completion provider.
#[derive(Debug)]
pub struct FakeProvider {
    outcome: Outcome,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self::with_response(SAMPLE_RESPONSE)
    }
}

impl FakeProvider {
    /// Always answer with `response`.
    pub fn with_response(response: &str) -> Self {
        Self {
            outcome: Outcome::Respond(response.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always fail as if the service returned an error with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Outcome::Fail(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        match &self.outcome {
            Outcome::Respond(text) => Ok(text.clone()),
            Outcome::Fail(message) => Err(ProviderError::ApiError {
                status: 500,
                message: message.clone(),
            }),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
