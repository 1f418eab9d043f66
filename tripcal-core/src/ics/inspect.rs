//! Read-only look at the events inside a calendar payload.

use icalendar::parser::{read_calendar, unfold};
use serde::Serialize;

/// One VEVENT as listed to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventOverview {
    pub summary: String,
    pub location: Option<String>,
    /// Raw DTSTART value, e.g. `20250401T090000`
    pub start: Option<String>,
    pub end: Option<String>,
}

/// The events of a calendar payload, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CalendarOverview {
    pub events: Vec<EventOverview>,
}

impl CalendarOverview {
    /// Returns None when the payload can't be read as iCalendar at all.
    /// This is for display only and never rejects a result.
    pub fn inspect(ics: &str) -> Option<Self> {
        let unfolded = unfold(ics);
        let calendar = read_calendar(&unfolded).ok()?;

        let events = calendar
            .components
            .iter()
            .filter(|c| c.name == "VEVENT")
            .map(|vevent| EventOverview {
                summary: vevent
                    .find_prop("SUMMARY")
                    .map(|p| p.val.to_string())
                    .unwrap_or_else(|| "(No title)".to_string()),
                location: vevent.find_prop("LOCATION").map(|p| p.val.to_string()),
                start: vevent.find_prop("DTSTART").map(|p| p.val.to_string()),
                end: vevent.find_prop("DTEND").map(|p| p.val.to_string()),
            })
            .collect();

        Some(CalendarOverview { events })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
