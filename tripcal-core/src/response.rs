//! Splitting the completion service output into preview and calendar.
//!
//! The model is instructed to answer with exactly two blocks:
//!
//! ```text
//! ===TRIP_PREVIEW===
//! <html itinerary>
//! ===CALENDAR_ICS===
//! BEGIN:VCALENDAR ... END:VCALENDAR
//! ```
//!
//! Anything before the first marker is ignored. Neither block is sanitized
//! or validated here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PREVIEW_MARKER: &str = "===TRIP_PREVIEW===";
pub const CALENDAR_MARKER: &str = "===CALENDAR_ICS===";

/// The completion did not follow the two-marker format.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("AI response format error: missing TRIP_PREVIEW")]
    MissingPreviewMarker,

    #[error("AI response format error: missing CALENDAR_ICS")]
    MissingCalendarMarker,
}

/// Parsed output of one planning cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripResult {
    /// HTML itinerary fragment, trusted as-is
    pub html: String,
    /// iCalendar document
    pub ics: String,
}

/// Split raw completion text into a [`TripResult`].
pub fn parse_response(raw: &str) -> Result<TripResult, ParseError> {
    let mut preview_split = raw.split(PREVIEW_MARKER);
    preview_split.next();
    let after_preview = preview_split
        .next()
        .ok_or(ParseError::MissingPreviewMarker)?;

    let mut calendar_split = after_preview.split(CALENDAR_MARKER);
    let html = calendar_split.next().unwrap_or_default();
    let ics = calendar_split
        .next()
        .ok_or(ParseError::MissingCalendarMarker)?;

    Ok(TripResult {
        html: html.trim().to_string(),
        ics: ics.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_on_markers() {
        let raw = "Sure! Here you go.===TRIP_PREVIEW===<section class=\"day-card\">Day 1</section>\
                   ===CALENDAR_ICS===BEGIN:VCALENDAR\nEND:VCALENDAR";

        let result = parse_response(raw).unwrap();

        assert_eq!(result.html, "<section class=\"day-card\">Day 1</section>");
        assert_eq!(result.ics, "BEGIN:VCALENDAR\nEND:VCALENDAR");
    }

    #[test]
    fn test_parse_trims_segments() {
        for (h, i) in [
            ("<p>a</p>", "BEGIN:VCALENDAR"),
            ("\n\n<h2>Day 1</h2>\n", "\r\nBEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n"),
            ("", ""),
            ("  spaced   inside  ", "\tICS\t"),
        ] {
            let raw = format!("prefix{PREVIEW_MARKER}{h}{CALENDAR_MARKER}{i}");
            let result = parse_response(&raw).unwrap();
            assert_eq!(result.html, h.trim());
            assert_eq!(result.ics, i.trim());
        }
    }

    #[test]
    fn test_missing_preview_marker() {
        assert_eq!(
            parse_response("no markers here"),
            Err(ParseError::MissingPreviewMarker)
        );
        assert_eq!(
            parse_response("").unwrap_err().to_string(),
            "AI response format error: missing TRIP_PREVIEW"
        );
    }

    #[test]
    fn test_missing_calendar_marker() {
        let err = parse_response("===TRIP_PREVIEW===only one marker").unwrap_err();
        assert_eq!(err, ParseError::MissingCalendarMarker);
        assert_eq!(
            err.to_string(),
            "AI response format error: missing CALENDAR_ICS"
        );
    }

    #[test]
    fn test_markers_out_of_order() {
        let raw = "===CALENDAR_ICS===BEGIN:VCALENDAR===TRIP_PREVIEW===<p>late</p>";
        assert_eq!(parse_response(raw), Err(ParseError::MissingCalendarMarker));
    }

    #[test]
    fn test_whitespace_around_markers() {
        let raw = "===TRIP_PREVIEW===  <h1>X</h1>  ===CALENDAR_ICS===  BEGIN:VCALENDAR...END:VCALENDAR  ";

        let result = parse_response(raw).unwrap();

        assert_eq!(result.html, "<h1>X</h1>");
        assert_eq!(result.ics, "BEGIN:VCALENDAR...END:VCALENDAR");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let raw = "===TRIP_PREVIEW===<p>same</p>===CALENDAR_ICS===BEGIN:VCALENDAR";
        assert_eq!(parse_response(raw), parse_response(raw));
    }

    #[test]
    fn test_repeated_markers_keep_first_segments() {
        let raw = "===TRIP_PREVIEW===<p>one</p>===CALENDAR_ICS===ICS1===CALENDAR_ICS===ICS2\
                   ===TRIP_PREVIEW===<p>two</p>";

        let result = parse_response(raw).unwrap();

        assert_eq!(result.html, "<p>one</p>");
        assert_eq!(result.ics, "ICS1");
    }
}
