//! Completion request construction.

use crate::trip::TripRequest;

/// Map search link template; the place name is appended as the query.
pub const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Format-defining instruction sent with every request.
///
/// The markers here must match [`crate::response::PREVIEW_MARKER`] and
/// [`crate::response::CALENDAR_MARKER`].
pub const SYSTEM_INSTRUCTION: &str = r#"You are "AI Travel Calendar", a professional travel itinerary generator.
Your only job is to output an itinerary preview that can be shown directly on a web page, and calendar data that can be imported as an .ics file.
You are not a chat bot and not a JSON API. You only output final content that is readable, clickable and downloadable.

OUTPUT STRUCTURE (must never be violated)
Output exactly these two blocks, in this order, using these exact marker lines:
===TRIP_PREVIEW===
(the itinerary preview, plain HTML only)
===CALENDAR_ICS===
(the ICS text, following the VCALENDAR standard)

FORBIDDEN
- Do not use Markdown.
- Do not output any text, preamble, closing remark or hint outside the two blocks.
- Do not output ``` fences.

TRIP_PREVIEW RULES
- Pure HTML content only.
- Every link must be a clickable <a href="..."> with target="_blank".
- Every point of interest must have a map link: <a href="https://www.google.com/maps/search/?api=1&query=PLACE_NAME" target="_blank">View on Google Maps</a>
- Every stop must describe how to get there: <div class="transport">Transit: from "previous stop" take the XX line to XX station, then walk about X minutes</div>
- Every stop must have an explicit time range (for example 09:00 – 11:00).
- Wrap each day in a <section class="day-card"> element.

CALENDAR_ICS RULES
- Output a complete document from BEGIN:VCALENDAR to END:VCALENDAR.
- Each point of interest is one VEVENT.
- SUMMARY is the place name.
- LOCATION is the place name.
- DESCRIPTION contains the itinerary notes, the transit description and the map link.
- DTSTART and DTEND must use the local time zone of the destination.
"#;

/// The two text inputs of a completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub system_instruction: String,
    pub user_prompt: String,
}

/// Build the completion prompt for a trip.
///
/// Every field gets its own labeled line in a fixed order, even when empty.
pub fn build_prompt(trip: &TripRequest) -> PromptRequest {
    let user_prompt = format!(
        "Destination: {destination}\n\
         Dates: {start} to {end}\n\
         Arrival time: {arrival}\n\
         Departure time: {departure}\n\
         Accommodation: {accommodation}\n\
         Must-visit places (with preferred times): {must_visit}\n\
         Places to avoid: {exclude}\n\
         Pace: {pace}\n\
         Trip type: {trip_type}\n\
         \n\
         Please generate my personal travel itinerary from this information.\n",
        destination = trip.destination,
        start = trip.start_date.format("%Y-%m-%d"),
        end = trip.end_date.format("%Y-%m-%d"),
        arrival = trip.arrival_time.format("%H:%M"),
        departure = trip.departure_time.format("%H:%M"),
        accommodation = trip.accommodation,
        must_visit = trip.must_visit,
        exclude = trip.exclude,
        pace = trip.pace,
        trip_type = trip.trip_type,
    );

    PromptRequest {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        user_prompt,
    }
}

/// Map search link for a place, as the model is told to build it.
pub fn maps_search_url(place: &str) -> String {
    format!("{}{}", MAPS_SEARCH_URL, urlencoding::encode(place.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{CALENDAR_MARKER, PREVIEW_MARKER};
    use crate::trip::Pace;
    use chrono::{NaiveDate, NaiveTime};

    fn kyoto() -> TripRequest {
        let mut trip = TripRequest::new(
            "Kyoto",
            NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 6).unwrap(),
            "Hotel Granvia Kyoto",
        );
        trip.arrival_time = NaiveTime::from_hms_opt(13, 15, 0).unwrap();
        trip.departure_time = NaiveTime::from_hms_opt(17, 45, 0).unwrap();
        trip.must_visit = "Fushimi Inari (early morning), Kinkaku-ji".into();
        trip.exclude = "Shopping malls".into();
        trip.pace = Pace::Relaxed;
        trip.trip_type = "temples, tea".into();
        trip
    }

    fn line_index(prompt: &str, label: &str) -> usize {
        prompt
            .lines()
            .position(|l| l.starts_with(label))
            .unwrap_or_else(|| panic!("missing line {label:?} in:\n{prompt}"))
    }

    const LABELS: [&str; 9] = [
        "Destination:",
        "Dates:",
        "Arrival time:",
        "Departure time:",
        "Accommodation:",
        "Must-visit places",
        "Places to avoid:",
        "Pace:",
        "Trip type:",
    ];

    #[test]
    fn test_prompt_contains_every_field() {
        let prompt = build_prompt(&kyoto()).user_prompt;

        for value in [
            "Kyoto",
            "2025-11-03",
            "2025-11-06",
            "13:15",
            "17:45",
            "Hotel Granvia Kyoto",
            "Fushimi Inari (early morning), Kinkaku-ji",
            "Shopping malls",
            "relaxed",
            "temples, tea",
        ] {
            assert!(prompt.contains(value), "prompt should contain {value:?}");
        }
        assert!(prompt.contains("Dates: 2025-11-03 to 2025-11-06"));
    }

    #[test]
    fn test_field_order_is_fixed() {
        let full = build_prompt(&kyoto()).user_prompt;

        let mut sparse = kyoto();
        sparse.must_visit.clear();
        sparse.exclude.clear();
        sparse.trip_type.clear();
        let sparse = build_prompt(&sparse).user_prompt;

        for prompt in [full, sparse] {
            let positions: Vec<usize> = LABELS.iter().map(|l| line_index(&prompt, l)).collect();
            let expected: Vec<usize> = (0..LABELS.len()).collect();
            assert_eq!(positions, expected);
        }
    }

    #[test]
    fn test_empty_optional_fields_keep_their_line() {
        let mut trip = kyoto();
        trip.exclude.clear();
        let prompt = build_prompt(&trip).user_prompt;

        assert!(prompt.lines().any(|l| l == "Places to avoid: "));
    }

    #[test]
    fn test_system_instruction_defines_output_contract() {
        let prompt = build_prompt(&kyoto());

        assert_eq!(prompt.system_instruction, SYSTEM_INSTRUCTION);
        let preview = SYSTEM_INSTRUCTION.find(PREVIEW_MARKER).unwrap();
        let calendar = SYSTEM_INSTRUCTION.find(CALENDAR_MARKER).unwrap();
        assert!(preview < calendar);
        assert!(SYSTEM_INSTRUCTION.contains(MAPS_SEARCH_URL));
        assert!(SYSTEM_INSTRUCTION.contains("BEGIN:VCALENDAR"));
        assert!(SYSTEM_INSTRUCTION.contains("class=\"transport\""));
    }

    #[test]
    fn test_maps_search_url() {
        assert_eq!(
            maps_search_url("Tokyo Tower"),
            "https://www.google.com/maps/search/?api=1&query=Tokyo%20Tower"
        );
        assert_eq!(
            maps_search_url("淺草寺"),
            "https://www.google.com/maps/search/?api=1&query=%E6%B7%BA%E8%8D%89%E5%AF%BA"
        );
    }
}
