//! Colored terminal rendering for tripcal types.

use chrono::{NaiveDate, NaiveDateTime};
use owo_colors::OwoColorize;
use tripcal_core::TripRequest;
use tripcal_core::ics::{CalendarOverview, EventOverview};

pub trait Render {
    fn render(&self) -> String;
}

impl Render for TripRequest {
    fn render(&self) -> String {
        let mut lines = vec![
            format!(
                "🧳 {} {}",
                self.destination.bold(),
                format!("{} → {}", self.start_date, self.end_date).dimmed()
            ),
            format!(
                "   {} {}, leaving {}, {} pace",
                "Arriving".dimmed(),
                self.arrival_time.format("%H:%M"),
                self.departure_time.format("%H:%M"),
                self.pace
            ),
            format!("   {} {}", "Staying at".dimmed(), self.accommodation),
        ];

        if !self.must_visit.is_empty() {
            lines.push(format!("   {} {}", "Must see".dimmed(), self.must_visit));
        }
        if !self.exclude.is_empty() {
            lines.push(format!("   {} {}", "Skipping".dimmed(), self.exclude));
        }

        lines.join("\n")
    }
}

impl Render for EventOverview {
    fn render(&self) -> String {
        let time = match (&self.start, &self.end) {
            (Some(start), Some(end)) => {
                format!("{} - {}", format_ics_time(start), format_ics_time(end))
            }
            (Some(start), None) => format_ics_time(start),
            _ => String::new(),
        };

        let mut line = format!("   {} {}", "•".cyan(), self.summary);
        if !time.is_empty() {
            line.push_str(&format!(" {}", time.dimmed()));
        }
        if let Some(location) = self.location.as_deref().filter(|l| *l != self.summary) {
            line.push_str(&format!(" {}", format!("@ {}", location).dimmed()));
        }
        line
    }
}

impl Render for CalendarOverview {
    fn render(&self) -> String {
        let count = self.len();
        let mut lines = vec![format!(
            "📅 {} {}",
            count.bold(),
            if count == 1 { "event" } else { "events" }
        )];
        lines.extend(self.events.iter().map(|e| e.render()));
        lines.join("\n")
    }
}

/// `20250401T090000` → `2025-04-01 09:00`. Unrecognized values are shown as-is.
fn format_ics_time(raw: &str) -> String {
    let value = raw.trim_end_matches('Z');

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y%m%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}
