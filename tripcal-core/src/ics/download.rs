//! The downloadable calendar artifact.

use std::path::{Path, PathBuf};

use crate::error::TripcalResult;
use crate::response::TripResult;
use crate::trip::TripRequest;

pub const ICS_CONTENT_TYPE: &str = "text/calendar;charset=utf-8";

/// `trip-to-<destination>.ics`, with path separators replaced so it can be
/// written to disk as-is.
pub fn download_filename(destination: &str) -> String {
    let name = destination.trim().replace(['/', '\\', ':'], "_");
    format!("trip-to-{}.ics", name)
}

/// A calendar file ready to be offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDownload {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

impl CalendarDownload {
    pub fn new(request: &TripRequest, result: &TripResult) -> Self {
        Self::for_destination(&request.destination, result)
    }

    /// When only the destination of the trip is known, e.g. a saved response.
    pub fn for_destination(destination: &str, result: &TripResult) -> Self {
        CalendarDownload {
            filename: download_filename(destination),
            content_type: ICS_CONTENT_TYPE,
            body: result.ics.clone(),
        }
    }

    /// Write the calendar into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> TripcalResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.body)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_download_filename() {
        assert_eq!(download_filename("Tokyo"), "trip-to-Tokyo.ics");
        assert_eq!(download_filename(" 東京 "), "trip-to-東京.ics");
        assert_eq!(download_filename("Paris/Lyon"), "trip-to-Paris_Lyon.ics");
        assert_eq!(download_filename("C:\\Temp"), "trip-to-C__Temp.ics");
    }

    #[test]
    fn test_write_to_creates_file() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let request = TripRequest::new("Lisbon", date, date, "Alfama guesthouse");
        let result = TripResult {
            html: "<p>Day 1</p>".into(),
            ics: "BEGIN:VCALENDAR\nEND:VCALENDAR".into(),
        };
        let download = CalendarDownload::new(&request, &result);
        let dir = tempfile::tempdir().unwrap();

        let path = download.write_to(&dir.path().join("out")).unwrap();

        assert_eq!(path.file_name().unwrap(), "trip-to-Lisbon.ics");
        assert_eq!(std::fs::read_to_string(path).unwrap(), result.ics);
        assert_eq!(download.content_type, "text/calendar;charset=utf-8");
    }
}
