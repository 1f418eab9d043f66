//! Trip parameters collected from the user.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{TripcalError, TripcalResult};

pub const DEFAULT_TRIP_TYPE: &str = "sightseeing, food, cultural experiences";

fn default_arrival_time() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default()
}

fn default_departure_time() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default()
}

/// How densely the itinerary should be packed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Relaxed,
    #[default]
    Normal,
    Packed,
}

impl Pace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pace::Relaxed => "relaxed",
            Pace::Normal => "normal",
            Pace::Packed => "packed",
        }
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pace {
    type Err = TripcalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relaxed" => Ok(Pace::Relaxed),
            "normal" => Ok(Pace::Normal),
            "packed" => Ok(Pace::Packed),
            _ => Err(TripcalError::InvalidPace(s.to_string())),
        }
    }
}

/// Everything the user tells us about the trip.
///
/// Only presence of the required fields is checked; whether the end date
/// comes after the start date is left to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "hhmm", default = "default_arrival_time")]
    pub arrival_time: NaiveTime,
    #[serde(with = "hhmm", default = "default_departure_time")]
    pub departure_time: NaiveTime,
    pub accommodation: String,
    /// Free text, may carry time hints like "Disneyland (all day)"
    #[serde(default)]
    pub must_visit: String,
    #[serde(default)]
    pub exclude: String,
    #[serde(default)]
    pub pace: Pace,
    #[serde(default)]
    pub trip_type: String,
}

impl TripRequest {
    pub fn new(
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        accommodation: impl Into<String>,
    ) -> Self {
        TripRequest {
            destination: destination.into(),
            start_date,
            end_date,
            arrival_time: default_arrival_time(),
            departure_time: default_departure_time(),
            accommodation: accommodation.into(),
            must_visit: String::new(),
            exclude: String::new(),
            pace: Pace::default(),
            trip_type: DEFAULT_TRIP_TYPE.to_string(),
        }
    }

    /// Check that the required text fields are filled in.
    pub fn validate(&self) -> TripcalResult<()> {
        if self.destination.trim().is_empty() {
            return Err(TripcalError::MissingField("destination"));
        }
        if self.accommodation.trim().is_empty() {
            return Err(TripcalError::MissingField("accommodation"));
        }
        Ok(())
    }
}

/// Raw form submission, every field as the browser sent it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripForm {
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub accommodation: String,
    pub must_visit: String,
    pub exclude: String,
    pub pace: String,
    pub trip_type: String,
}

impl TryFrom<TripForm> for TripRequest {
    type Error = TripcalError;

    fn try_from(form: TripForm) -> Result<Self, Self::Error> {
        let destination = required(form.destination, "destination")?;
        let start_date = parse_date(&required(form.start_date, "start_date")?, "start_date")?;
        let end_date = parse_date(&required(form.end_date, "end_date")?, "end_date")?;
        let accommodation = required(form.accommodation, "accommodation")?;

        let arrival_time = match form.arrival_time.trim() {
            "" => default_arrival_time(),
            value => parse_time(value, "arrival_time")?,
        };
        let departure_time = match form.departure_time.trim() {
            "" => default_departure_time(),
            value => parse_time(value, "departure_time")?,
        };
        let pace = match form.pace.trim() {
            "" => Pace::default(),
            value => value.parse()?,
        };

        Ok(TripRequest {
            destination,
            start_date,
            end_date,
            arrival_time,
            departure_time,
            accommodation,
            must_visit: form.must_visit.trim().to_string(),
            exclude: form.exclude.trim().to_string(),
            pace,
            trip_type: form.trip_type.trim().to_string(),
        })
    }
}

fn required(value: String, field: &'static str) -> TripcalResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TripcalError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Parse YYYY-MM-DD
pub fn parse_date(value: &str, field: &'static str) -> TripcalResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| TripcalError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Parse HH:MM, tolerating a trailing :SS
pub fn parse_time(value: &str, field: &'static str) -> TripcalResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| TripcalError::InvalidTime {
            field,
            value: value.to_string(),
        })
}

/// Time-of-day as HH:MM on the wire, matching what `<input type="time">` sends.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_time(&value, "time").map_err(serde::de::Error::custom)
    }
}
