//! Calendar payload handling.
//!
//! The ICS text comes straight from the completion service. Nothing here
//! rewrites it; we only name the download and read it back for display.

mod download;
mod inspect;

pub use download::{CalendarDownload, ICS_CONTENT_TYPE, download_filename};
pub use inspect::{CalendarOverview, EventOverview};
