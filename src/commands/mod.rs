pub mod config;
pub mod parse;
pub mod plan;
pub mod prompt;

use std::path::{Path, PathBuf};

use anyhow::Result;
use owo_colors::OwoColorize;
use tripcal_core::TripResult;
use tripcal_core::ics::{CalendarDownload, CalendarOverview};

use crate::render::Render;

/// Column width for the text rendering of the itinerary preview
const PREVIEW_WIDTH: usize = 100;

/// Print the itinerary and write its calendar file into `output_dir`.
pub fn show_result(destination: &str, result: &TripResult, output_dir: &Path) -> Result<PathBuf> {
    let preview = html2text::from_read(result.html.as_bytes(), PREVIEW_WIDTH)
        .map_err(|e| anyhow::anyhow!("Could not render itinerary preview: {}", e))?;
    println!("{}", preview.trim_end());
    println!();

    let download = CalendarDownload::for_destination(destination, result);
    if let Some(overview) = CalendarOverview::inspect(&download.body) {
        println!("{}", overview.render());
    }

    let path = download.write_to(output_dir)?;
    println!("\n{} {}", "Saved".green(), path.display());
    println!("{}", "Open the file to import it into your calendar app.".dimmed());

    Ok(path)
}
