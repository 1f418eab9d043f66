use anyhow::Result;
use owo_colors::OwoColorize;
use tripcal_core::TripRequest;
use tripcal_core::prompt::{build_prompt, maps_search_url};

pub fn run(trip: &TripRequest) -> Result<()> {
    trip.validate()?;
    let prompt = build_prompt(trip);

    println!("{}", "System instruction".bold());
    println!("{}", prompt.system_instruction.dimmed());
    println!("{}", "User prompt".bold());
    println!("{}", prompt.user_prompt);

    let links = map_links(&trip.must_visit);
    if !links.is_empty() {
        println!("{}", "Map links".bold());
        for (place, url) in links {
            println!("  {} {}", place, url.dimmed());
        }
    }

    Ok(())
}

/// Map search link for each comma-separated must-visit place, without its
/// time hint ("Senso-ji (day 1 morning)" links to "Senso-ji").
fn map_links(must_visit: &str) -> Vec<(String, String)> {
    must_visit
        .split([',', '\n'])
        .map(|entry| entry.split('(').next().unwrap_or(entry).trim())
        .filter(|place| !place.is_empty())
        .map(|place| (place.to_string(), maps_search_url(place)))
        .collect()
}
