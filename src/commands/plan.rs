use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tripcal_core::config::TripcalConfig;
use tripcal_core::{Planner, TripRequest, TripResult, TripcalError, parse_response};

use crate::render::Render;
use crate::utils::tui::LoadingSpinner;

pub async fn run(
    trip: TripRequest,
    output_dir: Option<PathBuf>,
    save_response: Option<PathBuf>,
) -> Result<()> {
    trip.validate()?;

    let config = TripcalConfig::load()?;
    let planner = Planner::from_config(&config)?;
    let output_dir = output_dir.unwrap_or_else(|| config.output_path());

    println!("{}\n", trip.render());

    let spinner = LoadingSpinner::start();
    let outcome = generate(&planner, &trip, save_response.as_deref()).await;
    spinner.finish();

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            let message = e
                .downcast_ref::<TripcalError>()
                .map(|err| err.user_message())
                .unwrap_or_else(|| e.to_string());
            println!("{}", message.red());
            anyhow::bail!("Itinerary was not generated, try again");
        }
    };

    super::show_result(&trip.destination, &result, &output_dir)?;
    Ok(())
}

/// One completion call, keeping the raw text when asked to.
async fn generate(
    planner: &Planner,
    trip: &TripRequest,
    save_response: Option<&Path>,
) -> Result<TripResult> {
    let Some(path) = save_response else {
        return Ok(planner.plan(trip).await?);
    };

    let raw = planner.request_raw(trip).await?;
    std::fs::write(path, &raw)
        .with_context(|| format!("Could not save response to {}", path.display()))?;

    Ok(parse_response(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tripcal_core::provider::FakeProvider;

    fn trip() -> TripRequest {
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        TripRequest::new("Tokyo", date, date, "Tokyo Station Hotel")
    }

    #[tokio::test]
    async fn test_generate_saves_raw_response() {
        let planner = Planner::new(Arc::new(FakeProvider::default()));
        let dir = tempfile::tempdir().unwrap();
        let raw_path = dir.path().join("raw.txt");

        let result = generate(&planner, &trip(), Some(&raw_path)).await.unwrap();

        let saved = std::fs::read_to_string(&raw_path).unwrap();
        assert_eq!(parse_response(&saved).unwrap(), result);
    }

    #[tokio::test]
    async fn test_generate_saves_response_even_when_unparseable() {
        let planner = Planner::new(Arc::new(FakeProvider::with_response("Sorry, I can't help.")));
        let dir = tempfile::tempdir().unwrap();
        let raw_path = dir.path().join("raw.txt");

        let err = generate(&planner, &trip(), Some(&raw_path)).await.unwrap_err();

        assert!(err.to_string().contains("missing TRIP_PREVIEW"));
        assert_eq!(std::fs::read_to_string(&raw_path).unwrap(), "Sorry, I can't help.");
    }

    #[tokio::test]
    async fn test_generate_surfaces_service_message() {
        let planner = Planner::new(Arc::new(FakeProvider::failing("API key not valid")));

        let err = generate(&planner, &trip(), None).await.unwrap_err();

        assert!(err.to_string().contains("API key not valid"));
    }
}
