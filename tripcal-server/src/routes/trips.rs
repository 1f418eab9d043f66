//! Trip planning and calendar download endpoints

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{error, info, warn};
use tripcal_core::ics::{CalendarDownload, CalendarOverview, EventOverview};
use tripcal_core::{TripForm, TripRequest, TripResult, TripcalError};

use crate::routes::AppError;
use crate::state::AppState;

pub const CALENDAR_PATH: &str = "/api/trips/current/calendar";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/trips", post(create_trip))
        .route(CALENDAR_PATH, get(download_calendar))
}

/// A planned trip as returned to the page
#[derive(Serialize)]
pub struct TripResponse {
    pub request: TripRequest,
    pub result: TripResult,
    pub filename: String,
    pub download_url: &'static str,
    pub events: Vec<EventOverview>,
}

/// POST /api/trips - Plan a trip
async fn create_trip(
    State(state): State<AppState>,
    payload: Result<Json<TripForm>, JsonRejection>,
) -> Result<Json<TripResponse>, AppError> {
    let Json(form) = payload?;
    let request = TripRequest::try_from(form)?;

    state.session().lock().await.begin(request.clone())?;

    // Planning runs on its own task so the session still settles if the
    // browser disconnects mid-request.
    let planner = state.planner().clone();
    let session = state.session().clone();
    let task_request = request.clone();
    let planning = tokio::spawn(async move {
        let outcome = planner.plan(&task_request).await;
        let reply = match &outcome {
            Ok(result) => Ok(result.clone()),
            Err(err) => Err(AppError::from(err)),
        };
        if let Err(err) = session.lock().await.settle(outcome) {
            warn!(error = %err, "Session changed while planning");
        }
        reply
    });

    let result = match planning.await {
        Ok(reply) => reply?,
        Err(err) => {
            error!(error = %err, "Planning task failed");
            let failure = TripcalError::Internal(err.to_string());
            let reply = AppError::from(&failure);
            if let Err(err) = state.session().lock().await.settle(Err(failure)) {
                warn!(error = %err, "Session changed while planning");
            }
            return Err(reply);
        }
    };

    let download = CalendarDownload::new(&request, &result);
    let events = CalendarOverview::inspect(&result.ics)
        .map(|overview| overview.events)
        .unwrap_or_default();

    info!(
        destination = %request.destination,
        events = events.len(),
        "Itinerary ready"
    );

    Ok(Json(TripResponse {
        request,
        result,
        filename: download.filename,
        download_url: CALENDAR_PATH,
        events,
    }))
}

/// GET /api/trips/current/calendar - Download the itinerary as .ics
async fn download_calendar(State(state): State<AppState>) -> Result<Response, AppError> {
    let download = state
        .session()
        .lock()
        .await
        .download()
        .ok_or_else(|| AppError::not_found("No itinerary to download yet"))?;

    Ok((
        [
            (header::CONTENT_TYPE, download.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&download.filename),
            ),
        ],
        download.body,
    )
        .into_response())
}

/// Attachment header with an ASCII fallback name plus the UTF-8 original.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_ascii() {
        assert_eq!(
            content_disposition("trip-to-Tokyo.ics"),
            "attachment; filename=\"trip-to-Tokyo.ics\"; filename*=UTF-8''trip-to-Tokyo.ics"
        );
    }

    #[test]
    fn test_content_disposition_non_ascii() {
        let header = content_disposition("trip-to-東京.ics");
        assert!(header.starts_with("attachment; filename=\"trip-to-__.ics\";"));
        assert!(header.ends_with("filename*=UTF-8''trip-to-%E6%9D%B1%E4%BA%AC.ics"));
    }
}
