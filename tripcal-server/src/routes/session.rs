//! Session state endpoints

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use tripcal_core::session::PlannerState;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/session", get(get_session))
        .route("/api/session/dismiss", post(dismiss_error))
        .route("/api/session/restart", post(restart))
}

/// GET /api/session - Current planning state
async fn get_session(State(state): State<AppState>) -> Json<PlannerState> {
    Json(state.session().lock().await.state().clone())
}

/// POST /api/session/dismiss - Clear the error so the form can be resubmitted
async fn dismiss_error(State(state): State<AppState>) -> Json<PlannerState> {
    let mut session = state.session().lock().await;
    session.dismiss_error();
    Json(session.state().clone())
}

/// POST /api/session/restart - Discard the current itinerary
async fn restart(State(state): State<AppState>) -> Result<Json<PlannerState>, AppError> {
    let mut session = state.session().lock().await;
    session.restart()?;
    Ok(Json(session.state().clone()))
}
