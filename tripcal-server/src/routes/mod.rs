pub mod page;
pub mod session;
pub mod trips;

use axum::{
    Json, Router,
    body::Body,
    extract::rejection::JsonRejection,
    http::{HeaderMap, HeaderValue, Request, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;
use tripcal_core::TripcalError;
use tripcal_core::session::SessionError;

use crate::state::AppState;

/// Browser requests are only accepted from the page this server serves.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(AllowOrigin::predicate(|origin, parts| {
        is_same_origin(origin, &parts.headers)
    }));

    Router::new()
        .merge(page::router())
        .merge(trips::router())
        .merge(session::router())
        .with_state(state)
        .layer(middleware::from_fn(reject_foreign_origin))
        .layer(cors)
}

/// Requests without an Origin header (curl, top-level navigation) pass through.
async fn reject_foreign_origin(request: Request<Body>, next: Next) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN)
        && !is_same_origin(origin, request.headers())
    {
        warn!(origin = ?origin, path = %request.uri().path(), "Rejected cross-origin request");
        return AppError::new(StatusCode::FORBIDDEN, "Cross-origin requests are not allowed")
            .into_response();
    }
    next.run(request).await
}

fn is_same_origin(origin: &HeaderValue, headers: &HeaderMap) -> bool {
    let Some(host) = headers.get(header::HOST).and_then(|h| h.to_str().ok()) else {
        return false;
    };
    let Ok(origin) = origin.to_str() else {
        return false;
    };

    origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
        .is_some_and(|authority| authority.eq_ignore_ascii_case(host))
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An error on its way to the browser, already reduced to what the user sees
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        AppError {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<&TripcalError> for AppError {
    fn from(err: &TripcalError) -> Self {
        let status = match err {
            err if err.is_invalid_input() => StatusCode::BAD_REQUEST,
            TripcalError::Parse(_) | TripcalError::Provider(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        AppError::new(status, err.user_message())
    }
}

impl From<TripcalError> for AppError {
    fn from(err: TripcalError) -> Self {
        AppError::from(&err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::new(rejection.status(), rejection.body_text())
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::new(StatusCode::CONFLICT, err.to_string())
    }
}
