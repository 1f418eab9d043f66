//! The single-page planning form

use axum::{Router, response::Html, routing::get};
use tripcal_core::progress::{LOADING_MESSAGES, PROGRESS_INTERVAL};

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// GET / - The planning form
async fn index() -> Html<String> {
    Html(render_index())
}

fn render_index() -> String {
    let messages = serde_json::to_string(&LOADING_MESSAGES).unwrap_or_else(|_| "[]".to_string());

    INDEX_HTML
        .replace("__LOADING_MESSAGES__", &messages)
        .replace(
            "__PROGRESS_INTERVAL_MS__",
            &PROGRESS_INTERVAL.as_millis().to_string(),
        )
}
