//! Operational HTTP endpoints.
//!
//! - `/metrics` : exposition text, always 200

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use ethgaze_core::render::render_exposition;

use crate::app_state::AppState;

/// Render one store snapshot as exposition text.
///
/// Never an error status: internal fetch failures render as stale/zero
/// values, not as HTTP failures.
pub async fn metrics(axum::extract::State(state): axum::extract::State<AppState>) -> Response {
    let (observations, stats) = state.store().snapshot().await;
    let body = render_exposition(state.prefix(), state.registry(), &observations, &stats);

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
