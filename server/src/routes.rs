use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use rand::Rng;
use tracing::info;

use crate::{
    error::AppError,
    sheets::fetch_rows,
    state::AppState,
    stats::{StatsSnapshot, build_snapshot},
};

pub async fn form_data_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsSnapshot>, AppError> {
    let rows = fetch_rows(&state.http, &state.config).await?;
    info!("Fetched {} sheet rows", rows.len());

    let snapshot = build_snapshot(&rows, Utc::now().naive_utc(), |len| {
        rand::rng().random_range(0..len)
    })?;

    Ok(Json(snapshot))
}

pub async fn health_handler() -> impl IntoResponse {
    StatusCode::OK
}
