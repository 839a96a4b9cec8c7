use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Any network, credential, or decode failure while reading the
    /// spreadsheet. Detail is logged where it happens; only the generic
    /// message goes out over the wire.
    #[error("Failed to fetch data")]
    FetchFailed,

    /// Zero rows in the sheet. A valid state, so this is a soft error
    /// object rather than a 5xx.
    #[error("No data found")]
    NoData,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::FetchFailed => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NoData => StatusCode::OK,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
