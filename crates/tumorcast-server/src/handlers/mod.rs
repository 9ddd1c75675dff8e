//! HTTP route handlers for the classifier server.

pub mod features;
pub mod predict;

use axum::Json;

use crate::dto::StatusResponse;

pub const STATUS_MESSAGE: &str = "Breast Cancer Classification API is up";

/// GET / - Liveness message, independent of artifact state.
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse { message: STATUS_MESSAGE })
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
