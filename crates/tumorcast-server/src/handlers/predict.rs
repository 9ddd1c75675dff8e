//! Inference HTTP handler.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{error, warn};

use crate::dto::{PredictRequest, PredictResponse};
use crate::error::AppError;
use crate::services::predict as predict_service;
use crate::ServerState;

/// POST /predict/ - Classify one 30-value feature vector.
pub async fn predict(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, AppError> {
    let Json(req) = payload.map_err(|rejection| {
        warn!("Rejected predict body: {}", rejection.body_text());
        AppError::from(rejection)
    })?;

    let prediction = predict_service::classify(&state, &req.features).map_err(|e| {
        match &e {
            AppError::Internal(m) => error!("Prediction failed: {}", m),
            other => warn!("Prediction refused: {:?}", other),
        }
        e
    })?;

    Ok(Json(prediction.into()))
}
