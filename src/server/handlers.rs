//! HTTP request handlers

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::inference::{PayloadError, PredictionResult};

use super::error::{ApiError, Result};
use super::response::PrettyJson;
use super::state::AppState;

pub const HEALTH_MESSAGE: &str = "API en línea y a la espera";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub mensaje: &'static str,
}

/// Wire form of a prediction
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    #[serde(rename = "predicción")]
    pub prediction: &'static str,
    #[serde(rename = "probabilidad")]
    pub probability: f64,
}

impl From<PredictionResult> for PredictionResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            prediction: result.diagnosis.wire_label(),
            probability: result.confidence,
        }
    }
}

/// Liveness only; the classifier is not consulted.
pub async fn health_check() -> impl IntoResponse {
    info!("Health check requested");
    PrettyJson(
        StatusCode::OK,
        HealthResponse {
            status: "OK",
            mensaje: HEALTH_MESSAGE,
        },
    )
}

pub async fn predict(State(state): State<Arc<AppState>>, body: Bytes) -> Result<impl IntoResponse> {
    // Anything that is not a JSON document counts as an empty payload.
    let value: Value = serde_json::from_slice(&body).map_err(|_| PayloadError::EmptyPayload)?;
    let response = run_prediction(&state, value)?;
    Ok(PrettyJson(StatusCode::OK, response))
}

/// Normalize, classify and shape one payload. Shared by the HTTP handler and
/// the offline `predict` command.
pub fn run_prediction(state: &AppState, value: Value) -> Result<PredictionResponse> {
    let row = state.normalizer.normalize(value)?;
    let result = state.engine.predict(&row)?;

    info!(
        label = result.diagnosis.wire_label(),
        class = result.class_index,
        probability = %format!("{:.4}", result.confidence),
        shape = %row.shape(),
        "Prediction served"
    );
    Ok(result.into())
}

pub async fn handle_404() -> ApiError {
    ApiError::NotFound
}

pub async fn handle_405() -> ApiError {
    ApiError::MethodNotAllowed
}
