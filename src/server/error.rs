//! Error types for the server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use super::response::PrettyJson;
use crate::error::ClassifierError;
use crate::inference::{FeatureShape, PayloadError};

pub const MSG_EMPTY_PAYLOAD: &str = "Se esperaba un JSON con datos";
pub const MSG_POSITIONAL_COUNT: &str =
    "Formato inválido, se requieren 30 características en la lista 'features'";
pub const MSG_NAMED_COUNT: &str = "Formato inválido, se requieren 30 características con nombre";
pub const MSG_INTERNAL: &str = "Error interno en el servidor";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid payload: {0}")]
    Payload(#[from] PayloadError),

    #[error("Inference failed: {0}")]
    Inference(#[from] ClassifierError),

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Payload(_) => StatusCode::BAD_REQUEST,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Message sent to the client. Inference details never leave the server.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Payload(PayloadError::EmptyPayload) => MSG_EMPTY_PAYLOAD.to_string(),
            ApiError::Payload(PayloadError::InvalidFeatureCount { shape, .. }) => match shape {
                FeatureShape::Positional => MSG_POSITIONAL_COUNT.to_string(),
                FeatureShape::Named => MSG_NAMED_COUNT.to_string(),
            },
            ApiError::Payload(PayloadError::UnrecognizedFeatureNames { names }) => {
                format!("Nombres de características no reconocidos: {}", names.join(", "))
            }
            ApiError::Inference(_) => MSG_INTERNAL.to_string(),
            ApiError::NotFound => "Recurso no encontrado".to_string(),
            ApiError::MethodNotAllowed => "Método no permitido".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Payload(e) => {
                tracing::warn!(reason = %e, "Prediction request rejected");
            }
            ApiError::Inference(e) => {
                tracing::error!(detail = %e, "Critical error during prediction");
            }
            ApiError::NotFound | ApiError::MethodNotAllowed => {}
        }

        let body = ErrorBody {
            error: self.client_message(),
        };
        PrettyJson(self.status(), body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
