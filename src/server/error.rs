use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::classifier::ClassifierError;
use crate::processing::analysis::AnalysisError;
use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Analysis(AnalysisError::UnsupportedUrl(_)) => StatusCode::BAD_REQUEST,
            ApiError::Analysis(AnalysisError::Crawler(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Analysis(AnalysisError::Classifier(ClassifierError::Timeout(_))) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            ApiError::Analysis(AnalysisError::Classifier(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Analysis(AnalysisError::Repository(_))
            | ApiError::Analysis(AnalysisError::PredictionMissing(_))
            | ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {self}");
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
