use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Upload payload missing or unreadable.
    #[error("{detail}")]
    Decode { status: StatusCode, detail: String },
    /// Content could not be processed; answered as a bare 500.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn decode(detail: impl Into<String>) -> Self {
        Self::Decode { status: StatusCode::UNPROCESSABLE_ENTITY, detail: detail.into() }
    }

    /// Keep 413 from the body limit; every other multipart failure is 422.
    pub fn from_multipart(status: StatusCode, detail: String) -> Self {
        let status = if status == StatusCode::PAYLOAD_TOO_LARGE {
            status
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };
        Self::Decode { status, detail }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Decode(detail) => Self::decode(detail),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Decode { status, detail } => {
                warn!(%status, error = %detail, "upload payload rejected");
                (status, Json(ErrorBody::new(detail))).into_response()
            }
            ApiError::Internal(detail) => {
                error!(error = %detail, "upload processing failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
