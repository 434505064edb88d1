use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::services::gemini_service::LlmError;
use crate::services::history_service::StoreError;
use crate::services::maps_service::MapsError;

/// Error returned by every handler. Renders as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    RateLimited(String),
    #[error("{0}")]
    Database(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    NotConfigured(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        HttpResponse::build(self.status_code()).json(ErrorBody { error: &message })
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        if err.is_rate_limit() {
            ApiError::RateLimited(
                "The itinerary service is busy right now. Please try again shortly.".to_string(),
            )
        } else {
            ApiError::Upstream(format!("Itinerary generation failed: {}", err))
        }
    }
}

impl From<MapsError> for ApiError {
    fn from(err: MapsError) -> Self {
        ApiError::Upstream(format!("Google Maps API request failed: {}", err))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidId(id) => ApiError::Validation(format!("Invalid ID: {}", id)),
            StoreError::NotFound(what) => ApiError::NotFound(format!("{} not found", what)),
            StoreError::Database(e) => {
                log::error!("Database error: {:?}", e);
                ApiError::Database("Database operation failed".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Unauthorized("x".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Upstream("x".into()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(ApiError::RateLimited("x".into()).status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            ApiError::NotConfigured("x".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[actix_rt::test]
    async fn test_error_body_is_json() {
        let resp = ApiError::Validation("Destination is required".into()).error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Destination is required");
    }

    #[test]
    fn test_maps_error_is_upstream() {
        let err: ApiError = MapsError::NoResults("Atlantis".into()).into();
        assert!(matches!(err, ApiError::Upstream(_)));
        assert!(err.to_string().starts_with("Google Maps API request failed"));
    }

    #[test]
    fn test_store_invalid_id_is_validation() {
        let err: ApiError = StoreError::InvalidId("abc".into()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
