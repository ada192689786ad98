//! HTTP services. Each submodule exposes its routes and one `process`
//! handler per endpoint.

pub mod auth;
pub mod content;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use common::requests::ErrorResponse;
use log::error;

use crate::gemini::GenerationError;
use crate::store::StoreError;

const GENERATION_FAILED: &str = "Generation failed";

/// Failure of a request, rendered as a status code with a `{detail}` body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Not authenticated")]
    Unauthorized,
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("Content not found")]
    NotFound,
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized | ApiError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(ErrorResponse {
            detail: self.to_string(),
        })
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Conflict(message) => ApiError::BadRequest(message),
            StoreError::Sqlite(e) => {
                error!("database failure: {e}");
                ApiError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::NotConfigured => ApiError::Unavailable(err.to_string()),
            GenerationError::Throttled(cause) => {
                error!("generation throttled upstream: {cause}");
                ApiError::RateLimited
            }
            // The cause stays in the server log; clients get a fixed detail.
            other => {
                error!("generation failure: {other}");
                ApiError::Internal(GENERATION_FAILED.to_string())
            }
        }
    }
}
