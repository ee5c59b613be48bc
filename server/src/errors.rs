use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Missing environment variable {1}: {0}")]
    EnvError(std::env::VarError, String),

    #[error("Invalid value for {0}: {1}")]
    InvalidEnv(String, String),

    #[error("Cannot load candidate catalog: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot serve: {0}")]
    CannotServe(std::io::Error),
}

/// Errors returned to API clients as `{ "error": ... }`
#[derive(Debug, Error)]
pub enum RestError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Daily limit reached")]
    QuotaExhausted,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),
}

pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::Unauthorized => StatusCode::UNAUTHORIZED,
            RestError::QuotaExhausted => StatusCode::FORBIDDEN,
            RestError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RestError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
