use axum::{http::StatusCode, response::{IntoResponse, Html}};
use thiserror::Error;
use uuid::Uuid;

use crate::web::utils::error_page;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("invalid timestamp format {0:?}: {1}")]
    Format(String, #[source] time::error::InvalidFormatDescription),
    #[error("invalid NOVELTY_VALUES: {0}")]
    Values(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("article {0} not found")]
    NotFound(Uuid),
    #[error("unknown attribute {0:?}")]
    UnknownAttribute(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::NotFound(_) | AppError::UnknownAttribute(_) => StatusCode::NOT_FOUND,
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Html(error_page(&self.to_string()))).into_response()
    }
}
