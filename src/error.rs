use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("movie catalog request failed")]
    Upstream(anyhow::Error),
    #[error("database operation failed")]
    Db(#[from] sea_orm::DbErr),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream(anyhow::Error::new(err))
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Db(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand to a caller. Server-fault classes get a generic
    /// line; the underlying chain only ever goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Upstream(_) => "movie catalog request failed".to_string(),
            AppError::Db(_) | AppError::Internal(_) => "internal server error".to_string(),
        }
    }

    pub fn log(&self) {
        match self {
            AppError::Upstream(cause) => tracing::error!(error = ?cause, "catalog request failed"),
            AppError::Db(cause) => tracing::error!(error = %cause, "database operation failed"),
            AppError::Internal(cause) => tracing::error!(error = ?cause, "request failed"),
            AppError::BadRequest(_) | AppError::NotFound(_) => {}
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        (self.status(), Json(ErrorBody { error: self.public_message() })).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
