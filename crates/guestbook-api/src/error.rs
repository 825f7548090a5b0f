use std::error::Error as _;

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use guestbook_db::DbError;
use guestbook_types::api::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("{0}")]
    Validation(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] DbError),

    /// The request was refused while extracting it, e.g. an oversized body.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MissingDatabaseUrl | ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Rejected { status, .. } => *status,
        }
    }

    /// The error message followed by its sources. Driver errors keep the
    /// useful part (the server's message) in the source chain.
    pub fn detail(&self) -> String {
        let mut detail = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !detail.contains(&cause_text) {
                detail.push_str(": ");
                detail.push_str(&cause_text);
            }
            source = cause.source();
        }
        detail
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation(_) | ApiError::MethodNotAllowed | ApiError::NotFound => ErrorBody {
                error: self.to_string(),
                detail: None,
            },
            ApiError::Rejected { detail, .. } => {
                warn!("Request rejected ({}): {}", status, detail);
                ErrorBody {
                    error: "Server error".into(),
                    detail: Some(detail.clone()),
                }
            }
            ApiError::MissingDatabaseUrl | ApiError::Storage(_) => {
                let detail = self.detail();
                error!("Request failed: {}", detail);
                ErrorBody {
                    error: "Server error".into(),
                    detail: Some(detail),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
