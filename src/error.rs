// src/error.rs
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::powerdns::error::PdnsError;
use crate::sync::{InvalidRecord, SyncError};

/// Fallback message for failures that carry nothing worth showing.
pub const GENERIC_FAILURE: &str = "Something went wrong";

#[derive(Debug, Serialize)]
pub struct ErrorResponseBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_records: Option<Vec<InvalidRecord>>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<PdnsError> for AppError {
    fn from(err: PdnsError) -> Self {
        AppError::Sync(SyncError::Pdns(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut invalid_records = None;
        let (status, msg) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found".into()),
            AppError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "method not allowed".into())
            }
            AppError::Sync(SyncError::Validation(invalid)) => {
                let msg = format!("{} invalid record(s)", invalid.len());
                invalid_records = Some(invalid);
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::Sync(SyncError::InvalidZone(msg)) => (StatusCode::BAD_REQUEST, msg),
            AppError::Sync(SyncError::Pdns(err)) => {
                let status = err.status();
                match err {
                    PdnsError::Transport(e) => {
                        tracing::error!(error = %e, "PowerDNS unreachable");
                        (status, "PowerDNS is unreachable".into())
                    }
                    PdnsError::InvalidResponse(e) => {
                        tracing::error!(error = %e, "undecodable PowerDNS response");
                        (status, "unexpected response from PowerDNS".into())
                    }
                    other => (status, other.to_string()),
                }
            }
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.into())
            }
        };

        let body = Json(ErrorResponseBody {
            error: msg,
            invalid_records,
        });
        (status, body).into_response()
    }
}
