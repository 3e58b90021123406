//! HTTP error boundary.
//!
//! Every failure a handler can hit becomes one `ApiError`, rendered as
//! `{"detail": ..., "field": ...}` with the matching status code.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use orgdir_core::db::DbError;
use orgdir_core::{DirectoryError, RepoError, ValidationError};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::task::JoinError;

#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    NotFound(String),
    Validation {
        field: Option<String>,
        detail: String,
    },
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn malformed_request(detail: String) -> Self {
        Self::Validation {
            field: None,
            detail,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "invalid or missing API key"),
            Self::NotFound(detail) => write!(f, "{detail}"),
            Self::Validation {
                field: Some(field),
                detail,
            } => write!(f, "{field}: {detail}"),
            Self::Validation { field: None, detail } => write!(f, "{detail}"),
            Self::Internal(_) => write!(f, "internal server error"),
        }
    }
}

impl Error for ApiError {}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Internal(cause) => {
                error!("event=request_failed module=http status=error error={cause}");
                ErrorBody {
                    detail: "internal server error".to_string(),
                    field: None,
                }
            }
            Self::Validation { field, detail } => ErrorBody { detail, field },
            other => ErrorBody {
                detail: other.to_string(),
                field: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<DirectoryError> for ApiError {
    fn from(value: DirectoryError) -> Self {
        match value {
            DirectoryError::NotFound { .. } => Self::NotFound(value.to_string()),
            DirectoryError::Validation(err) => err.into(),
            DirectoryError::Repo(err) => err.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        Self::Validation {
            field: Some(value.field),
            detail: value.message,
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<JoinError> for ApiError {
    fn from(value: JoinError) -> Self {
        Self::Internal(format!("blocking task failed: {value}"))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::malformed_request(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::malformed_request(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::malformed_request(value.body_text())
    }
}
