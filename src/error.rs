use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failures surfaced by the auth realm endpoints. The message is sent back
/// verbatim as the response body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthRealmError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl AuthRealmError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Maps a failed write to `Conflict` when it tripped the (account, name)
    /// uniqueness constraint, to `NotFound` when the row is gone (soft-deleted
    /// since it was read) and to `Internal` otherwise.
    pub fn from_write(context: &str, err: DbErr) -> Self {
        let message = format!("{}: {}", context, err);
        if is_unique_violation(&err) {
            return Self::Conflict(message);
        }
        match err {
            DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => Self::NotFound(message),
            _ => Self::Internal(message),
        }
    }
}

impl From<DbErr> for AuthRealmError {
    fn from(err: DbErr) -> Self {
        Self::Internal(err.to_string())
    }
}

pub fn is_unique_violation(err: &DbErr) -> bool {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return true;
    }
    // Driver wording differs between backends.
    let message = err.to_string().to_ascii_lowercase();
    message.contains("unique constraint") || message.contains("duplicate key")
}

impl IntoResponse for AuthRealmError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "auth realm request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "auth realm request rejected");
        }
        (status, self.to_string()).into_response()
    }
}
