use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::envelope::Envelope;

/// Failures raised by the repositories.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unique constraint violated")]
    Duplicate,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Errors returned by the enveloped routes (auth, user, comment).
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid id")]
    MalformedIdentity,

    #[error("Username not found.")]
    UserNotFound,

    #[error("Username already exists.")]
    DuplicateUsername,

    #[error("Password must contain both uppercase and lowercase letters.")]
    WeakPassword,

    #[error("Username must includes more than 7 charactors.")]
    UsernameTooShort,

    #[error("Password must includes more than 7 charactors.")]
    PasswordTooShort,

    #[error("Username or password is incorrect")]
    InvalidCredentials,

    #[error("{0:#}")]
    StoreFailure(anyhow::Error),

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::MalformedIdentity
            | ApiError::DuplicateUsername
            | ApiError::WeakPassword => StatusCode::BAD_REQUEST,
            ApiError::UsernameTooShort | ApiError::PasswordTooShort => StatusCode::FORBIDDEN,
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::StoreFailure(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate => ApiError::DuplicateUsername,
            StoreError::Backend(e) => ApiError::StoreFailure(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(Envelope::<()>::error(status, self.to_string()))).into_response()
    }
}

/// Failure of a plain-data route: HTTP 500 with a bare `{message}` body.
#[derive(Error, Debug)]
#[error("{0:#}")]
pub struct PlainError(#[from] pub StoreError);

impl IntoResponse for PlainError {
    fn into_response(self) -> Response {
        error!(error = %self, "data query failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": self.to_string() })),
        )
            .into_response()
    }
}
