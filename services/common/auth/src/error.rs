use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization header missing")]
    MissingAuthorization,
    #[error("authorization header malformed")]
    InvalidAuthorization,
    #[error("token verification failed: {0}")]
    Verification(String),
    #[error("invalid claim '{0}' with value '{1}'")]
    InvalidClaim(&'static str, String),
    #[error("malformed claim payload: {0}")]
    InvalidJson(String),
    #[error("token subject must be a non-empty email")]
    EmptySubject,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        Self::Verification(value.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthError::MissingAuthorization | AuthError::InvalidAuthorization => {
                (StatusCode::UNAUTHORIZED, "AUTH_HEADER")
            }
            AuthError::Verification(_) => (StatusCode::UNAUTHORIZED, "AUTH_TOKEN"),
            AuthError::InvalidClaim(_, _) | AuthError::InvalidJson(_) => {
                (StatusCode::UNAUTHORIZED, "AUTH_CLAIMS")
            }
            AuthError::EmptySubject => (StatusCode::BAD_REQUEST, "AUTH_SUBJECT"),
            AuthError::Signing(_) => (StatusCode::INTERNAL_SERVER_ERROR, "AUTH_SIGNING"),
        };

        let body = ErrorBody {
            code,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
