use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Shared request-failure taxonomy.
///
/// Every variant renders as `{code, message}` JSON plus an `X-Error-Code`
/// header so callers can tell auth failures from data failures without
/// parsing the body. Deleting or updating an absent row is NOT an error in
/// this taxonomy; handlers report it as a zero-effect success.
#[derive(Debug)]
pub enum ApiError {
    /// Authenticated but lacking the required role.
    ForbiddenMissingRole { role: &'static str },
    /// Authenticated but acting on another subject's resources.
    Forbidden,
    BadRequest {
        code: &'static str,
        message: Option<String>,
    },
    NotFound { code: &'static str },
    /// The first write of a multi-step operation landed, a later one did not.
    /// The caller should retry only the unfinished step.
    PartialFailure {
        code: &'static str,
        message: String,
    },
    /// Storage or an external provider is unavailable. Retryable for
    /// idempotent reads; not safe to blindly retry for payment writes.
    Upstream {
        code: &'static str,
        message: String,
    },
    Internal { message: Option<String> },
}

impl ApiError {
    pub fn internal<E: std::fmt::Display>(e: E) -> Self {
        Self::Internal {
            message: Some(e.to_string()),
        }
    }

    pub fn bad_request(code: &'static str) -> Self {
        Self::BadRequest {
            code,
            message: None,
        }
    }

    pub fn upstream<E: std::fmt::Display>(code: &'static str, e: E) -> Self {
        Self::Upstream {
            code,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body, error_code) = match self {
            ApiError::ForbiddenMissingRole { role } => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    code: "missing_role".into(),
                    missing_role: Some(role.into()),
                    message: None,
                },
                "missing_role",
            ),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    code: "forbidden".into(),
                    missing_role: None,
                    message: None,
                },
                "forbidden",
            ),
            ApiError::BadRequest { code, message } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: code.into(),
                    missing_role: None,
                    message,
                },
                code,
            ),
            ApiError::NotFound { code } => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: code.into(),
                    missing_role: None,
                    message: None,
                },
                code,
            ),
            ApiError::PartialFailure { code, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    code: code.into(),
                    missing_role: None,
                    message: Some(message),
                },
                code,
            ),
            ApiError::Upstream { code, message } => (
                StatusCode::BAD_GATEWAY,
                ErrorBody {
                    code: code.into(),
                    missing_role: None,
                    message: Some(message),
                },
                code,
            ),
            ApiError::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    code: "internal_error".into(),
                    missing_role: None,
                    message,
                },
                "internal_error",
            ),
        };
        let mut resp = (status, Json(body)).into_response();
        if let Ok(val) = HeaderValue::from_str(error_code) {
            resp.headers_mut().insert("X-Error-Code", val);
        }
        resp
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
