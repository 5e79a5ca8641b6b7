use axum::http::StatusCode;

use crate::AuthContext;

#[derive(Debug, Clone)]
pub enum GuardError {
    SubjectMismatch { expected: String, received: String },
}

impl GuardError {
    pub fn into_response(self) -> (StatusCode, String) {
        match self {
            GuardError::SubjectMismatch { expected, received } => (
                StatusCode::FORBIDDEN,
                format!(
                    "Authenticated subject ({expected}) does not match requested identity ({received})",
                ),
            ),
        }
    }
}

impl From<GuardError> for (StatusCode, String) {
    fn from(value: GuardError) -> Self {
        value.into_response()
    }
}

/// Reject requests where a caller-supplied identity differs from the verified
/// subject. Stops a valid token for one user being replayed against another
/// user's resources via a path or query parameter.
pub fn ensure_subject(auth: &AuthContext, requested: &str) -> Result<(), GuardError> {
    let requested = requested.trim();
    if requested == auth.email() {
        Ok(())
    } else {
        Err(GuardError::SubjectMismatch {
            expected: auth.email().to_owned(),
            received: requested.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::Claims;
    use chrono::{Duration, Utc};

    fn ctx(email: &str) -> AuthContext {
        AuthContext {
            claims: Claims {
                subject: email.to_owned(),
                expires_at: Utc::now() + Duration::hours(1),
                issued_at: Some(Utc::now()),
                raw: serde_json::Value::Null,
            },
        }
    }

    #[test]
    fn matching_subject_passes() {
        let auth = ctx("diner@bistro.test");
        ensure_subject(&auth, "diner@bistro.test").expect("same subject");
    }

    #[test]
    fn mismatched_subject_is_forbidden() {
        let auth = ctx("diner@bistro.test");
        let err = ensure_subject(&auth, "other@bistro.test").expect_err("mismatch");
        let (status, _) = err.into_response();
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
