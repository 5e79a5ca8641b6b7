use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// Application-focused representation of verified token claims.
///
/// The subject is the email the token was issued for; it is established at
/// issuance and immutable for the token's lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct Claims {
    pub subject: String,
    pub expires_at: DateTime<Utc>,
    pub issued_at: Option<DateTime<Utc>>,
    pub raw: serde_json::Value,
}

impl Claims {
    /// The authenticated email this token asserts.
    pub fn email(&self) -> &str {
        &self.subject
    }
}

#[derive(Debug, Deserialize)]
struct ClaimsRepr {
    sub: String,
    exp: i64,
    #[serde(default)]
    iat: Option<i64>,
}

impl TryFrom<ClaimsRepr> for Claims {
    type Error = AuthError;

    fn try_from(value: ClaimsRepr) -> AuthResult<Self> {
        let subject = value.sub.trim().to_owned();
        if subject.is_empty() {
            return Err(AuthError::InvalidClaim("sub", value.sub));
        }

        let expires_at = Utc
            .timestamp_opt(value.exp, 0)
            .single()
            .ok_or_else(|| AuthError::InvalidClaim("exp", value.exp.to_string()))?;

        let issued_at = match value.iat {
            Some(iat) => Some(
                Utc.timestamp_opt(iat, 0)
                    .single()
                    .ok_or_else(|| AuthError::InvalidClaim("iat", iat.to_string()))?,
            ),
            None => None,
        };

        Ok(Self {
            subject,
            expires_at,
            issued_at,
            raw: serde_json::Value::Null,
        })
    }
}

impl TryFrom<serde_json::Value> for Claims {
    type Error = AuthError;

    fn try_from(value: serde_json::Value) -> AuthResult<Self> {
        let repr: ClaimsRepr = serde_json::from_value(value.clone())
            .map_err(|err| AuthError::InvalidJson(err.to_string()))?;
        let mut claims = Claims::try_from(repr)?;
        claims.raw = value;
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn claims_from_value_keeps_raw_payload() {
        let value = json!({"sub": "boss@bistro.test", "exp": 4102444800i64, "iat": 1700000000});
        let claims = Claims::try_from(value.clone()).expect("claims");
        assert_eq!(claims.subject, "boss@bistro.test");
        assert_eq!(claims.issued_at.unwrap().timestamp(), 1700000000);
        assert_eq!(claims.raw, value);
    }

    #[test]
    fn claims_reject_blank_subject() {
        let value = json!({"sub": "   ", "exp": 4102444800i64});
        let err = Claims::try_from(value).expect_err("blank subject");
        assert!(matches!(err, AuthError::InvalidClaim("sub", _)));
    }

    #[test]
    fn claims_reject_missing_exp() {
        let value = json!({"sub": "boss@bistro.test"});
        let err = Claims::try_from(value).expect_err("missing exp");
        assert!(matches!(err, AuthError::InvalidJson(_)));
    }
}
