use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;

use crate::config::TokenConfig;
use crate::error::{AuthError, AuthResult};

/// Issues signed, time-limited identity tokens.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    ttl_seconds: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct SubjectClaims<'a> {
    sub: &'a str,
    exp: i64,
    iat: i64,
}

impl TokenSigner {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            ttl_seconds: config.ttl_seconds,
        }
    }

    /// Sign a token asserting `subject` for the configured TTL.
    ///
    /// The only input requirement is a non-empty subject email.
    pub fn issue(&self, subject: &str) -> AuthResult<IssuedToken> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(AuthError::EmptySubject);
        }

        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.ttl_seconds);
        let claims = SubjectClaims {
            sub: subject,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| AuthError::Signing(err.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verifier::JwtVerifier;

    #[test]
    fn issue_then_verify_round_trips_subject() {
        let config = TokenConfig::new("test-secret");
        let signer = TokenSigner::new(&config);
        let verifier = JwtVerifier::new(&config);

        let issued = signer.issue("chef@bistro.test").expect("issue");
        let claims = verifier.verify(&issued.token).expect("verify");
        assert_eq!(claims.subject, "chef@bistro.test");
        assert_eq!(claims.expires_at, issued.expires_at);
    }

    #[test]
    fn issue_trims_subject_whitespace() {
        let config = TokenConfig::new("test-secret");
        let signer = TokenSigner::new(&config);
        let verifier = JwtVerifier::new(&config);

        let issued = signer.issue("  chef@bistro.test ").expect("issue");
        let claims = verifier.verify(&issued.token).expect("verify");
        assert_eq!(claims.subject, "chef@bistro.test");
    }

    #[test]
    fn issue_rejects_empty_subject() {
        let config = TokenConfig::new("test-secret");
        let signer = TokenSigner::new(&config);
        let err = signer.issue("   ").expect_err("empty subject");
        assert!(matches!(err, AuthError::EmptySubject));
    }
}
