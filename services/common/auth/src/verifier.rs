use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;
use tracing::debug;

use crate::claims::Claims;
use crate::config::TokenConfig;
use crate::error::AuthResult;

/// Verifies signed identity tokens against the process-wide secret.
///
/// Verification fails closed: any tamper, structural defect, or expiry is
/// rejected before claims are surfaced.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_seconds;
        validation.validate_aud = false;

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let token_data = decode::<Value>(token, &self.decoding_key, &self.validation)?;
        let claims = Claims::try_from(token_data.claims)?;
        debug!(subject = %claims.subject, "verified token successfully");
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims<'a> {
        sub: &'a str,
        exp: i64,
        iat: i64,
    }

    fn sign(secret: &str, sub: &str, exp: i64) -> String {
        let claims = TestClaims {
            sub,
            exp,
            iat: Utc::now().timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("sign token")
    }

    #[test]
    fn verifier_accepts_valid_token() {
        let config = TokenConfig::new("secret");
        let verifier = JwtVerifier::new(&config);
        let token = sign("secret", "boss@bistro.test", Utc::now().timestamp() + 600);

        let claims = verifier.verify(&token).expect("verification succeeds");
        assert_eq!(claims.subject, "boss@bistro.test");
    }

    #[test]
    fn verifier_rejects_wrong_secret() {
        let config = TokenConfig::new("secret");
        let verifier = JwtVerifier::new(&config);
        let token = sign("other-secret", "boss@bistro.test", Utc::now().timestamp() + 600);

        let err = verifier.verify(&token).expect_err("tampered signature");
        assert!(matches!(err, AuthError::Verification(_)));
    }

    #[test]
    fn verifier_rejects_expired_token_despite_valid_signature() {
        let config = TokenConfig::new("secret").with_leeway(0);
        let verifier = JwtVerifier::new(&config);
        let token = sign("secret", "boss@bistro.test", Utc::now().timestamp() - 120);

        let err = verifier.verify(&token).expect_err("expired token");
        assert!(matches!(err, AuthError::Verification(_)));
    }

    #[test]
    fn verifier_rejects_garbage() {
        let config = TokenConfig::new("secret");
        let verifier = JwtVerifier::new(&config);

        let err = verifier.verify("not-a-token").expect_err("malformed token");
        assert!(matches!(err, AuthError::Verification(_)));
    }
}
