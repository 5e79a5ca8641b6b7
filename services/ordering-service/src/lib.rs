use std::sync::Arc;

use axum::extract::FromRef;
use common_auth::{AuthContext, JwtVerifier, Role, TokenSigner};
use common_http_errors::ApiError;
use sqlx::PgPool;

use crate::provider::PaymentProvider;

pub mod app;
pub mod cart_handlers;
pub mod config;
pub mod db;
pub mod menu_handlers;
pub mod payment_handlers;
pub mod provider;
pub mod review_handlers;
pub mod stats_handlers;
pub mod user_handlers;

/// Shared application state, constructed once in `main` and injected into
/// every handler. No module-level singletons.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_verifier: Arc<JwtVerifier>,
    pub token_signer: Arc<TokenSigner>,
    pub payment_provider: Arc<dyn PaymentProvider>,
}

impl FromRef<AppState> for Arc<JwtVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_verifier.clone()
    }
}

impl FromRef<AppState> for Arc<TokenSigner> {
    fn from_ref(state: &AppState) -> Self {
        state.token_signer.clone()
    }
}

/// Role check for privileged operations. Trusts `auth` as verified identity,
/// so it must only run after the bearer extractor has succeeded.
pub async fn require_admin(db: &PgPool, auth: &AuthContext) -> Result<(), ApiError> {
    let role: Option<String> = sqlx::query_scalar("SELECT role FROM users WHERE email = $1")
        .bind(auth.email())
        .fetch_optional(db)
        .await
        .map_err(|e| ApiError::upstream("upstream_database", e))?;

    match role {
        Some(stored) if Role::from_str(&stored).is_admin() => Ok(()),
        _ => Err(ApiError::ForbiddenMissingRole { role: "admin" }),
    }
}
