use axum::{
    extract::{Path, State},
    Json,
};
use common_auth::{ensure_subject, AuthContext, AuthError, IssuedToken, Role};
use common_http_errors::ApiError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::info;
use uuid::Uuid;

use crate::{require_admin, AppState};

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /jwt: sign an identity token for the submitted subject.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let IssuedToken { token, .. } = state.token_signer.issue(&request.email)?;
    Ok(Json(TokenResponse { token }))
}

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct UserUpsert {
    pub created: bool,
    pub user: User,
}

/// POST /users: upsert-by-email. A second post with the same email reports
/// `created: false` and leaves the stored row untouched (never an overwrite).
pub async fn create_user(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> Result<Json<UserUpsert>, ApiError> {
    let email = new_user.email.trim().to_owned();
    if email.is_empty() {
        return Err(ApiError::bad_request("missing_email"));
    }

    let inserted = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, email, name, role)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (email) DO NOTHING
         RETURNING id, email, name, role",
    )
    .bind(Uuid::new_v4())
    .bind(&email)
    .bind(&new_user.name)
    .bind(Role::default().as_str())
    .fetch_optional(&state.db)
    .await
    .map_err(|e| ApiError::upstream("upstream_database", e))?;

    match inserted {
        Some(user) => {
            info!(email = %user.email, "registered new user");
            Ok(Json(UserUpsert {
                created: true,
                user,
            }))
        }
        None => {
            let user = sqlx::query_as::<_, User>(
                "SELECT id, email, name, role FROM users WHERE email = $1",
            )
            .bind(&email)
            .fetch_one(&state.db)
            .await
            .map_err(|e| ApiError::upstream("upstream_database", e))?;

            Ok(Json(UserUpsert {
                created: false,
                user,
            }))
        }
    }
}

/// GET /users: admin only.
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<User>>, ApiError> {
    require_admin(&state.db, &auth).await?;

    let users =
        sqlx::query_as::<_, User>("SELECT id, email, name, role FROM users ORDER BY created_at")
            .fetch_all(&state.db)
            .await
            .map_err(|e| ApiError::upstream("upstream_database", e))?;

    Ok(Json(users))
}

#[derive(Debug, Serialize)]
pub struct AdminFlag {
    pub admin: bool,
}

/// GET /users/admin/:email: answers "is the caller an admin".
///
/// A caller asking about any identity other than its own verified subject is
/// answered `admin: false` without consulting storage, so one user cannot
/// probe another's role with a substituted path parameter.
pub async fn admin_check(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(email): Path<String>,
) -> Result<Json<AdminFlag>, ApiError> {
    if ensure_subject(&auth, &email).is_err() {
        return Ok(Json(AdminFlag { admin: false }));
    }

    let role: Option<String> = sqlx::query_scalar("SELECT role FROM users WHERE email = $1")
        .bind(auth.email())
        .fetch_optional(&state.db)
        .await
        .map_err(|e| ApiError::upstream("upstream_database", e))?;

    let admin = role
        .map(|stored| Role::from_str(&stored).is_admin())
        .unwrap_or(false);
    Ok(Json(AdminFlag { admin }))
}

#[derive(Debug, Serialize)]
pub struct PromoteOutcome {
    pub updated: u64,
}

/// PATCH /users/admin/:id: promote a user to admin.
///
/// Admin-gated: roles are never self-assigned. Promoting an id that does not
/// exist is a zero-effect success (`updated: 0`).
pub async fn promote_user(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<Json<PromoteOutcome>, ApiError> {
    require_admin(&state.db, &auth).await?;

    let user_id = Uuid::parse_str(id.trim()).map_err(|_| ApiError::BadRequest {
        code: "invalid_user_id",
        message: Some(format!("'{id}' is not a valid user id")),
    })?;

    let result = sqlx::query("UPDATE users SET role = $1 WHERE id = $2")
        .bind(Role::Admin.as_str())
        .bind(user_id)
        .execute(&state.db)
        .await
        .map_err(|e| ApiError::upstream("upstream_database", e))?;

    let updated = result.rows_affected();
    if updated > 0 {
        info!(%user_id, promoted_by = %auth.email(), "promoted user to admin");
    }
    Ok(Json(PromoteOutcome { updated }))
}
