use axum::{
    extract::{Path, Query, State},
    Json,
};
use bigdecimal::BigDecimal;
use common_auth::{ensure_subject, AuthContext};
use common_http_errors::ApiError;
use common_money::normalize_scale;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::menu_handlers::DeleteOutcome;
use crate::AppState;

#[derive(Debug, Serialize, FromRow)]
pub struct CartItem {
    pub id: Uuid,
    pub owner_email: String,
    pub menu_item_id: Uuid,
    pub name: Option<String>,
    pub price: BigDecimal,
}

#[derive(Debug, Deserialize)]
pub struct NewCartItem {
    pub email: String,
    #[serde(rename = "menuItemId")]
    pub menu_item_id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    pub price: BigDecimal,
}

/// POST /carts: add one selection to a cart.
pub async fn add_cart_item(
    State(state): State<AppState>,
    Json(new_item): Json<NewCartItem>,
) -> Result<Json<CartItem>, ApiError> {
    let item = sqlx::query_as::<_, CartItem>(
        "INSERT INTO cart_items (id, owner_email, menu_item_id, name, price)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, owner_email, menu_item_id, name, price",
    )
    .bind(Uuid::new_v4())
    .bind(&new_item.email)
    .bind(new_item.menu_item_id)
    .bind(&new_item.name)
    .bind(normalize_scale(&new_item.price))
    .fetch_one(&state.db)
    .await
    .map_err(|e| ApiError::upstream("upstream_database", e))?;

    Ok(Json(item))
}

#[derive(Debug, Deserialize)]
pub struct CartQuery {
    #[serde(default)]
    pub email: Option<String>,
}

/// GET /carts?email=: list a user's cart.
///
/// An absent or empty email short-circuits to an empty list. A present email
/// must equal the verified subject; otherwise the request is rejected, which
/// keeps one user's valid token from reading another user's cart.
pub async fn list_cart_items(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<CartQuery>,
) -> Result<Json<Vec<CartItem>>, ApiError> {
    let email = match query.email.as_deref().map(str::trim) {
        None | Some("") => return Ok(Json(Vec::new())),
        Some(email) => email,
    };

    ensure_subject(&auth, email).map_err(|_| ApiError::Forbidden)?;

    let items = sqlx::query_as::<_, CartItem>(
        "SELECT id, owner_email, menu_item_id, name, price
         FROM cart_items WHERE owner_email = $1",
    )
    .bind(email)
    .fetch_all(&state.db)
    .await
    .map_err(|e| ApiError::upstream("upstream_database", e))?;

    Ok(Json(items))
}

/// DELETE /carts/:id: remove one selection. Absent ids are a zero-effect
/// success.
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    let result = sqlx::query("DELETE FROM cart_items WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await
        .map_err(|e| ApiError::upstream("upstream_database", e))?;

    Ok(Json(DeleteOutcome {
        deleted: result.rows_affected(),
    }))
}
