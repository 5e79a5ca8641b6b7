use axum::{
    extract::{Path, State},
    Json,
};
use bigdecimal::BigDecimal;
use common_auth::AuthContext;
use common_http_errors::ApiError;
use common_money::normalize_scale;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{require_admin, AppState};

#[derive(Debug, Serialize, FromRow)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: BigDecimal,
    pub recipe: Option<String>,
    pub image: Option<String>,
}

/// GET /menu: public catalog read.
pub async fn list_menu(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>, ApiError> {
    let items = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, category, price, recipe, image FROM menu_items ORDER BY category, name",
    )
    .fetch_all(&state.db)
    .await
    .map_err(|e| ApiError::upstream("upstream_database", e))?;

    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub category: String,
    pub price: BigDecimal,
    #[serde(default)]
    pub recipe: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// POST /menu: admin only.
pub async fn create_menu_item(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(new_item): Json<NewMenuItem>,
) -> Result<Json<MenuItem>, ApiError> {
    require_admin(&state.db, &auth).await?;

    let item = sqlx::query_as::<_, MenuItem>(
        "INSERT INTO menu_items (id, name, category, price, recipe, image)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, name, category, price, recipe, image",
    )
    .bind(Uuid::new_v4())
    .bind(&new_item.name)
    .bind(&new_item.category)
    .bind(normalize_scale(&new_item.price))
    .bind(&new_item.recipe)
    .bind(&new_item.image)
    .fetch_one(&state.db)
    .await
    .map_err(|e| ApiError::upstream("upstream_database", e))?;

    Ok(Json(item))
}

#[derive(Debug, Serialize)]
pub struct DeleteOutcome {
    pub deleted: u64,
}

/// DELETE /menu/:id: admin only. Deleting an absent id is a zero-effect
/// success, not an error.
pub async fn delete_menu_item(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    require_admin(&state.db, &auth).await?;

    let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await
        .map_err(|e| ApiError::upstream("upstream_database", e))?;

    Ok(Json(DeleteOutcome {
        deleted: result.rows_affected(),
    }))
}
