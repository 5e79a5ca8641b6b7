use axum::{extract::State, Json};
use common_http_errors::ApiError;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::AppState;

#[derive(Debug, Serialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub name: String,
    pub details: String,
    pub rating: f64,
}

/// GET /reviews: public read.
pub async fn list_reviews(State(state): State<AppState>) -> Result<Json<Vec<Review>>, ApiError> {
    let reviews = sqlx::query_as::<_, Review>("SELECT id, name, details, rating FROM reviews")
        .fetch_all(&state.db)
        .await
        .map_err(|e| ApiError::upstream("upstream_database", e))?;

    Ok(Json(reviews))
}
