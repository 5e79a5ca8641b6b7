use std::collections::BTreeMap;

use axum::{extract::State, Json};
use bigdecimal::BigDecimal;
use common_auth::AuthContext;
use common_http_errors::ApiError;
use common_money::{normalize_scale, sum_prices};
use serde::Serialize;

use crate::{require_admin, AppState};

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub users: i64,
    pub products: i64,
    pub orders: i64,
    pub revenue: BigDecimal,
}

async fn count_rows(db: &sqlx::PgPool, table: &str) -> Result<i64, ApiError> {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(db)
        .await
        .map_err(|e| ApiError::upstream("upstream_database", e))
}

/// GET /admin-stats: collection cardinalities plus total revenue.
pub async fn admin_stats(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<SummaryStats>, ApiError> {
    require_admin(&state.db, &auth).await?;

    let users = count_rows(&state.db, "users").await?;
    let products = count_rows(&state.db, "menu_items").await?;
    let orders = count_rows(&state.db, "payments").await?;

    let prices: Vec<BigDecimal> = sqlx::query_scalar("SELECT price FROM payments")
        .fetch_all(&state.db)
        .await
        .map_err(|e| ApiError::upstream("upstream_database", e))?;
    let revenue = sum_prices(&prices);

    Ok(Json(SummaryStats {
        users,
        products,
        orders,
        revenue,
    }))
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CategoryStat {
    pub category: String,
    #[serde(rename = "itemCount")]
    pub item_count: i64,
    pub total: BigDecimal,
}

/// Group resolved (category, price) pairs into per-category counts and
/// 2-decimal totals. Output order is unspecified.
pub fn rollup_categories(resolved: Vec<(String, BigDecimal)>) -> Vec<CategoryStat> {
    let mut groups: BTreeMap<String, (i64, BigDecimal)> = BTreeMap::new();
    for (category, price) in resolved {
        let entry = groups
            .entry(category)
            .or_insert_with(|| (0, BigDecimal::from(0)));
        entry.0 += 1;
        entry.1 += price;
    }

    groups
        .into_iter()
        .map(|(category, (item_count, total))| CategoryStat {
            category,
            item_count,
            total: normalize_scale(&total),
        })
        .collect()
}

/// GET /order-stats: per-category rollup over every recorded payment.
///
/// Each payment's menu item references are flattened and resolved against the
/// menu; a reference whose menu item was deleted no longer resolves and is
/// dropped from the rollup (inner-join policy, not an error).
pub async fn order_stats(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<CategoryStat>>, ApiError> {
    require_admin(&state.db, &auth).await?;

    let resolved: Vec<(String, BigDecimal)> = sqlx::query_as(
        "SELECT m.category, m.price
         FROM payments p
         CROSS JOIN LATERAL unnest(p.menu_item_ids) AS ordered(menu_item_id)
         JOIN menu_items m ON m.id = ordered.menu_item_id",
    )
    .fetch_all(&state.db)
    .await
    .map_err(|e| ApiError::upstream("upstream_database", e))?;

    Ok(Json(rollup_categories(resolved)))
}
