use axum::{extract::State, Json};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use common_auth::AuthContext;
use common_http_errors::ApiError;
use common_money::{normalize_scale, to_minor_units};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct IntentRequest {
    pub price: BigDecimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResponse {
    pub client_secret: String,
}

/// POST /create-payment-intent: ask the provider for a charge intent and
/// hand the client secret back to the caller.
pub async fn create_payment_intent(
    State(state): State<AppState>,
    _auth: AuthContext,
    Json(request): Json<IntentRequest>,
) -> Result<Json<IntentResponse>, ApiError> {
    let amount_minor = to_minor_units(&request.price)
        .filter(|amount| *amount > 0)
        .ok_or(ApiError::BadRequest {
            code: "invalid_price",
            message: Some("price must be a positive amount".into()),
        })?;

    let intent = state
        .payment_provider
        .create_intent(amount_minor, "usd")
        .await
        .map_err(|e| ApiError::upstream("upstream_payment_provider", e))?;

    Ok(Json(IntentResponse {
        client_secret: intent.client_secret,
    }))
}

#[derive(Debug, Deserialize)]
pub struct NewPayment {
    pub email: String,
    pub price: BigDecimal,
    #[serde(rename = "cartItems")]
    pub cart_item_ids: Vec<Uuid>,
    #[serde(rename = "menuItems")]
    pub menu_item_ids: Vec<Uuid>,
    #[serde(default, rename = "transactionId")]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub payment_id: Uuid,
    pub price: BigDecimal,
    pub removed_cart_items: u64,
    pub recorded_at: DateTime<Utc>,
}

/// POST /payments: turn a completed provider charge into durable state.
///
/// Strictly record-then-purge: the payment row is inserted first, then the
/// referenced cart rows are bulk-deleted. A crash between the two steps
/// leaves a payment of record with stale cart items, which reconciliation can
/// clean up; the inverse order would lose the purchase. The two writes are
/// not one transaction (the store guarantees atomicity per single write
/// only), so a failed purge after a successful insert is surfaced as a
/// distinct partial failure instead of being masked as success. Exactly one
/// response is sent either way.
pub async fn record_payment(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(payment): Json<NewPayment>,
) -> Result<Json<CheckoutReceipt>, ApiError> {
    let payment_id = Uuid::new_v4();

    let recorded_at: DateTime<Utc> = sqlx::query_scalar(
        "INSERT INTO payments
             (id, payer_email, price, cart_item_ids, menu_item_ids, transaction_id, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING created_at",
    )
    .bind(payment_id)
    .bind(&payment.email)
    .bind(normalize_scale(&payment.price))
    .bind(&payment.cart_item_ids)
    .bind(&payment.menu_item_ids)
    .bind(&payment.transaction_id)
    .bind(&payment.status)
    .fetch_one(&state.db)
    .await
    .map_err(|e| ApiError::upstream("upstream_database", e))?;

    let purged = sqlx::query("DELETE FROM cart_items WHERE id = ANY($1)")
        .bind(&payment.cart_item_ids)
        .execute(&state.db)
        .await;

    let removed_cart_items = match purged {
        Ok(result) => result.rows_affected(),
        Err(err) => {
            error!(%payment_id, error = %err, "payment recorded but cart purge failed");
            return Err(ApiError::PartialFailure {
                code: "checkout_partial_failure",
                message: format!(
                    "payment {payment_id} recorded, cart items not cleared; retry the purge only"
                ),
            });
        }
    };

    info!(
        %payment_id,
        payer = %payment.email,
        subject = %auth.email(),
        removed_cart_items,
        "recorded checkout"
    );

    Ok(Json(CheckoutReceipt {
        payment_id,
        price: normalize_scale(&payment.price),
        removed_cart_items,
        recorded_at,
    }))
}
