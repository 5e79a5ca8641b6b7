use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{
    cart_handlers, menu_handlers, payment_handlers, review_handlers, stats_handlers,
    user_handlers, AppState,
};

async fn root() -> &'static str {
    "ordering-service is running"
}

async fn health() -> &'static str {
    "ok"
}

pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                .collect::<Vec<_>>(),
        ))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([ACCEPT, CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route("/", get(root))
        .route("/healthz", get(health))
        .route("/jwt", post(user_handlers::issue_token))
        .route(
            "/users",
            get(user_handlers::list_users).post(user_handlers::create_user),
        )
        .route(
            "/users/admin/:key",
            get(user_handlers::admin_check).patch(user_handlers::promote_user),
        )
        .route(
            "/menu",
            get(menu_handlers::list_menu).post(menu_handlers::create_menu_item),
        )
        .route("/menu/:id", delete(menu_handlers::delete_menu_item))
        .route("/reviews", get(review_handlers::list_reviews))
        .route(
            "/carts",
            get(cart_handlers::list_cart_items).post(cart_handlers::add_cart_item),
        )
        .route("/carts/:id", delete(cart_handlers::remove_cart_item))
        .route(
            "/create-payment-intent",
            post(payment_handlers::create_payment_intent),
        )
        .route("/payments", post(payment_handlers::record_payment))
        .route("/admin-stats", get(stats_handlers::admin_stats))
        .route("/order-stats", get(stats_handlers::order_stats))
        .with_state(state)
        .layer(cors)
}
