use super::{handlers, ApiState};
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        // Market history routes
        .route("/price-history/:token_address", get(handlers::get_price_history))
        .route("/volume-history/:token_address", get(handlers::get_volume_history))
        .route("/liquidity-history/:token_address", get(handlers::get_liquidity_history))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
