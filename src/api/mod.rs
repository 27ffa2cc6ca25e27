// API module - HTTP endpoints

pub mod cashcards;
pub mod health;
pub mod middleware;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use middleware::state::AppState;

/// Builds the complete application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(cashcards::router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
