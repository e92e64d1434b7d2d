pub mod analyze;
pub mod health;

pub use analyze::*;
pub use health::*;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::logging_middleware;
use crate::state::AppState;

/// Builds the application router. Shared by `main` and the integration tests.
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_file_size_mb * 1024 * 1024;

    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route(
            "/analyze",
            get(analyze_info_handler)
                .post(analyze_handler)
                .options(analyze_preflight_handler),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(axum::middleware::from_fn(logging_middleware)),
        )
        .with_state(state)
}
