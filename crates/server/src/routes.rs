//! Route configuration.

use crate::handlers;
use crate::metrics::metrics_handler;
use crate::state::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Health check (intentionally unauthenticated for probes)
        .route("/v1/health", get(handlers::health_check))
        // File lifecycle
        .route(
            "/v1/files",
            post(handlers::upload_file).get(handlers::list_files),
        )
        .route(
            "/v1/files/{hash}/soft-delete",
            post(handlers::soft_delete_file),
        )
        .route("/v1/files/{hash}/recover", post(handlers::recover_file))
        .route("/v1/files/{hash}", delete(handlers::purge_file))
        // Derived state
        .route("/v1/quota", get(handlers::get_quota))
        .route("/v1/diagnostics/orphans", get(handlers::list_orphans));

    let mut router = Router::new().merge(api_routes);

    // Conditionally add the metrics endpoint. When enabled it MUST be
    // network-restricted to authorized scraper IPs.
    if state.config.server.metrics_enabled {
        router = router.route("/metrics", get(metrics_handler));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
