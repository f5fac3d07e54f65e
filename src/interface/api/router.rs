//! API Router configuration

use super::metrics_handler::metrics_handler;
use super::user_handler::{
    delete_by_id, delete_by_username, edit_by_id, edit_by_username, filter_users, find_by_id,
    find_by_username, find_child_care, find_elder_care, find_pet_care, health_check,
    list_all_users, register_user, AppState,
};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the API router
///
/// Browsers may only call the API from `allowed_origin`. `/metrics` is
/// mounted only when a Prometheus handle is supplied.
pub fn build_router(
    state: AppState,
    allowed_origin: HeaderValue,
    prometheus_handle: Option<PrometheusHandle>,
) -> Router {
    // Health check route (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    // User management routes
    let user_routes = Router::new()
        .route("/api/users", get(list_all_users))
        .route("/api/users/register", post(register_user))
        .route("/api/users/filter", post(filter_users))
        .route("/api/users/filter/child-care", get(find_child_care))
        .route("/api/users/filter/elder-care", get(find_elder_care))
        .route("/api/users/filter/pet-care", get(find_pet_care))
        .route("/api/users/id/:id", get(find_by_id))
        .route("/api/users/id/:id/edit", put(edit_by_id))
        .route("/api/users/id/:id/delete", delete(delete_by_id))
        .route("/api/users/:username", get(find_by_username))
        .route("/api/users/:username/edit", put(edit_by_username))
        .route("/api/users/:username/delete", delete(delete_by_username));

    let mut router = Router::new()
        .merge(health_routes)
        .merge(user_routes)
        .with_state(state);

    // Metrics route (separate state)
    if let Some(handle) = prometheus_handle {
        let metrics_routes = Router::new()
            .route("/metrics", get(metrics_handler))
            .with_state(handle);
        router = router.merge(metrics_routes);
    }

    router
        .layer(
            CorsLayer::new()
                .allow_origin(allowed_origin)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
}
