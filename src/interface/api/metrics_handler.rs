//! Prometheus metrics handler

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder. Fails if a recorder is already installed.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(
        "kindly_users_registered_total",
        "Total number of users registered"
    );
    describe_counter!(
        "kindly_users_deleted_total",
        "Total number of users deleted"
    );
    describe_counter!(
        "kindly_user_errors_total",
        "User API requests answered with an error, by error kind"
    );

    Ok(handle)
}

/// HTTP metrics handler
pub async fn metrics_handler(State(prometheus_handle): State<PrometheusHandle>) -> Response {
    (StatusCode::OK, prometheus_handle.render()).into_response()
}

pub fn record_user_registered() {
    counter!("kindly_users_registered_total").increment(1);
}

pub fn record_user_deleted() {
    counter!("kindly_users_deleted_total").increment(1);
}

pub fn record_user_error(kind: &'static str) {
    counter!("kindly_user_errors_total", "kind" => kind).increment(1);
}
