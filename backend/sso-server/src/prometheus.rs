//! Prometheus exposition of the `metrics` counters

use crate::{ApiError, ApiResult, AppState};
use crate::error::{Result as ServerErrorResult, ServerError};

use std::panic::Location;

use axum::extract::State;
use error_location::ErrorLocation;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the process-wide recorder. Call once, before serving.
pub fn install_recorder() -> ServerErrorResult<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Metrics {
            message: format!("Failed to install Prometheus recorder: {e}"),
        })
}

/// GET /metrics
pub async fn render_metrics(State(state): State<AppState>) -> ApiResult<String> {
    match &state.prometheus {
        Some(handle) => Ok(handle.render()),
        None => Err(ApiError::NotFound {
            message: "Metrics recorder not installed".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}
