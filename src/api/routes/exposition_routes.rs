//! Gauge exposition route (/metrics, served on its own port)

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Router;

use crate::core::metrics::gauge_registry::GaugeRegistry;
use crate::errors::{internal_error, AppError};

pub fn exposition_router(gauges: Arc<GaugeRegistry>) -> Router {
    Router::new()
        .route("/metrics", get(render_metrics))
        .with_state(gauges)
}

async fn render_metrics(State(gauges): State<Arc<GaugeRegistry>>) -> Result<String, AppError> {
    gauges.render().map_err(internal_error)
}
