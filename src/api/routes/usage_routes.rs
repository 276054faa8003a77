//! Usage routes (/avg_usage, /metrics_usage)

use axum::{routing::get, Router};

use crate::api::controller::usage::UsageController;
use crate::app_state::AppState;

pub fn usage_routes() -> Router<AppState> {
    Router::new()
        .route("/avg_usage", get(UsageController::get_avg_usage))
        .route("/metrics_usage", get(UsageController::get_metrics_usage))
}
