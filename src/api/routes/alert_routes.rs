//! Alert routes (/alert)

use axum::{routing::post, Router};

use crate::api::controller::alert::AlertController;
use crate::app_state::AppState;

pub fn alert_routes() -> Router<AppState> {
    Router::new().route("/alert", post(AlertController::receive_alert))
}
