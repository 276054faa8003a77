//! Alert controller: connects routes to the alert sink

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::app_state::AppState;
use crate::errors::AppError;

pub struct AlertController;

impl AlertController {
    pub async fn receive_alert(
        State(state): State<AppState>,
        Json(payload): Json<Value>,
    ) -> Result<Json<Value>, AppError> {
        Ok(Json(state.alert_service.record_alert(payload).await?))
    }
}
