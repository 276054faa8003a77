//! Usage controller: connects routes to usage queries

use axum::extract::{Query, State};
use axum::Json;
use serde_json::Value;

use crate::api::dto::usage_dto::UsageQuery;
use crate::app_state::AppState;
use crate::errors::AppError;

pub struct UsageController;

impl UsageController {
    pub async fn get_avg_usage(
        State(state): State<AppState>,
        Query(q): Query<UsageQuery>,
    ) -> Result<Json<Value>, AppError> {
        Ok(Json(state.usage_service.get_avg_usage(q).await?))
    }

    pub async fn get_metrics_usage(
        State(state): State<AppState>,
        Query(q): Query<UsageQuery>,
    ) -> Result<Json<Value>, AppError> {
        Ok(Json(state.usage_service.get_metrics_usage(q).await?))
    }
}
