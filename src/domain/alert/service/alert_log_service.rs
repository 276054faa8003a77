use serde_json::{json, Value};
use tracing::info;

use crate::core::persistence::alerts::alert_log_api_repository_trait::AlertLogApiRepository;
use crate::core::persistence::alerts::alert_log_repository::AlertLogRepository;
use crate::errors::{internal_error, AppError};

pub async fn record_alert(payload: Value) -> Result<Value, AppError> {
    let repo = AlertLogRepository::new();
    record_alert_with_repo(&repo, payload).await
}

async fn record_alert_with_repo<R: AlertLogApiRepository>(
    repo: &R,
    payload: Value,
) -> Result<Value, AppError> {
    info!("Received alert: {payload}");

    repo.append(&payload).map_err(internal_error)?;

    Ok(json!({ "status": "success" }))
}
