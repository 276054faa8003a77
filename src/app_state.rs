use std::sync::Arc;

use crate::errors::AppError;

macro_rules! delegate_async_service {
    ($(fn $name:ident($($arg:ident : $typ:ty),*) -> $ret:ty => $path:path;)+) => {
        $(
            pub async fn $name(&self, $($arg: $typ),*) -> Result<$ret, AppError> {
                $path($($arg),*).await
            }
        )+
    };
}

#[derive(Clone)]
pub struct AppState {
    pub usage_service: Arc<UsageService>,
    pub alert_service: Arc<AlertService>,
}

pub fn build_app_state() -> AppState {
    AppState {
        usage_service: Arc::new(UsageService::default()),
        alert_service: Arc::new(AlertService::default()),
    }
}

#[derive(Clone, Default)]
pub struct UsageService;

impl UsageService {
    delegate_async_service! {
        fn get_avg_usage(q: crate::api::dto::usage_dto::UsageQuery) -> serde_json::Value => crate::domain::usage::service::get_avg_usage;
        fn get_metrics_usage(q: crate::api::dto::usage_dto::UsageQuery) -> serde_json::Value => crate::domain::usage::service::get_metrics_usage;
    }
}

#[derive(Clone, Default)]
pub struct AlertService;

impl AlertService {
    delegate_async_service! {
        fn record_alert(payload: serde_json::Value) -> serde_json::Value => crate::domain::alert::service::alert_log_service::record_alert;
    }
}
