use super::alert_log_api_repository_trait::AlertLogApiRepository;
use super::alert_log_fs_adapter::AlertLogFsAdapter;
use super::alert_log_fs_adapter_trait::AlertLogFsAdapterTrait;

pub struct AlertLogRepository {
    adapter: AlertLogFsAdapter,
}

impl AlertLogRepository {
    pub fn new() -> Self {
        Self {
            adapter: AlertLogFsAdapter::new(),
        }
    }
}

impl AlertLogApiRepository for AlertLogRepository {
    fn fs_adapter(&self) -> &dyn AlertLogFsAdapterTrait {
        &self.adapter
    }
}
