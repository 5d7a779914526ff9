use service::datasets::DatasetService;

/// Shared handler state. Built once at startup; tests build a fresh one per case.
#[derive(Clone)]
pub struct AppState {
    pub datasets: DatasetService,
}

impl AppState {
    pub fn in_memory() -> Self {
        Self { datasets: DatasetService::in_memory() }
    }
}
