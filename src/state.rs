use crate::config::AppConfig;
use crate::ledger::Ledger;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub ledger: Arc<Mutex<Ledger>>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig, ledger: Ledger) -> Self {
        Self {
            config: Arc::new(config),
            ledger: Arc::new(Mutex::new(ledger)),
            http: reqwest::Client::new(),
        }
    }
}
