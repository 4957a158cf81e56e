pub mod app;
pub mod badge;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod sync;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use ledger::Ledger;
pub use state::AppState;
pub use storage::{load_ledger, save_ledger};
