use crate::sync::DEFAULT_SYNC_URL;
use std::{env, path::PathBuf};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub username: Option<String>,
    pub sync_url: String,
    pub target: u64,
    pub weekly_goal: u64,
    pub monthly_goal: u64,
    pub missed_window_days: u32,
    pub allow_today_pending: bool,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            data_path: env::var("TRACKER_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/submissions.csv")),
            username: env::var("TRACKER_USERNAME")
                .ok()
                .filter(|value| !value.trim().is_empty()),
            sync_url: env::var("TRACKER_SYNC_URL").unwrap_or_else(|_| DEFAULT_SYNC_URL.to_string()),
            target: env_number("TRACKER_TARGET", 500),
            weekly_goal: env_number("TRACKER_WEEKLY_GOAL", 50),
            monthly_goal: env_number("TRACKER_MONTHLY_GOAL", 200),
            missed_window_days: env_number("TRACKER_MISSED_WINDOW", 10),
            allow_today_pending: env_flag("TRACKER_STREAK_GRACE"),
            port: env_number("PORT", 8080),
        }
    }
}

fn env_number<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|value| {
            let value = value.trim();
            value == "1" || value.eq_ignore_ascii_case("true")
        })
        .unwrap_or(false)
}
