use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayRecord {
    pub count: u64,
    pub manual_count: u64,
}

impl DayRecord {
    pub fn total(&self) -> u64 {
        self.count.saturating_add(self.manual_count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Manual,
    Synced,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub date: String,
    pub today: u64,
    pub total: u64,
    pub streak: u32,
    pub percent: f64,
    pub badge: String,
    pub target: u64,
    pub weekly: u64,
    pub weekly_goal: u64,
    pub monthly: u64,
    pub monthly_goal: u64,
}

#[derive(Debug, Serialize)]
pub struct HistoryPoint {
    pub date: String,
    pub count: u64,
    pub manual_count: u64,
    pub total: u64,
    pub rolling_avg: Option<f64>,
    pub cumulative: u64,
}

#[derive(Debug, Serialize)]
pub struct MonthPoint {
    pub date: String,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub range: String,
    pub history: Vec<HistoryPoint>,
    pub month: Vec<MonthPoint>,
    pub milestones: Vec<u64>,
}

#[derive(Debug, Serialize)]
pub struct MissedDaysResponse {
    pub window_days: u32,
    pub missed: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SyncRequest {
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyProgress {
    pub difficulty: String,
    pub solved: u32,
    pub total: u32,
}

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub username: String,
    pub days_merged: usize,
    pub breakdown: Vec<DifficultyProgress>,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub range: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MissedQuery {
    pub days: Option<u32>,
}
