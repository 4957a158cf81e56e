use crate::badge::{progress_percent, Tier};
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::ledger::{month_start, week_start, Ledger};
use crate::models::{
    MissedDaysResponse, MissedQuery, ProgressResponse, StatsQuery, StatsResponse, Source,
    SubmitForm, SubmitRequest, SyncRequest, SyncResponse,
};
use crate::state::AppState;
use crate::stats::{build_stats, HistoryRange};
use crate::storage::{save_ledger, to_csv};
use crate::sync::fetch_submission_history;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use chrono::{Duration, Local, NaiveDate};
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = Local::now().date_naive();
    let ledger = state.ledger.lock().await;
    Html(render_index(&progress_view(&state.config, &ledger, today)))
}

pub async fn get_progress(State(state): State<AppState>) -> Json<ProgressResponse> {
    let today = Local::now().date_naive();
    let ledger = state.ledger.lock().await;
    Json(progress_view(&state.config, &ledger, today))
}

pub async fn add_submission(
    State(state): State<AppState>,
    Json(payload): Json<SubmitRequest>,
) -> Result<Json<ProgressResponse>, AppError> {
    let response = apply_manual(&state, payload.count).await?;
    Ok(Json(response))
}

pub async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<SubmitForm>,
) -> Result<Redirect, AppError> {
    apply_manual(&state, form.count).await?;
    Ok(Redirect::to("/"))
}

pub async fn sync(
    State(state): State<AppState>,
    payload: Option<Json<SyncRequest>>,
) -> Result<Json<SyncResponse>, AppError> {
    let requested = payload
        .and_then(|Json(request)| request.username)
        .filter(|name| !name.trim().is_empty());
    let username = requested
        .or_else(|| state.config.username.clone())
        .ok_or_else(|| AppError::bad_request("no username configured for sync"))?;

    let snapshot = fetch_submission_history(&state.http, &state.config.sync_url, &username)
        .await
        .map_err(|err| {
            // a failed fetch skips sync for the session; the ledger is untouched
            warn!("sync with remote source failed: {err}");
            AppError::from(err)
        })?;

    let mut ledger = state.ledger.lock().await;
    let days_merged = snapshot.daily_counts.len();
    for (date, count) in &snapshot.daily_counts {
        ledger.upsert(*date, i64::from(*count), Source::Synced)?;
    }
    save_ledger(&state.config.data_path, &ledger).await?;
    info!("merged {days_merged} synced day(s) for {username}");

    Ok(Json(SyncResponse {
        username,
        days_merged,
        breakdown: snapshot.breakdown,
    }))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let range = match query.range.as_deref() {
        None => HistoryRange::All,
        Some(raw) => HistoryRange::parse(raw)
            .ok_or_else(|| AppError::bad_request("range must be 'all', '30d' or 'year'"))?,
    };
    let ledger = state.ledger.lock().await;
    Ok(Json(build_stats(&ledger, range, state.config.target)))
}

pub async fn get_missed(
    State(state): State<AppState>,
    Query(query): Query<MissedQuery>,
) -> Json<MissedDaysResponse> {
    let window_days = query.days.unwrap_or(state.config.missed_window_days);
    let today = Local::now().date_naive();
    let ledger = state.ledger.lock().await;
    let missed = ledger
        .missed_days(today, window_days)
        .into_iter()
        .map(|date| date.to_string())
        .collect();
    Json(MissedDaysResponse {
        window_days,
        missed,
    })
}

pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let ledger = state.ledger.lock().await;
    let payload = to_csv(&ledger)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"submissions.csv\"",
            ),
        ],
        payload,
    ))
}

async fn apply_manual(state: &AppState, count: i64) -> Result<ProgressResponse, AppError> {
    if count == 0 {
        return Err(AppError::bad_request("count must be greater than zero"));
    }

    let today = Local::now().date_naive();
    let mut ledger = state.ledger.lock().await;
    ledger.upsert(today, count, Source::Manual)?;
    // a failed write surfaces here while memory keeps the entry for the session
    save_ledger(&state.config.data_path, &ledger).await?;

    Ok(progress_view(&state.config, &ledger, today))
}

fn progress_view(config: &AppConfig, ledger: &Ledger, today: NaiveDate) -> ProgressResponse {
    let total = ledger.total_sum();
    let percent = progress_percent(total, config.target);
    let start_of_week = week_start(today);

    ProgressResponse {
        date: today.to_string(),
        today: ledger.get(today).unwrap_or_default().total(),
        total,
        streak: ledger.current_streak(today, config.allow_today_pending),
        percent,
        badge: Tier::for_percent(percent).label().to_string(),
        target: config.target,
        weekly: ledger.windowed_sum(start_of_week, start_of_week + Duration::days(6)),
        weekly_goal: config.weekly_goal,
        monthly: ledger.windowed_sum(month_start(today), today),
        monthly_goal: config.monthly_goal,
    }
}
