use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::{
    error::TrackerError,
    models::today,
    reports::{
        daily_summary, day_history, range_report, recent_activity, weekly_summary, ActivityItem,
        DailySummary, DateRange, DayHistory, RangeReport, WeeklySummary,
    },
    AppState,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub today: DailySummary,
    pub activity: Vec<ActivityItem>,
}

pub async fn get_dashboard(state: &AppState) -> Result<Dashboard, String> {
    let snapshot = state.store.snapshot().await.map_err(|e| e.to_string())?;
    let targets = state.settings.current().daily_targets();

    Ok(Dashboard {
        today: daily_summary(&snapshot.vitals, today(), targets),
        activity: recent_activity(&snapshot.vitals, &snapshot.symptoms, &snapshot.med_log),
    })
}

pub async fn get_weekly_summary(state: &AppState) -> Result<WeeklySummary, String> {
    let snapshot = state.store.snapshot().await.map_err(|e| e.to_string())?;
    Ok(weekly_summary(
        &snapshot.vitals,
        &snapshot.symptoms,
        &snapshot.medications,
        &snapshot.med_log,
        Utc::now(),
    ))
}

pub async fn get_today_history(state: &AppState) -> Result<DayHistory, String> {
    let snapshot = state.store.snapshot().await.map_err(|e| e.to_string())?;
    Ok(day_history(
        &snapshot.vitals,
        &snapshot.symptoms,
        &snapshot.med_log,
        today(),
    ))
}

/// Both ends are required; a missing one is reported like any missing field.
pub(crate) fn require_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<DateRange, TrackerError> {
    let start = start.ok_or(TrackerError::MissingInput { field: "start date" })?;
    let end = end.ok_or(TrackerError::MissingInput { field: "end date" })?;
    Ok(DateRange::new(start, end))
}

pub async fn generate_report(
    state: &AppState,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<RangeReport, String> {
    let range = require_range(start, end).map_err(|e| e.to_string())?;
    let snapshot = state.store.snapshot().await.map_err(|e| e.to_string())?;
    Ok(range_report(&snapshot, range, today()))
}
