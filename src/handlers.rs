use crate::errors::AppError;
use crate::models::{CalendarCell, CalendarData, RecordForm};
use crate::state::AppState;
use crate::stats::{build_dashboard_at, build_history_at, date_key, today};
use crate::ui::{render_dashboard, render_history, render_record};
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::NaiveDate;
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let today = today();
    let dashboard = state
        .store
        .blocking(move |store| build_dashboard_at(store, today))
        .await?;
    Ok(Html(render_dashboard(&state.catalog, &dashboard)))
}

pub async fn record_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let date = date_key(today());
    let lookup = date.clone();
    let existing = state
        .store
        .blocking(move |store| store.get_entry(&lookup))
        .await?;
    Ok(Html(render_record(&state.catalog, &date, existing.as_ref())))
}

/// Invalid submissions go back to the form without a message and without
/// touching storage.
pub async fn record_submit(
    State(state): State<AppState>,
    Form(form): Form<RecordForm>,
) -> Result<Redirect, AppError> {
    let Some(info) = state.catalog.lookup(&form.emotion_type) else {
        warn!(emotion_type = %form.emotion_type, "rejected unknown emotion type");
        return Ok(Redirect::to("/record"));
    };
    let emotion = info.emotion;

    let date = form.date.trim().to_string();
    if NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
        warn!(%date, "rejected malformed date");
        return Ok(Redirect::to("/record"));
    }

    let note = form
        .note
        .filter(|note| !note.trim().is_empty());

    let saved_date = date.clone();
    state
        .store
        .blocking(move |store| store.upsert_entry(&saved_date, emotion, note.as_deref()))
        .await?;
    info!(%date, %emotion, "entry saved");

    Ok(Redirect::to("/"))
}

pub async fn history(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let today = today();
    let history = state
        .store
        .blocking(move |store| build_history_at(store, today))
        .await?;
    Ok(Html(render_history(&state.catalog, &history)))
}

pub async fn calendar_data(State(state): State<AppState>) -> Result<Json<CalendarData>, AppError> {
    let rows = state.store.blocking(|store| store.list_calendar()).await?;

    let data = rows
        .into_iter()
        .map(|(date, emotion)| {
            let cell = CalendarCell {
                emotion,
                color: state.catalog.info(emotion).color.to_string(),
            };
            (date, cell)
        })
        .collect();

    Ok(Json(data))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Redirect, AppError> {
    let target = date.clone();
    let removed = state
        .store
        .blocking(move |store| store.delete_entry(&target))
        .await?;
    if removed {
        info!(%date, "entry deleted");
    }

    Ok(Redirect::to("/history"))
}
