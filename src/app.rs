use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/record", get(handlers::record_form).post(handlers::record_submit))
        .route("/history", get(handlers::history))
        .route("/api/calendar-data", get(handlers::calendar_data))
        .route("/delete/:date", get(handlers::delete_entry))
        .with_state(state)
}
