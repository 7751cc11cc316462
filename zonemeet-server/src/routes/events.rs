//! Event and change-history endpoints

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use serde::Deserialize;

use zonemeet_core::EventRecord;
use zonemeet_core::service::{EventPatch, NewEvent, ProfileAgenda, RenderedLogEntry};

use crate::routes::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events", post(create_event))
        .route("/api/events/{event_id}", put(update_event))
        .route("/api/events/profile/{profile_id}", get(list_events_for_profile))
        .route("/api/events/{event_id}/logs", get(event_logs))
}

/// Optional viewing timezone, e.g. `?tz=Asia/Kolkata`
#[derive(Deserialize)]
pub struct TzQuery {
    pub tz: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub changed_by: Option<String>,
    #[serde(flatten)]
    pub patch: EventPatch,
}

/// POST /api/events - Create an event from local wall-clock bounds
async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<NewEvent>,
) -> Result<(StatusCode, Json<EventRecord>), ApiError> {
    let event = state.scheduler().create_event(req)?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/events/:event_id - Merge partial fields and record the change
async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<EventRecord>, ApiError> {
    let event = state
        .scheduler()
        .update_event(&event_id, req.changed_by, req.patch)?;

    Ok(Json(event))
}

/// GET /api/events/profile/:profile_id - Events localized to the viewer
async fn list_events_for_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
    Query(query): Query<TzQuery>,
) -> Result<Json<ProfileAgenda>, ApiError> {
    let agenda = state
        .scheduler()
        .list_events_for_profile(&profile_id, query.tz.as_deref())?;

    Ok(Json(agenda))
}

/// GET /api/events/:event_id/logs - Change history, times rendered in `tz`
async fn event_logs(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Query(query): Query<TzQuery>,
) -> Result<Json<Vec<RenderedLogEntry>>, ApiError> {
    let logs = state.scheduler().event_logs(&event_id, query.tz.as_deref())?;
    Ok(Json(logs))
}
