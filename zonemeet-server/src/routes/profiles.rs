//! Profile endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;

use zonemeet_core::Profile;

use crate::routes::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/profiles", get(list_profiles).post(create_profile))
        .route("/api/profiles/{id}", put(update_profile))
}

#[derive(Deserialize)]
pub struct CreateProfileRequest {
    pub name: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub timezone: Option<String>,
}

/// POST /api/profiles - Create a profile
async fn create_profile(
    State(state): State<AppState>,
    Json(req): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let profile = state
        .scheduler()
        .create_profile(req.name.as_deref().unwrap_or(""), req.timezone.as_deref())?;

    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/profiles - List profiles sorted by name
async fn list_profiles(State(state): State<AppState>) -> Result<Json<Vec<Profile>>, ApiError> {
    Ok(Json(state.scheduler().list_profiles()?))
}

/// PUT /api/profiles/:id - Update name and/or timezone
async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let profile =
        state
            .scheduler()
            .update_profile(&id, req.name.as_deref(), req.timezone.as_deref())?;

    Ok(Json(profile))
}
