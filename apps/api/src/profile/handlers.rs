use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::profile::models::Profile;
use crate::profile::validation::{validate_profile, ProfileValidationResult};
use crate::state::AppState;
use crate::store::ProfileVersion;

#[derive(Debug, Serialize)]
pub struct SaveProfileResponse {
    pub saved: ProfileVersion,
    pub validation: ProfileValidationResult,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Result<Json<Profile>, AppError> {
    state
        .store
        .current_profile()
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No energy profile has been saved".to_string()))
}

/// POST /api/v1/profile/validate
pub async fn handle_validate_profile(
    Json(profile): Json<Profile>,
) -> Json<ProfileValidationResult> {
    Json(validate_profile(&profile))
}

/// PUT /api/v1/profile
/// Blocking issues reject the save; advisory ones are returned alongside it.
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Result<Json<SaveProfileResponse>, AppError> {
    let validation = validate_profile(&profile);
    if !validation.passed {
        return Err(AppError::UnprocessableEntity(serde_json::to_string(
            &validation,
        )?));
    }

    let saved = state.store.commit_profile(&profile).await?;
    Ok(Json(SaveProfileResponse { saved, validation }))
}
