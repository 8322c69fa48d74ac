use axum::{extract::State, Json};
use serde::Deserialize;

use crate::energy::quadrant::{assess_task, QuadrantAssessment};
use crate::errors::AppError;
use crate::flags::models::TaskCharacteristics;
use crate::profile::models::Profile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuadrantRequest {
    pub characteristics: TaskCharacteristics,
    /// Scores against this profile instead of the stored one.
    #[serde(default)]
    pub profile: Option<Profile>,
}

/// POST /api/v1/energy/quadrant
pub async fn handle_quadrant(
    State(state): State<AppState>,
    Json(req): Json<QuadrantRequest>,
) -> Result<Json<QuadrantAssessment>, AppError> {
    let profile = match req.profile {
        Some(profile) => profile,
        None => state.store.current_profile().await?.ok_or_else(|| {
            AppError::UnprocessableEntity(
                "No energy profile has been saved; include one in the request".to_string(),
            )
        })?,
    };

    Ok(Json(assess_task(&req.characteristics, &profile, &state.weights)))
}
