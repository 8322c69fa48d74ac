use axum::{
    extract::{Path, State},
    Json,
};

use crate::energy::synthesis::EnergyMatrixAnalysis;
use crate::errors::AppError;
use crate::flags::models::CompanyFlags;
use crate::flags::save::{
    merge_company_flags, preview_company_energy, save_company_flags, SavedEvaluation,
};
use crate::flags::slug::require_slug;
use crate::models::evaluation::{CompanySummaryRow, EvaluationHistoryRow};
use crate::state::AppState;

/// GET /api/v1/companies
pub async fn handle_list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanySummaryRow>>, AppError> {
    Ok(Json(state.store.list_companies().await?))
}

/// GET /api/v1/companies/:slug/flags
pub async fn handle_get_flags(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CompanyFlags>, AppError> {
    let slug = require_slug(&slug)?;
    state
        .store
        .current_company(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Company '{slug}' has no evaluation")))
}

/// PUT /api/v1/companies/:slug/flags
pub async fn handle_put_flags(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(company): Json<CompanyFlags>,
) -> Result<Json<SavedEvaluation>, AppError> {
    let saved = save_company_flags(state.store.as_ref(), &state.weights, &slug, company).await?;
    Ok(Json(saved))
}

/// POST /api/v1/companies/:slug/flags/merge
pub async fn handle_merge_flags(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(incoming): Json<CompanyFlags>,
) -> Result<Json<SavedEvaluation>, AppError> {
    let saved = merge_company_flags(state.store.as_ref(), &state.weights, &slug, incoming).await?;
    Ok(Json(saved))
}

/// GET /api/v1/companies/:slug/energy
pub async fn handle_company_energy(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<EnergyMatrixAnalysis>, AppError> {
    let analysis = preview_company_energy(state.store.as_ref(), &state.weights, &slug).await?;
    Ok(Json(analysis))
}

/// GET /api/v1/companies/:slug/history
pub async fn handle_company_history(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<EvaluationHistoryRow>>, AppError> {
    let slug = require_slug(&slug)?;
    let history = state.store.company_history(&slug).await?;
    if history.is_empty() {
        return Err(AppError::NotFound(format!(
            "Company '{slug}' has no evaluation"
        )));
    }
    Ok(Json(history))
}
