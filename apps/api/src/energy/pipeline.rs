//! Save pipeline: classify, synthesize, merge.
//!
//! Runs on every company save so that stored quadrants and the stored
//! `energy_matrix_analysis` always reflect the profile they were saved with.

use serde_json::Value;
use tracing::info;

use crate::energy::quadrant::calculate_quadrant;
use crate::energy::synthesis::{generate_energy_synthesis, EnergyMatrixAnalysis, SYNTHESIS_KEY};
use crate::energy::weights::ScoringWeights;
use crate::errors::AppError;
use crate::flags::models::CompanyFlags;
use crate::profile::models::Profile;

/// Overwrites the quadrant of every characterised task. Returns how many were classified.
pub fn classify_tasks(
    company: &mut CompanyFlags,
    profile: &Profile,
    weights: &ScoringWeights,
) -> usize {
    let mut classified = 0;
    company.for_each_task_mut(|task| {
        if let Some(characteristics) = &task.characteristics {
            task.energy_matrix_quadrant = Some(calculate_quadrant(characteristics, profile, weights));
            classified += 1;
        }
    });
    classified
}

/// Replaces `synthesis.energy_matrix_analysis` wholesale.
pub fn merge_synthesis(
    company: &mut CompanyFlags,
    analysis: &EnergyMatrixAnalysis,
) -> Result<(), AppError> {
    let fragment: Value = serde_json::to_value(analysis)?;
    company.synthesis.insert(SYNTHESIS_KEY.to_string(), fragment);
    Ok(())
}

pub fn prepare_for_save(
    company: &mut CompanyFlags,
    profile: &Profile,
    weights: &ScoringWeights,
) -> Result<EnergyMatrixAnalysis, AppError> {
    let classified = classify_tasks(company, profile, weights);
    let analysis = generate_energy_synthesis(company, profile, weights);
    merge_synthesis(company, &analysis)?;

    info!(
        company = %company.company,
        classified,
        profile_version = %profile.version,
        rating = analysis.energy_sustainability.as_str(),
        "prepared company evaluation for save"
    );
    Ok(analysis)
}
