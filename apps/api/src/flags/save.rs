//! Company evaluation save flow: load the profile, run the energy pipeline,
//! commit a new version.

use serde::Serialize;
use tracing::info;

use crate::energy::pipeline::{classify_tasks, prepare_for_save};
use crate::energy::synthesis::{generate_energy_synthesis, EnergyMatrixAnalysis};
use crate::energy::weights::ScoringWeights;
use crate::errors::AppError;
use crate::flags::merge::{merge_flags, MergeOutcome};
use crate::flags::models::CompanyFlags;
use crate::flags::slug::{company_slug, require_slug};
use crate::profile::models::Profile;
use crate::store::{EvaluationStore, EvaluationVersion};

#[derive(Debug, Serialize)]
pub struct SavedEvaluation {
    pub saved: EvaluationVersion,
    pub company: CompanyFlags,
    pub energy_matrix_analysis: EnergyMatrixAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<MergeOutcome>,
}

async fn require_profile(store: &dyn EvaluationStore) -> Result<Profile, AppError> {
    store.current_profile().await?.ok_or_else(|| {
        AppError::UnprocessableEntity(
            "No energy profile has been saved yet; save a profile before evaluating companies"
                .to_string(),
        )
    })
}

fn check_company_matches_slug(slug: &str, company: &CompanyFlags) -> Result<(), AppError> {
    let derived = company_slug(&company.company);
    if derived != slug {
        return Err(AppError::Validation(format!(
            "Company '{}' belongs under '{derived}', not '{slug}'",
            company.company
        )));
    }
    Ok(())
}

/// Replaces the stored record for `slug` with `company`, re-deriving every
/// quadrant and the energy synthesis first.
pub async fn save_company_flags(
    store: &dyn EvaluationStore,
    weights: &ScoringWeights,
    slug: &str,
    mut company: CompanyFlags,
) -> Result<SavedEvaluation, AppError> {
    let slug = require_slug(slug)?;
    check_company_matches_slug(&slug, &company)?;
    let profile = require_profile(store).await?;

    let analysis = prepare_for_save(&mut company, &profile, weights)?;
    let saved = store.commit_company(&slug, &company, &analysis).await?;

    Ok(SavedEvaluation {
        saved,
        company,
        energy_matrix_analysis: analysis,
        merge: None,
    })
}

/// Folds newly extracted flags into the stored record (creating it if absent)
/// and saves the result.
pub async fn merge_company_flags(
    store: &dyn EvaluationStore,
    weights: &ScoringWeights,
    slug: &str,
    incoming: CompanyFlags,
) -> Result<SavedEvaluation, AppError> {
    let slug = require_slug(slug)?;
    check_company_matches_slug(&slug, &incoming)?;
    let profile = require_profile(store).await?;

    let mut company = match store.current_company(&slug).await? {
        Some(existing) => existing,
        None => CompanyFlags::new(incoming.company.clone()),
    };
    let outcome = merge_flags(&mut company, incoming);
    info!(
        "Merged flags into {slug}: {} added, {} duplicates skipped",
        outcome.flags_added, outcome.duplicates_skipped
    );

    let analysis = prepare_for_save(&mut company, &profile, weights)?;
    let saved = store.commit_company(&slug, &company, &analysis).await?;

    Ok(SavedEvaluation {
        saved,
        company,
        energy_matrix_analysis: analysis,
        merge: Some(outcome),
    })
}

/// Synthesis of the stored record against the current profile. Not persisted.
pub async fn preview_company_energy(
    store: &dyn EvaluationStore,
    weights: &ScoringWeights,
    slug: &str,
) -> Result<EnergyMatrixAnalysis, AppError> {
    let slug = require_slug(slug)?;
    let mut company = store
        .current_company(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company '{slug}' has no evaluation")))?;
    let profile = require_profile(store).await?;

    classify_tasks(&mut company, &profile, weights);
    Ok(generate_energy_synthesis(&company, &profile, weights))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::quadrant::tests::{calm_task, scenario_profile};
    use crate::energy::synthesis::{Sustainability, SYNTHESIS_KEY};
    use crate::flags::models::{
        Flag, FlagSeverity, MountainElement, Quadrant, TaskCharacteristics, TaskImplication,
    };
    use crate::flags::time_estimate::TimeEstimate;
    use crate::store::memory::InMemoryEvaluationStore;

    fn acme_with(text: &str, pct: &str, uses_systems_thinking: bool) -> CompanyFlags {
        let mut company = CompanyFlags::new("Acme");
        company
            .bucket_mut(MountainElement::DailyClimb, FlagSeverity::StrongPositive)
            .push(Flag {
                text: text.to_string(),
                impact: String::new(),
                confidence: "high".to_string(),
                task_implications: vec![TaskImplication {
                    task: format!("{text} work"),
                    time_estimate_pct: TimeEstimate::parse(pct),
                    characteristics: Some(TaskCharacteristics {
                        uses_systems_thinking,
                        ..calm_task()
                    }),
                    energy_matrix_quadrant: None,
                }],
            });
        company
    }

    async fn store_with_profile() -> InMemoryEvaluationStore {
        let store = InMemoryEvaluationStore::default();
        store.commit_profile(&scenario_profile()).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_save_requires_profile() {
        let store = InMemoryEvaluationStore::default();
        let result = save_company_flags(
            &store,
            &ScoringWeights::default(),
            "acme",
            acme_with("Systems design", "70%", true),
        )
        .await;
        assert!(matches!(result, Err(AppError::UnprocessableEntity(_))));
    }

    #[tokio::test]
    async fn test_save_rejects_mismatched_slug() {
        let store = store_with_profile().await;
        let result = save_company_flags(
            &store,
            &ScoringWeights::default(),
            "globex",
            acme_with("Systems design", "70%", true),
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_save_classifies_synthesizes_and_versions() {
        let store = store_with_profile().await;
        let w = ScoringWeights::default();

        let first = save_company_flags(&store, &w, "acme", acme_with("Systems design", "70%", true))
            .await
            .unwrap();
        assert_eq!(first.saved.version, 1);
        assert_eq!(first.energy_matrix_analysis.energy_sustainability, Sustainability::High);
        assert_eq!(
            first.company.task_implications().next().unwrap().energy_matrix_quadrant,
            Some(Quadrant::Mutual)
        );

        let second = save_company_flags(&store, &w, "acme", acme_with("Glue work", "70%", false))
            .await
            .unwrap();
        assert_eq!(second.saved.version, 2);

        let stored = store.current_company("acme").await.unwrap().unwrap();
        assert!(stored.synthesis.contains_key(SYNTHESIS_KEY));
        assert_eq!(store.company_history("acme").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_merge_creates_then_extends_record() {
        let store = store_with_profile().await;
        let w = ScoringWeights::default();

        let created = merge_company_flags(&store, &w, "acme", acme_with("Systems design", "30%", true))
            .await
            .unwrap();
        assert_eq!(created.merge.as_ref().unwrap().flags_added, 1);

        let mut incoming = acme_with("systems  DESIGN", "30%", true);
        incoming
            .bucket_mut(MountainElement::ChosenPeak, FlagSeverity::CriticalMatch)
            .extend(
                acme_with("Platform rebuild", "35%", true)
                    .green_flags
                    .daily_climb
                    .strong_positives,
            );
        let merged = merge_company_flags(&store, &w, "acme", incoming).await.unwrap();

        let outcome = merged.merge.unwrap();
        assert_eq!(outcome.flags_added, 1);
        assert_eq!(outcome.duplicates_skipped, 1);
        assert_eq!(
            merged
                .energy_matrix_analysis
                .predicted_daily_distribution
                .mutual_green_flags
                .percentage,
            65
        );
        assert_eq!(merged.saved.version, 2);
    }

    #[tokio::test]
    async fn test_preview_uses_current_profile_without_saving() {
        let store = store_with_profile().await;
        let w = ScoringWeights::default();
        save_company_flags(&store, &w, "acme", acme_with("Systems design", "70%", true))
            .await
            .unwrap();

        // new profile loses the strength that made the task good-at
        let mut weaker = scenario_profile();
        weaker.version = "test-2".to_string();
        weaker.core_strengths.clear();
        store.commit_profile(&weaker).await.unwrap();

        let preview = preview_company_energy(&store, &w, "acme").await.unwrap();
        assert_eq!(preview.profile_version_used, "test-2");
        assert_eq!(
            preview
                .predicted_daily_distribution
                .help_mentoring_yellow_flags
                .percentage,
            70
        );
        assert_eq!(store.company_history("acme").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_preview_unknown_company_is_not_found() {
        let store = store_with_profile().await;
        let result = preview_company_energy(&store, &ScoringWeights::default(), "nobody").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
