//! Evaluation store: versioned persistence for the profile and company records.
//!
//! `AppState` holds an `Arc<dyn EvaluationStore>`. Production uses
//! `PgEvaluationStore`; tests use the in-memory store.
//!
//! All writes are append-only: every save creates a new version.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::energy::synthesis::EnergyMatrixAnalysis;
use crate::errors::AppError;
use crate::flags::models::CompanyFlags;
use crate::models::evaluation::{CompanySummaryRow, EvaluationHistoryRow};
use crate::profile::models::Profile;

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileVersion {
    pub version: i32,
    pub profile_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationVersion {
    pub company_slug: String,
    pub version: i32,
    pub s3_key: String,
}

#[async_trait]
pub trait EvaluationStore: Send + Sync {
    async fn current_profile(&self) -> Result<Option<Profile>, AppError>;

    async fn commit_profile(&self, profile: &Profile) -> Result<ProfileVersion, AppError>;

    async fn current_company(&self, slug: &str) -> Result<Option<CompanyFlags>, AppError>;

    /// `analysis` must be the fragment already merged into `company.synthesis`;
    /// it is passed separately so the rating can be indexed.
    async fn commit_company(
        &self,
        slug: &str,
        company: &CompanyFlags,
        analysis: &EnergyMatrixAnalysis,
    ) -> Result<EvaluationVersion, AppError>;

    async fn company_history(&self, slug: &str) -> Result<Vec<EvaluationHistoryRow>, AppError>;

    async fn list_companies(&self) -> Result<Vec<CompanySummaryRow>, AppError>;
}

/// S3 key for the JSON snapshot of one evaluation version.
pub fn snapshot_key(slug: &str, version: i32) -> String {
    format!("evaluations/{slug}/v{version}.json")
}
