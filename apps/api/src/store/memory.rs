use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::energy::synthesis::EnergyMatrixAnalysis;
use crate::errors::AppError;
use crate::flags::models::CompanyFlags;
use crate::models::evaluation::{CompanySummaryRow, EvaluationHistoryRow};
use crate::profile::models::Profile;
use crate::store::{snapshot_key, EvaluationStore, EvaluationVersion, ProfileVersion};

#[derive(Default)]
struct Inner {
    profiles: Vec<Profile>,
    companies: BTreeMap<String, Vec<(CompanyFlags, EvaluationHistoryRow)>>,
}

/// Append-only in-memory store with the same versioning rules as Postgres.
#[derive(Default)]
pub struct InMemoryEvaluationStore {
    inner: Mutex<Inner>,
}

#[async_trait]
impl EvaluationStore for InMemoryEvaluationStore {
    async fn current_profile(&self) -> Result<Option<Profile>, AppError> {
        Ok(self.inner.lock().unwrap().profiles.last().cloned())
    }

    async fn commit_profile(&self, profile: &Profile) -> Result<ProfileVersion, AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.profiles.push(profile.clone());
        Ok(ProfileVersion {
            version: inner.profiles.len() as i32,
            profile_version: profile.version.clone(),
        })
    }

    async fn current_company(&self, slug: &str) -> Result<Option<CompanyFlags>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .companies
            .get(slug)
            .and_then(|versions| versions.last())
            .map(|(company, _)| company.clone()))
    }

    async fn commit_company(
        &self,
        slug: &str,
        company: &CompanyFlags,
        analysis: &EnergyMatrixAnalysis,
    ) -> Result<EvaluationVersion, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let versions = inner.companies.entry(slug.to_string()).or_default();
        let version = versions.len() as i32 + 1;
        let s3_key = snapshot_key(slug, version);
        versions.push((
            company.clone(),
            EvaluationHistoryRow {
                version,
                energy_sustainability: Some(analysis.energy_sustainability.as_str().to_string()),
                profile_version_used: Some(analysis.profile_version_used.clone()),
                s3_key: s3_key.clone(),
                created_at: Utc::now(),
            },
        ));
        Ok(EvaluationVersion {
            company_slug: slug.to_string(),
            version,
            s3_key,
        })
    }

    async fn company_history(&self, slug: &str) -> Result<Vec<EvaluationHistoryRow>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .companies
            .get(slug)
            .map(|versions| versions.iter().map(|(_, row)| row.clone()).collect())
            .unwrap_or_default())
    }

    async fn list_companies(&self) -> Result<Vec<CompanySummaryRow>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .companies
            .iter()
            .filter_map(|(slug, versions)| {
                versions.last().map(|(company, row)| CompanySummaryRow {
                    company_slug: slug.clone(),
                    company_name: company.company.clone(),
                    version: row.version,
                    energy_sustainability: row.energy_sustainability.clone(),
                    created_at: row.created_at,
                })
            })
            .collect())
    }
}
