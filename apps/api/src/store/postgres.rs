use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::energy::synthesis::EnergyMatrixAnalysis;
use crate::errors::AppError;
use crate::flags::models::CompanyFlags;
use crate::models::evaluation::{
    CompanyEvaluationRow, CompanySummaryRow, EvaluationHistoryRow, ProfileRow,
};
use crate::profile::models::Profile;
use crate::store::{snapshot_key, EvaluationStore, EvaluationVersion, ProfileVersion};

/// Postgres-backed store. Documents are JSONB; each evaluation version is
/// also snapshotted to S3 as pretty-printed JSON.
pub struct PgEvaluationStore {
    pool: PgPool,
    s3: aws_sdk_s3::Client,
    s3_bucket: String,
}

impl PgEvaluationStore {
    pub fn new(pool: PgPool, s3: aws_sdk_s3::Client, s3_bucket: String) -> Self {
        Self {
            pool,
            s3,
            s3_bucket,
        }
    }

    async fn upload_snapshot(&self, key: &str, company: &CompanyFlags) -> Result<(), AppError> {
        let body = serde_json::to_vec_pretty(company)?;
        self.s3
            .put_object()
            .bucket(&self.s3_bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type("application/json")
            .send()
            .await
            .map_err(|e| AppError::S3(format!("snapshot upload failed: {e}")))?;

        info!("Uploaded evaluation snapshot to s3://{}/{}", self.s3_bucket, key);
        Ok(())
    }
}

/// Concurrent saves of the same record race for the next version number; the
/// loser hits the unique constraint and is reported as a conflict.
fn map_insert_error(e: sqlx::Error, what: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(format!(
            "{what} was saved concurrently; reload and retry"
        )),
        _ => AppError::Database(e),
    }
}

#[async_trait]
impl EvaluationStore for PgEvaluationStore {
    async fn current_profile(&self) -> Result<Option<Profile>, AppError> {
        let row: Option<ProfileRow> =
            sqlx::query_as("SELECT * FROM energy_profiles ORDER BY version DESC LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(row) => Ok(Some(serde_json::from_value(row.document)?)),
            None => Ok(None),
        }
    }

    async fn commit_profile(&self, profile: &Profile) -> Result<ProfileVersion, AppError> {
        let current_max: Option<i32> =
            sqlx::query_scalar("SELECT MAX(version) FROM energy_profiles")
                .fetch_one(&self.pool)
                .await?;
        let new_version = current_max.unwrap_or(0) + 1;
        let document = serde_json::to_value(profile)?;

        sqlx::query(
            r#"
            INSERT INTO energy_profiles (id, version, profile_version, document)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_version)
        .bind(&profile.version)
        .bind(&document)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "The profile"))?;

        info!(
            "Committed energy profile {} as version {new_version}",
            profile.version
        );

        Ok(ProfileVersion {
            version: new_version,
            profile_version: profile.version.clone(),
        })
    }

    async fn current_company(&self, slug: &str) -> Result<Option<CompanyFlags>, AppError> {
        let row: Option<CompanyEvaluationRow> = sqlx::query_as(
            r#"
            SELECT * FROM company_evaluations
            WHERE company_slug = $1
            ORDER BY version DESC
            LIMIT 1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(serde_json::from_value(row.document)?)),
            None => Ok(None),
        }
    }

    async fn commit_company(
        &self,
        slug: &str,
        company: &CompanyFlags,
        analysis: &EnergyMatrixAnalysis,
    ) -> Result<EvaluationVersion, AppError> {
        // 1. Determine next version
        let current_max: Option<i32> = sqlx::query_scalar(
            "SELECT MAX(version) FROM company_evaluations WHERE company_slug = $1",
        )
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;
        let new_version = current_max.unwrap_or(0) + 1;

        // 2. Append-only INSERT; a losing concurrent save stops here
        let s3_key = snapshot_key(slug, new_version);
        let document = serde_json::to_value(company)?;
        sqlx::query(
            r#"
            INSERT INTO company_evaluations
                (id, company_slug, company_name, version, document,
                 energy_sustainability, profile_version_used, s3_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(slug)
        .bind(&company.company)
        .bind(new_version)
        .bind(&document)
        .bind(analysis.energy_sustainability.as_str())
        .bind(&analysis.profile_version_used)
        .bind(&s3_key)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &format!("Company '{slug}'")))?;

        // 3. Snapshot only the version that won the insert
        self.upload_snapshot(&s3_key, company).await?;

        info!("Committed evaluation {slug} version {new_version}");

        Ok(EvaluationVersion {
            company_slug: slug.to_string(),
            version: new_version,
            s3_key,
        })
    }

    async fn company_history(&self, slug: &str) -> Result<Vec<EvaluationHistoryRow>, AppError> {
        Ok(sqlx::query_as::<_, EvaluationHistoryRow>(
            r#"
            SELECT version, energy_sustainability, profile_version_used, s3_key, created_at
            FROM company_evaluations
            WHERE company_slug = $1
            ORDER BY version ASC
            "#,
        )
        .bind(slug)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_companies(&self) -> Result<Vec<CompanySummaryRow>, AppError> {
        Ok(sqlx::query_as::<_, CompanySummaryRow>(
            r#"
            SELECT DISTINCT ON (company_slug)
                company_slug, company_name, version, energy_sustainability, created_at
            FROM company_evaluations
            ORDER BY company_slug, version DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }
}
