use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub version: i32,
    pub profile_version: String,
    pub document: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyEvaluationRow {
    pub id: Uuid,
    pub company_slug: String,
    pub company_name: String,
    pub version: i32,
    pub document: Value,
    pub energy_sustainability: Option<String>,
    pub profile_version_used: Option<String>,
    pub s3_key: String,
    pub created_at: DateTime<Utc>,
}

/// One entry of a company's save history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EvaluationHistoryRow {
    pub version: i32,
    pub energy_sustainability: Option<String>,
    pub profile_version_used: Option<String>,
    pub s3_key: String,
    pub created_at: DateTime<Utc>,
}

/// Latest version of each evaluated company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CompanySummaryRow {
    pub company_slug: String,
    pub company_name: String,
    pub version: i32,
    pub energy_sustainability: Option<String>,
    pub created_at: DateTime<Utc>,
}
