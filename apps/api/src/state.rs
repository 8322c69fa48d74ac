use std::sync::Arc;

use crate::energy::weights::ScoringWeights;
use crate::store::EvaluationStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Versioned profile and evaluation storage. Postgres + S3 in production.
    pub store: Arc<dyn EvaluationStore>,
    /// Quadrant weights with thresholds taken from config.
    pub weights: ScoringWeights,
}
