pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::energy::handlers as energy;
use crate::flags::handlers as flags;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile API
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_put_profile),
        )
        .route(
            "/api/v1/profile/validate",
            post(profile::handle_validate_profile),
        )
        // Energy matrix
        .route("/api/v1/energy/quadrant", post(energy::handle_quadrant))
        // Company evaluations
        .route("/api/v1/companies", get(flags::handle_list_companies))
        .route(
            "/api/v1/companies/:slug/flags",
            get(flags::handle_get_flags).put(flags::handle_put_flags),
        )
        .route(
            "/api/v1/companies/:slug/flags/merge",
            post(flags::handle_merge_flags),
        )
        .route(
            "/api/v1/companies/:slug/energy",
            get(flags::handle_company_energy),
        )
        .route(
            "/api/v1/companies/:slug/history",
            get(flags::handle_company_history),
        )
        .with_state(state)
}
