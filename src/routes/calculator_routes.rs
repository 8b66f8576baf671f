use axum::{routing::{get, post}, Router};
use crate::controllers::calculator_controller::{
    // Calculations
    estimate_production, estimate_production_form, estimate_required_capacity, estimate_dimensioning,
    // Form support
    get_calculator_defaults, get_orientation,
    // Service
    get_health,
};
use crate::shared_state::AppState;

/// Build the `/api/*` sub-router.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/production",            post(estimate_production))
        .route("/production/form",       post(estimate_production_form))
        .route("/capacity",              post(estimate_required_capacity))
        .route("/dimensioning",          post(estimate_dimensioning))
        .route("/calculator/defaults",   get(get_calculator_defaults))
        .route("/orientation/{heading}", get(get_orientation))
        .route("/health",                get(get_health))
        .with_state(state)
}
