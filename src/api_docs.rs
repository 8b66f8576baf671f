use utoipa::OpenApi;
use crate::controllers::calculator_controller;
use crate::models::solar;
use crate::error;

#[derive(OpenApi)]
#[openapi(
    paths(
        calculator_controller::estimate_production,
        calculator_controller::estimate_production_form,
        calculator_controller::estimate_required_capacity,
        calculator_controller::estimate_dimensioning,
        calculator_controller::get_calculator_defaults,
        calculator_controller::get_orientation,
        calculator_controller::get_health
    ),
    components(
        schemas(
            solar::ProductionRequest,
            solar::ProductionFormRequest,
            solar::ProductionResponse,
            solar::CapacityRequest,
            solar::CapacityResponse,
            solar::DimensioningRequest,
            solar::DimensioningResponse,
            solar::InstallationSurface,
            solar::CalculatorDefaults,
            solar::OrientationResponse,
            solar::HealthStatus,
            error::ErrorResponse
        )
    ),
    tags(
        (name = "solar-estimator", description = "Solar production and sizing calculator API")
    )
)]
pub struct ApiDoc;
