use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tracing::{debug, info};

use crate::error::{ApiError, EngineError, ErrorResponse};
use crate::models::solar::{
    CalculatorDefaults, CapacityInput, CapacityRequest, CapacityResponse, DimensioningRequest,
    DimensioningResponse, HealthStatus, InstallationSurface, OrientationResponse,
    ProductionFormRequest, ProductionInput, ProductionRequest, ProductionResponse,
};
use crate::services::calculator_service::{
    dimension_from, parse_positive_field, select_capacity_source, CapacitySource, ModuleSpec,
};
use crate::services::orientation::CardinalDirection;
use crate::services::presentation;
use crate::shared_state::AppState;

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(v)| v)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

fn production_response(state: &AppState, input: ProductionInput) -> Result<ProductionResponse, ApiError> {
    let result = state.engine.estimate_production(&input)?;
    Ok(ProductionResponse {
        display: presentation::production_display(&result),
        result,
    })
}

/// POST /api/production
/// Estimate energy production from installed capacity
///
/// Daily energy is kWp × peak sun hours × efficiency; monthly is 30 days,
/// yearly 365 days. Omitted parameters take the calculator defaults.
#[utoipa::path(
    post,
    path = "/api/production",
    request_body = ProductionRequest,
    responses(
        (status = 200, description = "Production estimate", body = ProductionResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 422, description = "Input rejected by the engine", body = ErrorResponse)
    )
)]
pub async fn estimate_production(
    State(state): State<AppState>,
    payload: Result<Json<ProductionRequest>, JsonRejection>,
) -> Result<Json<ProductionResponse>, ApiError> {
    let req = body(payload)?;
    let calc = state.calculator();
    let input = ProductionInput {
        installed_capacity_kwp: req.installed_capacity_kwp,
        peak_sun_hours: req.peak_sun_hours.unwrap_or_else(|| calc.default_peak_sun_hours()),
        system_efficiency: req.system_efficiency.unwrap_or_else(|| calc.default_efficiency()),
    };
    let response = production_response(&state, input)?;
    info!(
        kwp = input.installed_capacity_kwp,
        monthly_kwh = response.result.monthly_energy_kwh,
        "production request served"
    );
    Ok(Json(response))
}

/// POST /api/production/form
/// Estimate production from raw form text
///
/// Fields are parsed here, not by the engine. If the capacity (or any
/// supplied field) is empty, unparsable or non-positive, nothing is
/// calculated and 204 is returned, like a disabled "calculate" button.
#[utoipa::path(
    post,
    path = "/api/production/form",
    request_body = ProductionFormRequest,
    responses(
        (status = 200, description = "Production estimate", body = ProductionResponse),
        (status = 204, description = "Form incomplete, nothing calculated"),
        (status = 422, description = "Input rejected by the engine", body = ErrorResponse)
    )
)]
pub async fn estimate_production_form(
    State(state): State<AppState>,
    payload: Result<Json<ProductionFormRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let form = body(payload)?;
    let calc = state.calculator();

    let optional = |raw: &Option<String>, default: f64| match raw {
        Some(text) => parse_positive_field(text),
        None => Some(default),
    };
    let parsed = parse_positive_field(&form.installed_capacity_kwp).zip(
        optional(&form.peak_sun_hours, calc.default_peak_sun_hours())
            .zip(optional(&form.efficiency_percent, calc.efficiency_slider.default)),
    );
    let Some((kwp, (hsp, efficiency_percent))) = parsed else {
        debug!(?form, "incomplete calculator form, skipping");
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let response = production_response(
        &state,
        ProductionInput {
            installed_capacity_kwp: kwp,
            peak_sun_hours: hsp,
            system_efficiency: efficiency_percent / 100.0,
        },
    )?;
    Ok(Json(response).into_response())
}

/// POST /api/capacity
/// Estimate the capacity needed to cover a monthly consumption
#[utoipa::path(
    post,
    path = "/api/capacity",
    request_body = CapacityRequest,
    responses(
        (status = 200, description = "Required capacity", body = CapacityResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 422, description = "Input rejected, or efficiency × peak sun hours is zero", body = ErrorResponse)
    )
)]
pub async fn estimate_required_capacity(
    State(state): State<AppState>,
    payload: Result<Json<CapacityRequest>, JsonRejection>,
) -> Result<Json<CapacityResponse>, ApiError> {
    let req = body(payload)?;
    let calc = state.calculator();
    let input = CapacityInput {
        monthly_energy_target_kwh: req.monthly_energy_target_kwh,
        peak_sun_hours: req.peak_sun_hours.unwrap_or_else(|| calc.default_peak_sun_hours()),
        system_efficiency: req.system_efficiency.unwrap_or_else(|| calc.default_efficiency()),
    };
    let result = state.engine.estimate_required_capacity(&input)?;
    info!(
        target_kwh = input.monthly_energy_target_kwh,
        required_kwp = result.required_capacity_kwp,
        "capacity request served"
    );
    Ok(Json(CapacityResponse {
        display: presentation::capacity_display(&result),
        result,
    }))
}

/// POST /api/dimensioning
/// Module count and area for a capacity
///
/// The capacity is taken from `capacity_kwp` if present. Otherwise it comes
/// from the embedded earlier results, and a capacity derived from
/// consumption (`required`) wins over a production estimate's input.
#[utoipa::path(
    post,
    path = "/api/dimensioning",
    request_body = DimensioningRequest,
    responses(
        (status = 200, description = "Module layout", body = DimensioningResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 422, description = "Invalid dimensions, unknown surface or missing capacity", body = ErrorResponse)
    )
)]
pub async fn estimate_dimensioning(
    State(state): State<AppState>,
    payload: Result<Json<DimensioningRequest>, JsonRejection>,
) -> Result<Json<DimensioningResponse>, ApiError> {
    let req = body(payload)?;
    let surface: InstallationSurface = req.installation_surface.parse()?;

    let source = match req.capacity_kwp {
        Some(kwp) => CapacitySource::Explicit(kwp),
        None => select_capacity_source(req.production.as_ref(), req.required.as_ref())
            .ok_or_else(|| EngineError::invalid_input("capacity_kwp", "no capacity or previous result supplied"))?,
    };

    let module = ModuleSpec {
        height_m: req.module_height_m,
        width_m: req.module_width_m,
        power_w: req.module_power_w,
        surface,
    };
    let result = dimension_from(&state.engine, source, &module)?;
    info!(
        source = source.label(),
        modules = result.module_count,
        area_m2 = result.total_area_m2,
        "dimensioning request served"
    );
    Ok(Json(DimensioningResponse {
        capacity_source: source.label().to_string(),
        capacity_kwp: source.capacity_kwp(),
        display: presentation::dimensioning_display(&result),
        result,
    }))
}

/// GET /api/calculator/defaults
/// Slider ranges, defaults and installation surfaces for the calculator form
#[utoipa::path(
    get,
    path = "/api/calculator/defaults",
    responses(
        (status = 200, description = "Calculator defaults", body = CalculatorDefaults)
    )
)]
pub async fn get_calculator_defaults(State(state): State<AppState>) -> Json<CalculatorDefaults> {
    Json(state.calculator().defaults())
}

/// GET /api/orientation/{heading}
/// Cardinal direction for a compass heading in degrees
#[utoipa::path(
    get,
    path = "/api/orientation/{heading}",
    params(
        ("heading" = f64, Path, description = "Heading in degrees, 0 = north, clockwise")
    ),
    responses(
        (status = 200, description = "Cardinal direction", body = OrientationResponse),
        (status = 422, description = "Heading is not a finite number", body = ErrorResponse)
    )
)]
pub async fn get_orientation(Path(heading): Path<f64>) -> Result<Json<OrientationResponse>, ApiError> {
    let direction = CardinalDirection::from_heading(heading)?;
    Ok(Json(OrientationResponse {
        heading_deg: heading,
        short: direction.short().to_string(),
        full: direction.full().to_string(),
    }))
}

/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    )
)]
pub async fn get_health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        uptime_seconds: state.uptime_seconds(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::solar::{CapacityResult, ProductionResult};

    fn state() -> AppState {
        AppState::new(Config::default())
    }

    fn production_request(kwp: f64) -> ProductionRequest {
        ProductionRequest {
            installed_capacity_kwp: kwp,
            peak_sun_hours: Some(5.5),
            system_efficiency: Some(0.85),
        }
    }

    fn dimensioning_request(surface: &str) -> DimensioningRequest {
        DimensioningRequest {
            capacity_kwp: None,
            production: None,
            required: None,
            module_height_m: 2.0,
            module_width_m: 1.2,
            module_power_w: 550.0,
            installation_surface: surface.to_string(),
        }
    }

    #[tokio::test]
    async fn test_production_handler() {
        let Json(resp) = estimate_production(State(state()), Ok(Json(production_request(5.5))))
            .await
            .unwrap();
        assert!((resp.result.monthly_energy_kwh - 771.375).abs() < 1e-9);
        assert_eq!(resp.display.monthly_energy_kwh, "771.4");
    }

    #[tokio::test]
    async fn test_production_handler_uses_defaults() {
        let req = ProductionRequest {
            installed_capacity_kwp: 5.5,
            peak_sun_hours: None,
            system_efficiency: None,
        };
        let Json(resp) = estimate_production(State(state()), Ok(Json(req))).await.unwrap();
        assert_eq!(resp.result.peak_sun_hours_used, 5.5);
        assert!((resp.result.efficiency_used - 0.85).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_production_handler_rejects_negative_capacity() {
        let err = estimate_production(State(state()), Ok(Json(production_request(-1.0))))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Engine(EngineError::InvalidInput { .. })));
    }

    #[tokio::test]
    async fn test_form_with_unparsable_capacity_is_no_op() {
        let form = ProductionFormRequest {
            installed_capacity_kwp: "abc".to_string(),
            peak_sun_hours: None,
            efficiency_percent: None,
        };
        let resp = estimate_production_form(State(state()), Ok(Json(form))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_form_parses_percent_efficiency() {
        let form = ProductionFormRequest {
            installed_capacity_kwp: "5,5".to_string(),
            peak_sun_hours: Some("5.5".to_string()),
            efficiency_percent: Some("85".to_string()),
        };
        let resp = estimate_production_form(State(state()), Ok(Json(form))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_capacity_handler_zero_efficiency_is_domain_error() {
        let req = CapacityRequest {
            monthly_energy_target_kwh: 350.0,
            peak_sun_hours: Some(5.5),
            system_efficiency: Some(0.0),
        };
        let err = estimate_required_capacity(State(state()), Ok(Json(req))).await.unwrap_err();
        assert!(matches!(err, ApiError::Engine(EngineError::Domain(_))));
    }

    #[tokio::test]
    async fn test_dimensioning_prefers_required_capacity() {
        let mut req = dimensioning_request("ground");
        req.production = Some(ProductionResult {
            daily_energy_kwh: 25.7125,
            monthly_energy_kwh: 771.375,
            yearly_energy_kwh: 9385.0625,
            efficiency_used: 0.85,
            peak_sun_hours_used: 5.5,
            installed_capacity_kwp: 5.5,
        });
        req.required = Some(CapacityResult {
            required_capacity_kwp: 2.4955,
            daily_energy_kwh: 350.0 / 30.0,
            yearly_energy_kwh: 4200.0,
            efficiency_used: 0.85,
            peak_sun_hours_used: 5.5,
            monthly_energy_target_kwh: 350.0,
        });
        let Json(resp) = estimate_dimensioning(State(state()), Ok(Json(req))).await.unwrap();
        assert_eq!(resp.capacity_source, "required");
        assert_eq!(resp.result.module_count, 5);
        assert!((resp.result.total_area_m2 - 12.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_dimensioning_unknown_surface() {
        let mut req = dimensioning_request("roof");
        req.capacity_kwp = Some(5.0);
        let err = estimate_dimensioning(State(state()), Ok(Json(req))).await.unwrap_err();
        assert!(matches!(err, ApiError::Engine(EngineError::InvalidEnum { .. })));
    }

    #[tokio::test]
    async fn test_dimensioning_without_capacity() {
        let err = estimate_dimensioning(State(state()), Ok(Json(dimensioning_request("carport"))))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Engine(EngineError::InvalidInput { field: "capacity_kwp", .. })
        ));
    }

    #[tokio::test]
    async fn test_orientation_handler() {
        let Json(resp) = get_orientation(Path(200.0)).await.unwrap();
        assert_eq!(resp.short, "S");
        assert_eq!(resp.full, "South");
    }
}
