//! Caller-side policies around the engine: which earlier result feeds the
//! module layout, and how raw form text becomes engine input.

use crate::error::EngineError;
use crate::models::solar::{
    CapacityResult, DimensioningInput, DimensioningResult, InstallationSurface, ProductionResult,
};
use crate::services::solar_engine::SolarEngine;

/// The capacity value a layout is computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapacitySource<'a> {
    /// Typed in directly by the user.
    Explicit(f64),
    /// Capacity the user entered for a production estimate.
    Production(&'a ProductionResult),
    /// Capacity derived from a consumption target.
    Required(&'a CapacityResult),
}

impl CapacitySource<'_> {
    pub fn capacity_kwp(&self) -> f64 {
        match self {
            CapacitySource::Explicit(kwp) => *kwp,
            CapacitySource::Production(r) => r.installed_capacity_kwp,
            CapacitySource::Required(r) => r.required_capacity_kwp,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CapacitySource::Explicit(_) => "explicit",
            CapacitySource::Production(_) => "production",
            CapacitySource::Required(_) => "required",
        }
    }
}

/// Picks the capacity to dimension from. The consumption-derived capacity
/// takes precedence over the forward estimate's input when both exist.
pub fn select_capacity_source<'a>(
    production: Option<&'a ProductionResult>,
    required: Option<&'a CapacityResult>,
) -> Option<CapacitySource<'a>> {
    match (production, required) {
        (_, Some(r)) => Some(CapacitySource::Required(r)),
        (Some(p), None) => Some(CapacitySource::Production(p)),
        (None, None) => None,
    }
}

/// Physical characteristics of the chosen module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleSpec {
    pub height_m: f64,
    pub width_m: f64,
    pub power_w: f64,
    pub surface: InstallationSurface,
}

pub fn dimension_from(
    engine: &SolarEngine,
    source: CapacitySource<'_>,
    module: &ModuleSpec,
) -> Result<DimensioningResult, EngineError> {
    engine.estimate_dimensioning(&DimensioningInput {
        capacity_kwp: source.capacity_kwp(),
        module_height_m: module.height_m,
        module_width_m: module.width_m,
        module_power_w: module.power_w,
        installation_surface: module.surface,
    })
}

/// Parses a numeric form field. Returns `None` for empty, unparsable,
/// non-finite or non-positive text; the form treats that as "nothing to
/// calculate yet" rather than an error.
pub fn parse_positive_field(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}
