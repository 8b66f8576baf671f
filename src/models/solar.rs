use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::EngineError;

// ─── Forward: capacity → production ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductionInput {
    /// Nameplate capacity of the array (kWp)
    pub installed_capacity_kwp: f64,
    /// Equivalent full-sun hours per day (h/day)
    pub peak_sun_hours: f64,
    /// Derating factor in (0, 1]
    pub system_efficiency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductionResult {
    pub daily_energy_kwh: f64,
    pub monthly_energy_kwh: f64,
    pub yearly_energy_kwh: f64,
    pub efficiency_used: f64,
    pub peak_sun_hours_used: f64,
    /// Echo of the capacity the estimate was computed for (kWp)
    pub installed_capacity_kwp: f64,
}

// ─── Reverse: consumption → capacity ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CapacityInput {
    /// Monthly consumption the array must cover (kWh/month)
    pub monthly_energy_target_kwh: f64,
    pub peak_sun_hours: f64,
    pub system_efficiency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CapacityResult {
    pub required_capacity_kwp: f64,
    pub daily_energy_kwh: f64,
    pub yearly_energy_kwh: f64,
    pub efficiency_used: f64,
    pub peak_sun_hours_used: f64,
    pub monthly_energy_target_kwh: f64,
}

// ─── Dimensioning: capacity → module layout ──────────────────────────────────

/// Mounting surface of the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InstallationSurface {
    Ceramic,
    Metallic,
    Carport,
    Ground,
}

impl InstallationSurface {
    pub const ALL: [InstallationSurface; 4] = [
        InstallationSurface::Ceramic,
        InstallationSurface::Metallic,
        InstallationSurface::Carport,
        InstallationSurface::Ground,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InstallationSurface::Ceramic => "ceramic",
            InstallationSurface::Metallic => "metallic",
            InstallationSurface::Carport => "carport",
            InstallationSurface::Ground => "ground",
        }
    }
}

impl fmt::Display for InstallationSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstallationSurface {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|surface| surface.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| EngineError::InvalidEnum {
                field: "installation_surface",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DimensioningInput {
    pub capacity_kwp: f64,
    pub module_height_m: f64,
    pub module_width_m: f64,
    /// Nameplate power of a single module (W)
    pub module_power_w: f64,
    pub installation_surface: InstallationSurface,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DimensioningResult {
    pub module_count: u64,
    pub module_area_m2: f64,
    pub total_area_m2: f64,
    pub module_power_w: f64,
    pub installation_surface: InstallationSurface,
}

// ─── REST API request / response types ───────────────────────────────────────

/// `peak_sun_hours` and `system_efficiency` fall back to the configured
/// slider defaults when omitted.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductionRequest {
    pub installed_capacity_kwp: f64,
    pub peak_sun_hours: Option<f64>,
    pub system_efficiency: Option<f64>,
}

/// Raw form fields, parsed caller-side before the engine runs. Efficiency
/// is entered as a percentage, like on the calculator slider.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductionFormRequest {
    pub installed_capacity_kwp: String,
    pub peak_sun_hours: Option<String>,
    pub efficiency_percent: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CapacityRequest {
    pub monthly_energy_target_kwh: f64,
    pub peak_sun_hours: Option<f64>,
    pub system_efficiency: Option<f64>,
}

/// Either an explicit `capacity_kwp`, or the results of earlier calculations.
/// When both previous results are supplied the capacity-from-consumption one
/// wins; an explicit `capacity_kwp` overrides both.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DimensioningRequest {
    pub capacity_kwp: Option<f64>,
    pub production: Option<ProductionResult>,
    pub required: Option<CapacityResult>,
    pub module_height_m: f64,
    pub module_width_m: f64,
    pub module_power_w: f64,
    pub installation_surface: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductionDisplay {
    pub daily_energy_kwh: String,
    pub monthly_energy_kwh: String,
    pub yearly_energy_kwh: String,
    pub efficiency_percent: String,
    pub peak_sun_hours: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CapacityDisplay {
    pub required_capacity_kwp: String,
    pub daily_energy_kwh: String,
    pub yearly_energy_kwh: String,
    pub efficiency_percent: String,
    pub peak_sun_hours: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DimensioningDisplay {
    pub module_count: String,
    pub module_area_m2: String,
    pub total_area_m2: String,
    pub installation_surface: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductionResponse {
    pub result: ProductionResult,
    pub display: ProductionDisplay,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CapacityResponse {
    pub result: CapacityResult,
    pub display: CapacityDisplay,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DimensioningResponse {
    /// Which value fed the layout: "explicit", "production" or "required"
    pub capacity_source: String,
    pub capacity_kwp: f64,
    pub result: DimensioningResult,
    pub display: DimensioningDisplay,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

/// Slider ranges and defaults for the calculator form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalculatorDefaults {
    pub peak_sun_hours: SliderRange,
    /// Expressed in percent, as shown to the user
    pub efficiency_percent: SliderRange,
    pub installation_surfaces: Vec<InstallationSurface>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrientationResponse {
    pub heading_deg: f64,
    pub short: String,
    pub full: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ceramic", InstallationSurface::Ceramic)]
    #[case("Metallic", InstallationSurface::Metallic)]
    #[case(" carport ", InstallationSurface::Carport)]
    #[case("GROUND", InstallationSurface::Ground)]
    fn test_surface_parses_known_values(#[case] raw: &str, #[case] expected: InstallationSurface) {
        assert_eq!(raw.parse::<InstallationSurface>().unwrap(), expected);
    }

    #[rstest]
    #[case("roof")]
    #[case("")]
    #[case("ceramics")]
    fn test_surface_rejects_unknown_values(#[case] raw: &str) {
        let err = raw.parse::<InstallationSurface>().unwrap_err();
        assert!(matches!(err, EngineError::InvalidEnum { field: "installation_surface", .. }));
    }

    #[test]
    fn test_surface_serializes_lowercase() {
        let json = serde_json::to_string(&InstallationSurface::Carport).unwrap();
        assert_eq!(json, "\"carport\"");
    }
}
