//! ============================================================
//!  Solar Production & Sizing Engine
//!
//!  Three conversions, all pure functions of their input:
//!   1. Production  – kWp × HSP × η            → kWh/day, /month, /year
//!   2. Capacity    – kWh/month ÷ (HSP × 30 × η) → required kWp
//!   3. Dimensioning – kWp × 1000 ÷ W/module    → module count (rounded up),
//!                     module area, total area
//!
//!  No rounding is applied here; formatting is left to the caller.
//! ============================================================

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;
use crate::models::solar::{
    CapacityInput, CapacityResult, DimensioningInput, DimensioningResult, ProductionInput,
    ProductionResult,
};

// ─── Calendar / unit constants ───────────────────────────────
pub const DAYS_PER_MONTH: f64 = 30.0;
pub const DAYS_PER_YEAR: f64 = 365.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;
pub const WATTS_PER_KILOWATT: f64 = 1000.0;

fn default_psh_min() -> f64 { 3.0 }
fn default_psh_max() -> f64 { 8.0 }
fn default_efficiency_max() -> f64 { 1.0 }

/// Accepted ranges for the environmental parameters.
///
/// Peak sun hours must lie in `[peak_sun_hours_min, peak_sun_hours_max]`,
/// efficiency in `(0, efficiency_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputLimits {
    #[serde(default = "default_psh_min")]
    pub peak_sun_hours_min: f64,
    #[serde(default = "default_psh_max")]
    pub peak_sun_hours_max: f64,
    #[serde(default = "default_efficiency_max")]
    pub efficiency_max: f64,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            peak_sun_hours_min: default_psh_min(),
            peak_sun_hours_max: default_psh_max(),
            efficiency_max: default_efficiency_max(),
        }
    }
}

/// Stateless calculator. Copying it is free; every method recomputes from
/// its arguments and nothing is remembered between calls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolarEngine {
    limits: InputLimits,
}

impl SolarEngine {
    pub fn new(limits: InputLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &InputLimits {
        &self.limits
    }

    /// Energy produced by an installation of known capacity.
    pub fn estimate_production(
        &self,
        input: &ProductionInput,
    ) -> Result<ProductionResult, EngineError> {
        require_finite("installed_capacity_kwp", input.installed_capacity_kwp)?;
        require_finite("peak_sun_hours", input.peak_sun_hours)?;
        require_finite("system_efficiency", input.system_efficiency)?;

        require_positive("installed_capacity_kwp", input.installed_capacity_kwp)?;
        self.check_peak_sun_hours(input.peak_sun_hours)?;
        self.check_efficiency(input.system_efficiency)?;

        let daily_energy_kwh =
            input.installed_capacity_kwp * input.peak_sun_hours * input.system_efficiency;
        require_representable("yearly_energy_kwh", daily_energy_kwh * DAYS_PER_YEAR)?;

        let result = ProductionResult {
            daily_energy_kwh,
            monthly_energy_kwh: daily_energy_kwh * DAYS_PER_MONTH,
            yearly_energy_kwh: daily_energy_kwh * DAYS_PER_YEAR,
            efficiency_used: input.system_efficiency,
            peak_sun_hours_used: input.peak_sun_hours,
            installed_capacity_kwp: input.installed_capacity_kwp,
        };
        debug!(
            kwp = input.installed_capacity_kwp,
            hsp = input.peak_sun_hours,
            efficiency = input.system_efficiency,
            monthly_kwh = result.monthly_energy_kwh,
            "production estimated"
        );
        Ok(result)
    }

    /// Capacity needed to cover a monthly consumption target. Inverse of
    /// [`SolarEngine::estimate_production`].
    pub fn estimate_required_capacity(
        &self,
        input: &CapacityInput,
    ) -> Result<CapacityResult, EngineError> {
        require_finite("monthly_energy_target_kwh", input.monthly_energy_target_kwh)?;
        require_finite("peak_sun_hours", input.peak_sun_hours)?;
        require_finite("system_efficiency", input.system_efficiency)?;

        let divisor = input.peak_sun_hours * DAYS_PER_MONTH * input.system_efficiency;
        if divisor == 0.0 {
            return Err(EngineError::Domain(format!(
                "peak sun hours ({}) × efficiency ({}) is zero",
                input.peak_sun_hours, input.system_efficiency
            )));
        }

        require_positive("monthly_energy_target_kwh", input.monthly_energy_target_kwh)?;
        self.check_peak_sun_hours(input.peak_sun_hours)?;
        self.check_efficiency(input.system_efficiency)?;

        let required_capacity_kwp = input.monthly_energy_target_kwh / divisor;
        require_representable("required_capacity_kwp", required_capacity_kwp)?;
        let yearly_energy_kwh = input.monthly_energy_target_kwh * MONTHS_PER_YEAR;
        require_representable("yearly_energy_kwh", yearly_energy_kwh)?;

        let result = CapacityResult {
            required_capacity_kwp,
            daily_energy_kwh: input.monthly_energy_target_kwh / DAYS_PER_MONTH,
            yearly_energy_kwh,
            efficiency_used: input.system_efficiency,
            peak_sun_hours_used: input.peak_sun_hours,
            monthly_energy_target_kwh: input.monthly_energy_target_kwh,
        };
        debug!(
            target_kwh = input.monthly_energy_target_kwh,
            hsp = input.peak_sun_hours,
            efficiency = input.system_efficiency,
            required_kwp = result.required_capacity_kwp,
            "required capacity estimated"
        );
        Ok(result)
    }

    /// Module layout for a given capacity. Partial modules cannot be
    /// installed, so the count always rounds up.
    pub fn estimate_dimensioning(
        &self,
        input: &DimensioningInput,
    ) -> Result<DimensioningResult, EngineError> {
        for (field, value) in [
            ("capacity_kwp", input.capacity_kwp),
            ("module_height_m", input.module_height_m),
            ("module_width_m", input.module_width_m),
            ("module_power_w", input.module_power_w),
        ] {
            require_finite(field, value)?;
            require_positive(field, value)?;
        }

        let module_area_m2 = input.module_height_m * input.module_width_m;
        let module_count = module_count(input.capacity_kwp, input.module_power_w)?;
        let total_area_m2 = module_count as f64 * module_area_m2;
        require_representable("total_area_m2", total_area_m2)?;

        let result = DimensioningResult {
            module_count,
            module_area_m2,
            total_area_m2,
            module_power_w: input.module_power_w,
            installation_surface: input.installation_surface,
        };
        debug!(
            kwp = input.capacity_kwp,
            module_w = input.module_power_w,
            modules = result.module_count,
            area_m2 = result.total_area_m2,
            surface = %input.installation_surface,
            "installation dimensioned"
        );
        Ok(result)
    }

    fn check_peak_sun_hours(&self, hsp: f64) -> Result<(), EngineError> {
        let InputLimits { peak_sun_hours_min: min, peak_sun_hours_max: max, .. } = self.limits;
        if hsp < min || hsp > max {
            return Err(EngineError::invalid_input(
                "peak_sun_hours",
                format!("{hsp} is outside [{min}, {max}]"),
            ));
        }
        Ok(())
    }

    fn check_efficiency(&self, efficiency: f64) -> Result<(), EngineError> {
        let max = self.limits.efficiency_max;
        if efficiency <= 0.0 || efficiency > max {
            return Err(EngineError::invalid_input(
                "system_efficiency",
                format!("{efficiency} is outside (0, {max}]"),
            ));
        }
        Ok(())
    }
}

fn module_count(capacity_kwp: f64, module_power_w: f64) -> Result<u64, EngineError> {
    let modules = (capacity_kwp * WATTS_PER_KILOWATT / module_power_w).ceil();
    if !modules.is_finite() || modules > u64::MAX as f64 {
        return Err(EngineError::Domain(format!(
            "{capacity_kwp} kWp of {module_power_w} W modules exceeds the countable range"
        )));
    }
    Ok((modules as u64).max(1))
}

/// Rejects results that overflowed to infinity.
fn require_representable(quantity: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::Domain(format!("{quantity} overflows the floating-point range")))
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::invalid_input(field, format!("{value} is not a finite number")))
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), EngineError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid_input(field, format!("{value} must be greater than zero")))
    }
}
