//! Display formatting for calculation results. The engine returns full
//! precision; rounding happens only here.

use crate::models::solar::{
    CapacityDisplay, CapacityResult, DimensioningDisplay, DimensioningResult, ProductionDisplay,
    ProductionResult,
};

pub fn production_display(r: &ProductionResult) -> ProductionDisplay {
    ProductionDisplay {
        daily_energy_kwh: format!("{:.1}", r.daily_energy_kwh),
        monthly_energy_kwh: format!("{:.1}", r.monthly_energy_kwh),
        yearly_energy_kwh: format!("{:.0}", r.yearly_energy_kwh),
        efficiency_percent: percent(r.efficiency_used),
        peak_sun_hours: format!("{:.1}", r.peak_sun_hours_used),
    }
}

pub fn capacity_display(r: &CapacityResult) -> CapacityDisplay {
    CapacityDisplay {
        required_capacity_kwp: format!("{:.2}", r.required_capacity_kwp),
        daily_energy_kwh: format!("{:.1}", r.daily_energy_kwh),
        yearly_energy_kwh: format!("{:.0}", r.yearly_energy_kwh),
        efficiency_percent: percent(r.efficiency_used),
        peak_sun_hours: format!("{:.1}", r.peak_sun_hours_used),
    }
}

pub fn dimensioning_display(r: &DimensioningResult) -> DimensioningDisplay {
    DimensioningDisplay {
        module_count: r.module_count.to_string(),
        module_area_m2: format!("{:.2}", r.module_area_m2),
        total_area_m2: format!("{:.2}", r.total_area_m2),
        installation_surface: r.installation_surface.to_string(),
    }
}

fn percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}
