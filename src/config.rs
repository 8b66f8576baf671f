use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::solar::{CalculatorDefaults, InstallationSurface, SliderRange};
use crate::services::solar_engine::InputLimits;

pub const CONFIG_PATH_ENV: &str = "SOLAR_ESTIMATOR_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3000 }
fn default_static_dir() -> String { "static".to_string() }

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub calculator: CalculatorConfig,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            calculator: CalculatorConfig::default(),
            log_format: LogFormat::default(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

fn default_psh_slider() -> SliderRange {
    SliderRange { min: 3.0, max: 8.0, step: 0.1, default: 5.5 }
}

fn default_efficiency_slider() -> SliderRange {
    SliderRange { min: 70.0, max: 95.0, step: 1.0, default: 85.0 }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CalculatorConfig {
    #[serde(default)]
    pub limits: InputLimits,
    #[serde(default = "default_psh_slider")]
    pub peak_sun_hours_slider: SliderRange,
    /// Percent, converted to a fraction before reaching the engine.
    #[serde(default = "default_efficiency_slider")]
    pub efficiency_slider: SliderRange,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            limits: InputLimits::default(),
            peak_sun_hours_slider: default_psh_slider(),
            efficiency_slider: default_efficiency_slider(),
        }
    }
}

impl CalculatorConfig {
    pub fn default_peak_sun_hours(&self) -> f64 {
        self.peak_sun_hours_slider.default
    }

    pub fn default_efficiency(&self) -> f64 {
        self.efficiency_slider.default / 100.0
    }

    pub fn defaults(&self) -> CalculatorDefaults {
        CalculatorDefaults {
            peak_sun_hours: self.peak_sun_hours_slider.clone(),
            efficiency_percent: self.efficiency_slider.clone(),
            installation_surfaces: InstallationSurface::ALL.to_vec(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the built-in defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.calculator.limits;
        let values = [limits.peak_sun_hours_min, limits.peak_sun_hours_max, limits.efficiency_max];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid("calculator limits must be finite".into()));
        }
        if limits.peak_sun_hours_min <= 0.0 || limits.peak_sun_hours_min >= limits.peak_sun_hours_max {
            return Err(ConfigError::Invalid(format!(
                "peak sun hours range [{}, {}] is empty or non-positive",
                limits.peak_sun_hours_min, limits.peak_sun_hours_max
            )));
        }
        if limits.efficiency_max <= 0.0 || limits.efficiency_max > 1.0 {
            return Err(ConfigError::Invalid(format!(
                "efficiency_max {} must lie in (0, 1]",
                limits.efficiency_max
            )));
        }
        for (name, slider) in [
            ("peak_sun_hours_slider", &self.calculator.peak_sun_hours_slider),
            ("efficiency_slider", &self.calculator.efficiency_slider),
        ] {
            if !(slider.min <= slider.default && slider.default <= slider.max) || slider.step <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name}: default {} outside [{}, {}] or step {} not positive",
                    slider.default, slider.min, slider.max, slider.step
                )));
            }
        }
        Ok(())
    }
}
