use std::sync::Arc;
use std::time::Instant;

use crate::config::{CalculatorConfig, Config};
use crate::services::solar_engine::SolarEngine;

/// Handler state. Nothing here is mutable: the engine is a plain value and
/// the configuration is shared read-only.
#[derive(Clone, Debug)]
pub struct AppState {
    pub engine: SolarEngine,
    pub config: Arc<Config>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            engine: SolarEngine::new(config.calculator.limits),
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    pub fn calculator(&self) -> &CalculatorConfig {
        &self.config.calculator
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
