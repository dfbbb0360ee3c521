// src/simulation/config.rs

use crate::error::EnvError;
use crate::model::observation::{PIPELINE_LEN, SHELF_LIFE};

/// How the order placed each day is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingMode {
    /// Order `max(0, forecast - on_hand)`; the agent's action is only recorded.
    #[default]
    ForecastOverride,
    /// Order the agent's action, capped at `max_action`.
    AgentControlled,
}

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub shelf_life: usize,
    pub horizon: usize,
    /// Extra demand days generated past the horizon.
    pub buffer_days: usize,
    pub cost_holding: f64,
    pub cost_waste: f64,
    pub cost_shortage: f64,
    /// Pipeline slot a new order is placed into.
    pub lead_time: usize,
    pub demand_base: f64,
    pub demand_amplitude: f64,
    /// History length at which the seasonal model takes over.
    pub forecast_threshold: usize,
    pub short_window: usize,
    pub forecast_periods: usize,
    pub max_action: u32,
    pub ordering: OrderingMode,
    pub seed: Option<u64>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            shelf_life: SHELF_LIFE,
            horizon: 365,
            buffer_days: 30,
            cost_holding: 0.5,
            cost_waste: 2.0,
            cost_shortage: 3.0,
            lead_time: 3,
            demand_base: 20.0,
            demand_amplitude: 10.0,
            forecast_threshold: 10,
            short_window: 7,
            forecast_periods: 3,
            max_action: 50,
            ordering: OrderingMode::ForecastOverride,
            seed: None,
        }
    }
}

impl EnvConfig {
    /// Rejects configurations that cannot run an episode.
    pub fn validate(&self) -> Result<(), EnvError> {
        if self.shelf_life == 0 || self.shelf_life > SHELF_LIFE {
            return Err(EnvError::InvalidConfiguration(format!(
                "shelf_life must be in 1..={SHELF_LIFE}, got {}",
                self.shelf_life
            )));
        }
        if self.horizon == 0 {
            return Err(EnvError::InvalidConfiguration(
                "horizon must be positive".to_string(),
            ));
        }
        for (name, value) in [
            ("cost_holding", self.cost_holding),
            ("cost_waste", self.cost_waste),
            ("cost_shortage", self.cost_shortage),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EnvError::InvalidConfiguration(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.lead_time >= PIPELINE_LEN {
            return Err(EnvError::InvalidConfiguration(format!(
                "lead_time must be below {PIPELINE_LEN}, got {}",
                self.lead_time
            )));
        }
        if self.short_window == 0 || self.forecast_periods == 0 {
            return Err(EnvError::InvalidConfiguration(
                "short_window and forecast_periods must be positive".to_string(),
            ));
        }
        if !self.demand_base.is_finite()
            || self.demand_base < 0.0
            || !self.demand_amplitude.is_finite()
        {
            return Err(EnvError::InvalidConfiguration(
                "demand curve parameters must be finite and demand_base non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Length of the generated demand series.
    pub fn demand_days(&self) -> usize {
        self.horizon + self.buffer_days
    }
}
