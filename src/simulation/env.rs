// src/simulation/env.rs

use crate::error::EnvError;
use crate::io::demand::generate_seasonal_poisson;
use crate::model::observation::Observation;
use crate::simulation::config::EnvConfig;
use crate::simulation::engine::{InventorySimulator, StepInfo};
use crate::strategy::forecast::TwoTierForecaster;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use tracing::info;

/// Optional overrides for a single `reset`.
#[derive(Debug, Clone, Default)]
pub struct ResetOptions {
    /// Replays this demand series instead of drawing a new one.
    /// It must cover at least `horizon` days.
    pub demand_series: Option<Vec<u32>>,
}

/// Returned by `reset`; currently carries nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetInfo;

#[derive(Debug, Clone)]
pub struct Transition {
    pub observation: Observation,
    pub reward: f64,
    pub terminated: bool,
    /// Always false; the only episode end is the horizon.
    pub truncated: bool,
    pub info: StepInfo,
}

/// Step-driven environment around one `InventorySimulator`.
///
/// Each instance owns its random source, so instances can run on separate
/// threads and stay reproducible.
#[derive(Debug)]
pub struct HospitalInventoryEnv {
    config: EnvConfig,
    rng: StdRng,
    sim: InventorySimulator,
}

impl HospitalInventoryEnv {
    /// Validates the configuration and starts a first episode.
    pub fn new(config: EnvConfig) -> Result<Self, EnvError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sim = Self::start_episode(&config, &mut rng, None);

        Ok(Self { config, rng, sim })
    }

    fn start_episode(
        config: &EnvConfig,
        rng: &mut StdRng,
        demand: Option<Vec<u32>>,
    ) -> InventorySimulator {
        let demand = demand.unwrap_or_else(|| {
            generate_seasonal_poisson(
                rng,
                config.demand_days(),
                config.demand_base,
                config.demand_amplitude,
            )
        });
        let forecaster = Box::new(TwoTierForecaster::from_config(config));
        InventorySimulator::new(config.clone(), demand, forecaster)
    }

    /// Starts a new episode: fresh demand, empty stock and pipeline, day 0.
    ///
    /// Passing a `seed` re-seeds this instance's random source first.
    pub fn reset(
        &mut self,
        seed: Option<u64>,
        options: Option<ResetOptions>,
    ) -> Result<(Observation, ResetInfo), EnvError> {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }

        let demand = options.and_then(|o| o.demand_series);
        if let Some(series) = &demand {
            if series.len() < self.config.horizon {
                return Err(EnvError::InvalidOptions(format!(
                    "demand_series covers {} days, horizon is {}",
                    series.len(),
                    self.config.horizon
                )));
            }
        }

        self.sim = Self::start_episode(&self.config, &mut self.rng, demand);
        info!(
            seed = ?seed,
            horizon = self.config.horizon,
            forecast = self.sim.forecast(),
            "episode reset"
        );

        Ok((self.sim.observation(), ResetInfo))
    }

    /// Advances one day. `action` is recorded in `info.requested_action`;
    /// whether it sizes the order depends on `EnvConfig::ordering`.
    pub fn step(&mut self, action: u32) -> Result<Transition, EnvError> {
        if self.sim.is_terminal() {
            return Err(EnvError::EpisodeFinished {
                horizon: self.config.horizon,
            });
        }

        let outcome = self.sim.step(action);

        Ok(Transition {
            observation: self.sim.observation(),
            reward: outcome.reward,
            terminated: outcome.terminated,
            truncated: false,
            info: outcome.info,
        })
    }

    /// Human-readable dump of the current state.
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn observation(&self) -> Observation {
        self.sim.observation()
    }

    pub fn simulator(&self) -> &InventorySimulator {
        &self.sim
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }
}

impl fmt::Display for HospitalInventoryEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Day {}", self.sim.current_day())?;
        writeln!(f, "Inventory ages: {:?}", self.sim.inventory().buckets())?;
        writeln!(f, "Pipeline: {:?}", self.sim.pipeline().slots())?;
        write!(f, "Forecast for next day: {:.2}", self.sim.forecast())
    }
}
