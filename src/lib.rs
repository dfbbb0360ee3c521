//! Perishable inventory simulation for a single hospital consumable.
//!
//! An external agent drives [`HospitalInventoryEnv`] one day at a time
//! through `reset` / `step`, receiving a fixed-width [`Observation`] and a
//! non-positive cost-based reward.

pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{EnvError, ForecastError};
pub use model::observation::{Observation, OBS_LEN, PIPELINE_LEN, SHELF_LIFE};
pub use simulation::config::{EnvConfig, OrderingMode};
pub use simulation::engine::{HistoryRecord, InventorySimulator, StepInfo};
pub use simulation::env::{HospitalInventoryEnv, ResetInfo, ResetOptions, Transition};
pub use simulation::runner::{predict_action, run_episode, EpisodeReport, EpisodeSummary};
