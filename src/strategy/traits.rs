// src/strategy/traits.rs

use crate::error::ForecastError;
use crate::model::observation::Observation;
use std::fmt::Debug;

/// Turns the demand history observed so far into a forward-looking scalar.
///
/// We require `Send` + `Sync` so environments can be moved across threads.
pub trait ForecastStrategy: Debug + Send + Sync {
    /// Forecasts from `history`, oldest entry first.
    ///
    /// Errors are recoverable: callers are expected to fall back to a
    /// simpler strategy rather than abort the episode.
    fn forecast(&self, history: &[u32]) -> Result<f64, ForecastError>;

    /// Short label used in logs.
    fn name(&self) -> &'static str;
}

/// Decision logic that maps an observation to an order action.
///
/// This is the seam a trained model plugs into; the simulator itself only
/// sees the resulting integer action.
pub trait OrderPolicy: Debug + Send + Sync {
    /// Returns the action (order quantity) for this observation.
    fn choose_action(&mut self, observation: &Observation) -> u32;
}
