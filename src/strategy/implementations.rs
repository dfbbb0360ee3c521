// src/strategy/implementations.rs

use crate::model::observation::Observation;
use crate::strategy::traits::OrderPolicy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// =========================================================================
// 1. Constant Policy
// =========================================================================

/// Always requests the same quantity.
#[derive(Debug, Clone)]
pub struct ConstantPolicy {
    quantity: u32,
}

impl ConstantPolicy {
    pub fn new(quantity: u32) -> Self {
        Self { quantity }
    }
}

impl OrderPolicy for ConstantPolicy {
    fn choose_action(&mut self, _observation: &Observation) -> u32 {
        self.quantity
    }
}

// =========================================================================
// 2. Random Policy
// =========================================================================

/// Requests a uniformly random quantity in `[min, max]`.
/// Useful as an exploration baseline.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    min: u32,
    max: u32,
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(min: u32, max: u32, seed: u64) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl OrderPolicy for RandomPolicy {
    fn choose_action(&mut self, _observation: &Observation) -> u32 {
        self.rng.gen_range(self.min..=self.max)
    }
}

// =========================================================================
// 3. Forecast Gap Policy ("Order-Up-To" the forecast)
// =========================================================================

/// Orders what the forecast says is missing once on-hand and in-transit
/// stock are counted.
///
/// Formula: Order = Forecast - (OnHand + InTransit), clamped to `[0, max_action]`.
#[derive(Debug, Clone)]
pub struct ForecastGapPolicy {
    max_action: u32,
}

impl ForecastGapPolicy {
    pub fn new(max_action: u32) -> Self {
        Self { max_action }
    }
}

impl OrderPolicy for ForecastGapPolicy {
    fn choose_action(&mut self, observation: &Observation) -> u32 {
        let position = observation.on_hand() + observation.in_transit();
        let gap = observation.forecast - position;

        if gap <= 0.0 {
            0
        } else {
            (gap.round() as u32).min(self.max_action)
        }
    }
}
