// src/simulation/engine.rs

use crate::model::inventory::AgedInventory;
use crate::model::observation::{Observation, PIPELINE_LEN, SHELF_LIFE};
use crate::model::queues::OrderPipeline;
use crate::simulation::config::{EnvConfig, OrderingMode};
use crate::strategy::traits::ForecastStrategy;
use serde::Serialize;
use tracing::debug;

/// Per-day telemetry returned alongside the reward.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StepInfo {
    pub cost: f64,
    pub holding_cost: f64,
    pub waste_cost: f64,
    pub shortage_cost: f64,
    pub demand: u32,
    pub arrivals: u32,
    pub consumed: u32,
    pub shortage: u32,
    pub expired: u32,
    pub order_placed: u32,
    /// The action the agent sent, whether or not it sized the order.
    pub requested_action: u32,
}

#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub reward: f64,
    pub terminated: bool,
    pub info: StepInfo,
}

// We make this Serialize so we can write it to CSV later
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecord {
    pub day: usize,
    pub action: u32,
    pub order_placed: u32,
    pub demand: u32,
    pub arrivals: u32,
    pub consumed: u32,
    pub shortage: u32,
    pub expired: u32,
    pub on_hand: u32,
    pub in_transit: u32,
    pub forecast: f64,
    pub reward: f64,
}

/// The perishable-stock state machine for one episode.
#[derive(Debug)]
pub struct InventorySimulator {
    config: EnvConfig,
    inventory: AgedInventory,
    pipeline: OrderPipeline,
    demand_schedule: Vec<u32>,
    current_day: usize,
    history: Vec<u32>,
    forecast: f64,
    forecaster: Box<dyn ForecastStrategy>,
}

impl InventorySimulator {
    /// Starts an episode with empty stock. History is seeded with day 0's
    /// demand and the first forecast is computed from it.
    pub fn new(
        config: EnvConfig,
        demand_schedule: Vec<u32>,
        forecaster: Box<dyn ForecastStrategy>,
    ) -> Self {
        let history: Vec<u32> = demand_schedule.first().copied().into_iter().collect();
        let forecast = published_forecast(forecaster.as_ref(), &history);

        Self {
            inventory: AgedInventory::new(config.shelf_life),
            pipeline: OrderPipeline::new(),
            config,
            demand_schedule,
            current_day: 0,
            history,
            forecast,
            forecaster,
        }
    }

    /// Replaces the starting stock, e.g. to replay a known situation.
    pub fn with_stock(mut self, inventory: AgedInventory, pipeline: OrderPipeline) -> Self {
        self.inventory = inventory;
        self.pipeline = pipeline;
        self
    }

    /// Runs one simulated day.
    pub fn step(&mut self, action: u32) -> StepOutcome {
        // =================================================================
        // PHASE 1: ORDERING
        // =================================================================
        let on_hand = self.inventory.total();
        let order_qty = match self.config.ordering {
            OrderingMode::ForecastOverride => (self.forecast - on_hand as f64).max(0.0),
            OrderingMode::AgentControlled => action.min(self.config.max_action) as f64,
        };

        let mut order_placed = 0;
        if order_qty > 0.0 && self.pipeline.far_slot_free() {
            order_placed = order_qty as u32;
            self.pipeline.place(self.config.lead_time, order_placed);
        }

        // =================================================================
        // PHASE 2: ARRIVALS
        // =================================================================
        let arrivals = self.pipeline.advance();
        if arrivals > 0 {
            self.inventory.receive(arrivals);
        }

        // =================================================================
        // PHASE 3: DEMAND
        // =================================================================
        let demand = *self.demand_schedule.get(self.current_day).unwrap_or(&0);
        let served = self.inventory.consume_oldest_first(demand);

        // =================================================================
        // PHASE 4: AGING
        // =================================================================
        let expired = self.inventory.age();

        // =================================================================
        // PHASE 5: COSTS
        // =================================================================
        let holding_cost = self.config.cost_holding * self.inventory.total() as f64;
        let waste_cost = self.config.cost_waste * expired as f64;
        let shortage_cost = self.config.cost_shortage * served.shortage as f64;
        let cost = holding_cost + waste_cost + shortage_cost;

        // =================================================================
        // PHASE 6: RECORD & ADVANCE
        // =================================================================
        self.current_day += 1;
        self.history.push(demand);
        self.forecast = published_forecast(self.forecaster.as_ref(), &self.history);

        debug!(
            day = self.current_day,
            demand,
            order_placed,
            arrivals,
            shortage = served.shortage,
            expired,
            cost,
            forecast = self.forecast,
            "day simulated"
        );

        StepOutcome {
            reward: -cost,
            terminated: self.is_terminal(),
            info: StepInfo {
                cost,
                holding_cost,
                waste_cost,
                shortage_cost,
                demand,
                arrivals,
                consumed: served.consumed,
                shortage: served.shortage,
                expired,
                order_placed,
                requested_action: action,
            },
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.current_day >= self.config.horizon
    }

    pub fn observation(&self) -> Observation {
        let mut inventory = [0.0; SHELF_LIFE];
        for (slot, &units) in inventory.iter_mut().zip(self.inventory.buckets()) {
            *slot = units as f32;
        }
        let mut pipeline = [0.0; PIPELINE_LEN];
        for (slot, &units) in pipeline.iter_mut().zip(self.pipeline.slots()) {
            *slot = units as f32;
        }
        Observation {
            inventory,
            pipeline,
            forecast: self.forecast as f32,
        }
    }

    pub fn current_day(&self) -> usize {
        self.current_day
    }

    pub fn forecast(&self) -> f64 {
        self.forecast
    }

    pub fn inventory(&self) -> &AgedInventory {
        &self.inventory
    }

    pub fn pipeline(&self) -> &OrderPipeline {
        &self.pipeline
    }

    pub fn history(&self) -> &[u32] {
        &self.history
    }

    pub fn demand_schedule(&self) -> &[u32] {
        &self.demand_schedule
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }
}

/// Forecast exposed in the observation: failures read as zero, never negative.
fn published_forecast(forecaster: &dyn ForecastStrategy, history: &[u32]) -> f64 {
    forecaster.forecast(history).unwrap_or(0.0).max(0.0)
}
