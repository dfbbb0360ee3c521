// src/simulation/runner.rs

use crate::error::EnvError;
use crate::model::observation::{Observation, PIPELINE_LEN, SHELF_LIFE};
use crate::simulation::engine::HistoryRecord;
use crate::simulation::env::HospitalInventoryEnv;
use crate::strategy::traits::OrderPolicy;
use serde::Serialize;
use tracing::info;

/// Totals for one finished episode.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EpisodeSummary {
    pub steps: usize,
    pub total_reward: f64,
    pub total_cost: f64,
    pub total_shortage: u64,
    pub total_expired: u64,
    pub avg_cost_per_day: f64,
}

#[derive(Debug, Clone)]
pub struct EpisodeReport {
    pub summary: EpisodeSummary,
    pub records: Vec<HistoryRecord>,
}

/// Plays one episode from the environment's current state until it ends,
/// asking `policy` for an action every day.
pub fn run_episode(
    env: &mut HospitalInventoryEnv,
    policy: &mut dyn OrderPolicy,
) -> Result<EpisodeReport, EnvError> {
    let mut observation = env.observation();
    let mut summary = EpisodeSummary::default();
    let mut records = Vec::with_capacity(env.config().horizon);

    loop {
        let action = policy.choose_action(&observation);
        let transition = env.step(action)?;

        summary.steps += 1;
        summary.total_reward += transition.reward;
        summary.total_cost += transition.info.cost;
        summary.total_shortage += u64::from(transition.info.shortage);
        summary.total_expired += u64::from(transition.info.expired);

        let sim = env.simulator();
        records.push(HistoryRecord {
            day: sim.current_day(),
            action,
            order_placed: transition.info.order_placed,
            demand: transition.info.demand,
            arrivals: transition.info.arrivals,
            consumed: transition.info.consumed,
            shortage: transition.info.shortage,
            expired: transition.info.expired,
            on_hand: sim.inventory().total(),
            in_transit: sim.pipeline().total(),
            forecast: sim.forecast(),
            reward: transition.reward,
        });

        if summary.steps % 30 == 0 {
            info!(
                day = summary.steps,
                action,
                reward = transition.reward,
                cost = transition.info.cost,
                shortage = transition.info.shortage,
                expired = transition.info.expired,
                "progress"
            );
        }

        observation = transition.observation;
        if transition.terminated || transition.truncated {
            break;
        }
    }

    if summary.steps > 0 {
        summary.avg_cost_per_day = summary.total_cost / summary.steps as f64;
    }
    info!(
        steps = summary.steps,
        total_reward = summary.total_reward,
        total_cost = summary.total_cost,
        total_shortage = summary.total_shortage,
        total_expired = summary.total_expired,
        "episode finished"
    );

    Ok(EpisodeReport { summary, records })
}

/// Queries a policy with externally supplied state, as a serving endpoint
/// would. The simulator is not involved; the action is clamped to
/// `[0, max_action]`.
pub fn predict_action(
    policy: &mut dyn OrderPolicy,
    inventory: [f32; SHELF_LIFE],
    pipeline: [f32; PIPELINE_LEN],
    forecast: f32,
    max_action: u32,
) -> Result<u32, EnvError> {
    let observation = Observation::from_parts(inventory, pipeline, forecast)?;
    Ok(policy.choose_action(&observation).min(max_action))
}
