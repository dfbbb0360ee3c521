// src/strategy/forecast.rs

use crate::error::ForecastError;
use crate::simulation::config::EnvConfig;
use crate::strategy::regression::{fourier_terms, ridge_least_squares};
use crate::strategy::traits::ForecastStrategy;
use tracing::warn;

// =========================================================================
// 1. Short History Average
// =========================================================================

/// Mean of the most recent `window` days, or of everything when the history
/// is shorter than the window. Used while a seasonal fit is unreliable.
#[derive(Debug, Clone)]
pub struct ShortHistoryAverage {
    window: usize,
}

impl ShortHistoryAverage {
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }
}

impl ForecastStrategy for ShortHistoryAverage {
    fn forecast(&self, history: &[u32]) -> Result<f64, ForecastError> {
        if history.is_empty() {
            return Err(ForecastError::EmptyHistory);
        }
        let start = history.len().saturating_sub(self.window);
        let recent = &history[start..];
        let sum: f64 = recent.iter().map(|&d| d as f64).sum();
        Ok(sum / recent.len() as f64)
    }

    fn name(&self) -> &'static str {
        "short-average"
    }
}

// =========================================================================
// 2. Seasonal Extrapolation
// =========================================================================

/// Additive trend plus yearly Fourier seasonality, fitted by ridge least
/// squares and extrapolated `periods` days past the last observation.
///
/// Day 0 is the first history entry. Values are scaled by their maximum
/// before fitting and the trend runs over `t = day / (n - 1)`, so the
/// penalties are independent of the demand level and history length.
///
/// Returns the SUM of the extrapolated values: the expected demand over the
/// pipeline's lookahead window.
#[derive(Debug, Clone)]
pub struct SeasonalExtrapolation {
    periods: usize,
    fourier_order: usize,
    trend_penalty: f64,
    seasonal_penalty: f64,
}

impl SeasonalExtrapolation {
    pub fn new(periods: usize) -> Self {
        Self {
            periods,
            fourier_order: 10,
            trend_penalty: 0.01,
            seasonal_penalty: 1.0,
        }
    }

    pub fn with_fourier_order(mut self, order: usize) -> Self {
        self.fourier_order = order;
        self
    }

    pub fn with_penalties(mut self, trend: f64, seasonal: f64) -> Self {
        self.trend_penalty = trend;
        self.seasonal_penalty = seasonal;
        self
    }

    fn features(&self, day: usize, trend_span: f64) -> Vec<f64> {
        let mut row = Vec::with_capacity(2 + 2 * self.fourier_order);
        row.push(1.0);
        row.push(day as f64 / trend_span);
        row.extend(fourier_terms(day as f64, self.fourier_order));
        row
    }
}

impl ForecastStrategy for SeasonalExtrapolation {
    fn forecast(&self, history: &[u32]) -> Result<f64, ForecastError> {
        if history.is_empty() {
            return Err(ForecastError::EmptyHistory);
        }
        let scale = history.iter().copied().max().unwrap_or(0) as f64;
        if scale == 0.0 || history.len() < 2 {
            return Err(ForecastError::DegenerateHistory);
        }

        let trend_span = (history.len() - 1) as f64;
        let rows: Vec<Vec<f64>> = (0..history.len())
            .map(|day| self.features(day, trend_span))
            .collect();
        let targets: Vec<f64> = history.iter().map(|&d| d as f64 / scale).collect();

        let mut penalties = vec![self.seasonal_penalty; 2 + 2 * self.fourier_order];
        penalties[0] = 0.0;
        penalties[1] = self.trend_penalty;

        let beta = ridge_least_squares(&rows, &targets, &penalties)?;

        let total: f64 = (history.len()..history.len() + self.periods)
            .map(|day| {
                let row = self.features(day, trend_span);
                row.iter().zip(&beta).map(|(x, b)| x * b).sum::<f64>() * scale
            })
            .sum();

        if !total.is_finite() {
            return Err(ForecastError::NonFinite);
        }
        Ok(total)
    }

    fn name(&self) -> &'static str {
        "seasonal"
    }
}

// =========================================================================
// 3. Two-Tier Forecaster
// =========================================================================

/// Picks the short average below `threshold` history entries and the
/// seasonal model from there on, falling back to the short average whenever
/// the seasonal fit fails.
#[derive(Debug)]
pub struct TwoTierForecaster {
    short: Box<dyn ForecastStrategy>,
    seasonal: Box<dyn ForecastStrategy>,
    threshold: usize,
}

impl TwoTierForecaster {
    pub fn new(
        short: Box<dyn ForecastStrategy>,
        seasonal: Box<dyn ForecastStrategy>,
        threshold: usize,
    ) -> Self {
        Self {
            short,
            seasonal,
            threshold,
        }
    }

    pub fn from_config(config: &EnvConfig) -> Self {
        Self::new(
            Box::new(ShortHistoryAverage::new(config.short_window)),
            Box::new(SeasonalExtrapolation::new(config.forecast_periods)),
            config.forecast_threshold,
        )
    }

    /// Forecast published to the simulator, never negative.
    /// An empty history forecasts zero.
    pub fn forecast_or_fallback(&self, history: &[u32]) -> f64 {
        let raw = if history.len() < self.threshold {
            self.short.forecast(history)
        } else {
            self.seasonal.forecast(history).or_else(|err| {
                warn!(
                    strategy = self.seasonal.name(),
                    history_len = history.len(),
                    error = %err,
                    "seasonal fit failed, falling back to {}",
                    self.short.name()
                );
                self.short.forecast(history)
            })
        };
        raw.unwrap_or(0.0).max(0.0)
    }
}

impl ForecastStrategy for TwoTierForecaster {
    fn forecast(&self, history: &[u32]) -> Result<f64, ForecastError> {
        Ok(self.forecast_or_fallback(history))
    }

    fn name(&self) -> &'static str {
        "two-tier"
    }
}
