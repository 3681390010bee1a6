//! Forecast orchestration: model selection, projection and derived economics

use crate::config::ForecastConfig;
use crate::data::ProductionSeries;
use crate::error::{ForecastError, Result};
use crate::models::{ForecastModelSelector, ModelKind, SmoothingParameters, TrainedForecastModel};
use crate::outlook::ProductionOutlook;
use crate::period::PeriodKey;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One forecast month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub period: PeriodKey,
    /// Projected production in kilograms, never negative
    pub production_kg: f64,
}

/// Result of a forecast operation.
///
/// Always holds exactly `horizon` points, and `horizon` is at least one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawForecastResult")]
pub struct ForecastResult {
    horizon: usize,
    model: ModelKind,
    parameters: SmoothingParameters,
    points: Vec<ForecastPoint>,
}

#[derive(Deserialize)]
struct RawForecastResult {
    horizon: usize,
    model: ModelKind,
    parameters: SmoothingParameters,
    points: Vec<ForecastPoint>,
}

impl TryFrom<RawForecastResult> for ForecastResult {
    type Error = ForecastError;

    fn try_from(raw: RawForecastResult) -> Result<Self> {
        ForecastResult::new(raw.horizon, raw.model, raw.parameters, raw.points)
    }
}

impl ForecastResult {
    /// Create a forecast result, checking that `points` covers the horizon
    pub fn new(
        horizon: usize,
        model: ModelKind,
        parameters: SmoothingParameters,
        points: Vec<ForecastPoint>,
    ) -> Result<Self> {
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "forecast result must cover at least one period".to_string(),
            ));
        }
        if points.len() != horizon {
            return Err(ForecastError::InvalidParameter(format!(
                "points length ({}) doesn't match horizon ({})",
                points.len(),
                horizon
            )));
        }

        Ok(Self {
            horizon,
            model,
            parameters,
            points,
        })
    }

    /// Number of periods forecasted
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Model that produced the forecast
    pub fn model(&self) -> ModelKind {
        self.model
    }

    /// Smoothing parameters of the fitted model
    pub fn parameters(&self) -> SmoothingParameters {
        self.parameters
    }

    /// Forecast months, starting right after the last observation
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Projected production values only
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.production_kg).collect()
    }

    /// First forecast month; every constructor guarantees one exists
    pub fn first(&self) -> &ForecastPoint {
        &self.points[0]
    }
}

/// Feed and revenue derived from one month of projected production
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub feed_kg: f64,
    pub revenue: f64,
}

/// Forecast plus the economics of its first month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionProjection {
    pub forecast: ForecastResult,
    pub metrics: DerivedMetrics,
    pub outlook: ProductionOutlook,
}

/// Fits a fresh model to a production series on every request and projects
/// it forward.
///
/// The engine holds configuration only; no fitted state survives a call.
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    config: ForecastConfig,
    selector: ForecastModelSelector,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        let config = ForecastConfig::default();
        Self {
            selector: ForecastModelSelector::from_config(&config),
            config,
        }
    }
}

impl ForecastEngine {
    /// Create an engine from a validated configuration
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            selector: ForecastModelSelector::from_config(&config),
            config,
        })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast `horizon` months following the last observed month
    pub fn forecast(&self, series: &ProductionSeries, horizon: usize) -> Result<ForecastResult> {
        if horizon == 0 || horizon > self.config.max_horizon {
            return Err(ForecastError::InvalidHorizon {
                requested: horizon,
                max: self.config.max_horizon,
            });
        }

        let snapshot = series.ordered_snapshot();
        let model = self.selector.select_and_fit(&snapshot)?;
        let values = model.forecast(horizon)?;

        let mut period = match snapshot.last() {
            Some(last) => last.period,
            None => {
                return Err(ForecastError::InsufficientData(
                    "cannot forecast from an empty series".to_string(),
                ))
            }
        };

        let mut points = Vec::with_capacity(horizon);
        for value in values {
            if !value.is_finite() {
                return Err(ForecastError::InsufficientData(format!(
                    "{} produced a non-finite forecast",
                    model.name()
                )));
            }
            period = period.succ()?;
            points.push(ForecastPoint {
                period,
                production_kg: value.max(0.0),
            });
        }

        let result = ForecastResult::new(horizon, model.kind(), model.parameters(), points)?;

        info!(
            observations = snapshot.len(),
            horizon,
            model = %result.model(),
            first = %result.first().period,
            "forecast complete"
        );

        Ok(result)
    }

    /// Feed requirement and revenue for one month's production
    pub fn derived_metrics(&self, first_point: f64, unit_price: f64) -> DerivedMetrics {
        derived_metrics_with_ratio(first_point, unit_price, self.config.feed_conversion_ratio)
    }

    /// Forecast, then price and classify the first forecast month
    pub fn project(
        &self,
        series: &ProductionSeries,
        horizon: usize,
        unit_price: f64,
    ) -> Result<ProductionProjection> {
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "unit price must be a non-negative number, got {}",
                unit_price
            )));
        }

        let forecast = self.forecast(series, horizon)?;
        let metrics = self.derived_metrics(forecast.first().production_kg, unit_price);
        let outlook = ProductionOutlook::assess(forecast.first().production_kg, metrics.revenue);

        Ok(ProductionProjection {
            forecast,
            metrics,
            outlook,
        })
    }
}

/// Feed requirement and revenue at the default feed conversion ratio of 1.5
pub fn derived_metrics(first_point: f64, unit_price: f64) -> DerivedMetrics {
    derived_metrics_with_ratio(
        first_point,
        unit_price,
        ForecastConfig::default().feed_conversion_ratio,
    )
}

fn derived_metrics_with_ratio(first_point: f64, unit_price: f64, ratio: f64) -> DerivedMetrics {
    DerivedMetrics {
        feed_kg: first_point * ratio,
        revenue: first_point * unit_price,
    }
}
