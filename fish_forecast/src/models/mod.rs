//! Smoothing models and the policy that chooses between them

use crate::config::{ForecastConfig, OptimizerConfig};
use crate::data::{production_values, ObservedPoint};
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use tracing::debug;

pub mod holt;
pub mod holt_winters;

use holt::{Holt, TrainedHolt};
use holt_winters::{HoltWinters, TrainedHoltWinters};

/// Which smoothing variant produced a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    /// Level and additive trend, no seasonality
    Trend,
    /// Level, additive trend and additive seasonality
    Seasonal,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Trend => write!(f, "Holt linear trend"),
            ModelKind::Seasonal => write!(f, "Holt-Winters additive"),
        }
    }
}

/// Smoothing parameters of a fitted model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingParameters {
    /// Level smoothing
    pub alpha: f64,
    /// Trend smoothing
    pub beta: f64,
    /// Seasonal smoothing, seasonal model only
    pub gamma: Option<f64>,
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Point forecasts for the next `horizon` periods
    fn forecast(&self, horizon: usize) -> Result<Vec<f64>>;

    /// Smoothing parameters the model was fitted with
    fn parameters(&self) -> SmoothingParameters;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a chronologically ordered series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on production values, oldest first
    fn train(&self, values: &[f64]) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// A model fitted to one snapshot of a production series
#[derive(Debug, Clone)]
pub enum FittedModel {
    Trend(TrainedHolt),
    Seasonal(TrainedHoltWinters),
}

impl FittedModel {
    pub fn kind(&self) -> ModelKind {
        match self {
            FittedModel::Trend(_) => ModelKind::Trend,
            FittedModel::Seasonal(_) => ModelKind::Seasonal,
        }
    }
}

impl TrainedForecastModel for FittedModel {
    fn forecast(&self, horizon: usize) -> Result<Vec<f64>> {
        match self {
            FittedModel::Trend(model) => model.forecast(horizon),
            FittedModel::Seasonal(model) => model.forecast(horizon),
        }
    }

    fn parameters(&self) -> SmoothingParameters {
        match self {
            FittedModel::Trend(model) => model.parameters(),
            FittedModel::Seasonal(model) => model.parameters(),
        }
    }

    fn name(&self) -> &str {
        match self {
            FittedModel::Trend(model) => model.name(),
            FittedModel::Seasonal(model) => model.name(),
        }
    }
}

/// Chooses a smoothing model by series length and fits it.
///
/// Series shorter than `seasonal_threshold` get the trend model; longer ones
/// get the seasonal model. The seasonal model is never chosen for fewer than
/// `season_length` points, whatever the threshold says.
#[derive(Debug, Clone)]
pub struct ForecastModelSelector {
    seasonal_threshold: usize,
    season_length: usize,
    optimizer: OptimizerConfig,
}

impl Default for ForecastModelSelector {
    fn default() -> Self {
        Self::from_config(&ForecastConfig::default())
    }
}

impl ForecastModelSelector {
    pub fn from_config(config: &ForecastConfig) -> Self {
        Self {
            seasonal_threshold: config.seasonal_threshold,
            season_length: config.season_length,
            optimizer: config.optimizer,
        }
    }

    /// Model that would be fitted to a series of `len` points
    pub fn kind_for(&self, len: usize) -> ModelKind {
        if len >= self.seasonal_threshold.max(self.season_length) {
            ModelKind::Seasonal
        } else {
            ModelKind::Trend
        }
    }

    /// Fit the model appropriate for the snapshot's length
    pub fn select_and_fit(&self, snapshot: &[ObservedPoint]) -> Result<FittedModel> {
        if snapshot.is_empty() {
            return Err(ForecastError::InsufficientData(
                "cannot forecast from an empty series".to_string(),
            ));
        }

        let values = production_values(snapshot);
        let kind = self.kind_for(values.len());
        debug!(points = values.len(), model = %kind, "selected smoothing model");

        match kind {
            ModelKind::Trend => {
                let model = Holt::optimized(self.optimizer);
                Ok(FittedModel::Trend(model.train(&values)?))
            }
            ModelKind::Seasonal => {
                let model = HoltWinters::optimized(self.season_length, self.optimizer)?;
                Ok(FittedModel::Seasonal(model.train(&values)?))
            }
        }
    }
}

/// Fail when a fit ended in a non-finite state
pub(crate) fn ensure_finite(model: &str, quantities: &[f64]) -> Result<()> {
    if quantities.iter().all(|q| q.is_finite()) {
        Ok(())
    } else {
        Err(ForecastError::InsufficientData(format!(
            "{} fit did not converge to a finite state",
            model
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::PeriodKey;
    use rstest::rstest;

    fn monthly(values: &[f64]) -> Vec<ObservedPoint> {
        let mut period = PeriodKey::new(1, 2024).unwrap();
        values
            .iter()
            .map(|&production_kg| {
                let point = ObservedPoint {
                    period,
                    production_kg,
                };
                period = period.succ().unwrap();
                point
            })
            .collect()
    }

    #[rstest]
    #[case(1, ModelKind::Trend)]
    #[case(11, ModelKind::Trend)]
    #[case(12, ModelKind::Seasonal)]
    #[case(30, ModelKind::Seasonal)]
    fn test_selection_threshold(#[case] len: usize, #[case] expected: ModelKind) {
        let values: Vec<f64> = (0..len).map(|i| 10.0 + (i % 4) as f64).collect();
        let selector = ForecastModelSelector::default();

        assert_eq!(selector.kind_for(len), expected);
        let fitted = selector.select_and_fit(&monthly(&values)).unwrap();
        assert_eq!(fitted.kind(), expected);
    }

    #[test]
    fn test_empty_snapshot() {
        let result = ForecastModelSelector::default().select_and_fit(&[]);
        assert!(matches!(result, Err(ForecastError::InsufficientData(_))));
    }

    #[test]
    fn test_low_threshold_never_goes_seasonal_early() {
        // Bypasses ForecastConfig::validate on purpose
        let selector = ForecastModelSelector {
            seasonal_threshold: 3,
            season_length: 12,
            optimizer: OptimizerConfig::default(),
        };
        assert_eq!(selector.kind_for(11), ModelKind::Trend);
        assert_eq!(selector.kind_for(12), ModelKind::Seasonal);
    }

    #[test]
    fn test_raised_threshold() {
        let config = ForecastConfig {
            seasonal_threshold: 24,
            ..ForecastConfig::default()
        };
        let selector = ForecastModelSelector::from_config(&config);
        assert_eq!(selector.kind_for(23), ModelKind::Trend);
        assert_eq!(selector.kind_for(24), ModelKind::Seasonal);
    }

    #[test]
    fn test_parameters_exposed() {
        let fitted = ForecastModelSelector::default()
            .select_and_fit(&monthly(&[10.0, 12.0, 11.0, 13.0]))
            .unwrap();
        let params = fitted.parameters();

        assert!(params.gamma.is_none());
        assert!((0.0..=1.0).contains(&params.alpha));
        assert!((0.0..=1.0).contains(&params.beta));
        assert!(!fitted.name().is_empty());
    }
}
