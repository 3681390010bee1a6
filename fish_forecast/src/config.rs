//! Forecast engine configuration

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for the Nelder-Mead search over smoothing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Maximum number of simplex iterations
    pub max_iter: usize,
    /// Convergence tolerance on the objective spread across the simplex
    pub tolerance: f64,
    /// Initial simplex step size
    pub initial_step: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            initial_step: 0.05,
        }
    }
}

/// Configuration for [`crate::ForecastEngine`].
///
/// The defaults choose the seasonal model from twelve observations on, cap
/// the horizon at two years and use a feed conversion ratio of 1.5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Series length from which the seasonal model is used
    pub seasonal_threshold: usize,
    /// Length of one seasonal cycle, in months
    pub season_length: usize,
    /// Largest accepted forecast horizon
    pub max_horizon: usize,
    /// Kilograms of feed per kilogram of projected production
    pub feed_conversion_ratio: f64,
    pub optimizer: OptimizerConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            seasonal_threshold: 12,
            season_length: 12,
            max_horizon: 24,
            feed_conversion_ratio: 1.5,
            optimizer: OptimizerConfig::default(),
        }
    }
}

impl ForecastConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check that the configuration describes a usable engine
    pub fn validate(&self) -> Result<()> {
        if self.season_length < 2 {
            return Err(ForecastError::InvalidParameter(format!(
                "season_length must be at least 2, got {}",
                self.season_length
            )));
        }
        // The seasonal model needs one full cycle to estimate its indices
        if self.seasonal_threshold < self.season_length {
            return Err(ForecastError::InvalidParameter(format!(
                "seasonal_threshold ({}) must not be below season_length ({})",
                self.seasonal_threshold, self.season_length
            )));
        }
        if self.max_horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "max_horizon must be at least 1".to_string(),
            ));
        }
        if !self.feed_conversion_ratio.is_finite() || self.feed_conversion_ratio < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "feed_conversion_ratio must be a non-negative number, got {}",
                self.feed_conversion_ratio
            )));
        }
        if self.optimizer.max_iter == 0 {
            return Err(ForecastError::InvalidParameter(
                "optimizer.max_iter must be at least 1".to_string(),
            ));
        }
        if !(self.optimizer.tolerance > 0.0) || !(self.optimizer.initial_step > 0.0) {
            return Err(ForecastError::InvalidParameter(
                "optimizer tolerance and initial_step must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
