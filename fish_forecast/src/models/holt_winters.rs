//! Holt-Winters additive method (triple exponential smoothing)

use crate::config::OptimizerConfig;
use crate::error::{ForecastError, Result};
use crate::models::{ensure_finite, ForecastModel, SmoothingParameters, TrainedForecastModel};
use crate::utils::nelder_mead;
use statrs::statistics::Statistics;
use tracing::{debug, warn};

const PARAM_BOUNDS: (f64, f64) = (1e-4, 1.0 - 1e-4);
const INITIAL_PARAMS: [f64; 3] = [0.3, 0.1, 0.1];

/// Holt-Winters model with additive trend and additive seasonality.
///
/// - Level: `l_t = α(y_t - s_{t-m}) + (1-α)(l_{t-1} + b_{t-1})`
/// - Trend: `b_t = β(l_t - l_{t-1}) + (1-β) b_{t-1}`
/// - Seasonal: `s_t = γ(y_t - l_t) + (1-γ) s_{t-m}`
/// - Forecast: `ŷ_{t+h} = l_t + h b_t + s_{t+h-m(k+1)}`
#[derive(Debug, Clone)]
pub struct HoltWinters {
    name: String,
    season_length: usize,
    params: Option<[f64; 3]>,
    optimizer: OptimizerConfig,
}

/// Trained Holt-Winters model
#[derive(Debug, Clone)]
pub struct TrainedHoltWinters {
    name: String,
    alpha: f64,
    beta: f64,
    gamma: f64,
    level: f64,
    trend: f64,
    /// Latest seasonal index per phase, indexed by `t % season_length`
    seasonals: Vec<f64>,
    /// Number of observations the model was trained on
    observations: usize,
    sse: f64,
}

impl HoltWinters {
    /// Model whose parameters are estimated from the data
    pub fn optimized(season_length: usize, optimizer: OptimizerConfig) -> Result<Self> {
        Self::validate_season(season_length)?;

        Ok(Self {
            name: format!("Holt-Winters additive (m={}, optimized)", season_length),
            season_length,
            params: None,
            optimizer,
        })
    }

    /// Model with fixed smoothing parameters
    pub fn new(season_length: usize, alpha: f64, beta: f64, gamma: f64) -> Result<Self> {
        Self::validate_season(season_length)?;
        for value in [alpha, beta, gamma] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ForecastError::InvalidParameter(
                    "Smoothing parameters must be between 0 and 1".to_string(),
                ));
            }
        }

        Ok(Self {
            name: format!(
                "Holt-Winters additive (m={}, alpha={}, beta={}, gamma={})",
                season_length, alpha, beta, gamma
            ),
            season_length,
            params: Some([alpha, beta, gamma]),
            optimizer: OptimizerConfig::default(),
        })
    }

    fn validate_season(season_length: usize) -> Result<()> {
        if season_length < 2 {
            return Err(ForecastError::InvalidParameter(
                "Season length must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}

/// Initial level, trend and seasonal indices
fn initial_state(values: &[f64], m: usize) -> (f64, f64, Vec<f64>) {
    let level = values[..m].iter().mean();
    let trend = if values.len() >= 2 * m {
        (values[m..2 * m].iter().mean() - level) / m as f64
    } else {
        0.0
    };
    let seasonals = values[..m].iter().map(|y| y - level).collect();

    (level, trend, seasonals)
}

struct Smoothed {
    level: f64,
    trend: f64,
    seasonals: Vec<f64>,
    sse: f64,
}

fn smooth(values: &[f64], m: usize, alpha: f64, beta: f64, gamma: f64) -> Smoothed {
    let (mut level, mut trend, mut seasonals) = initial_state(values, m);
    let mut sse = 0.0;

    for (t, &y) in values.iter().enumerate() {
        let phase = t % m;
        let error = y - (level + trend + seasonals[phase]);
        sse += error * error;

        let prev_level = level;
        level = alpha * (y - seasonals[phase]) + (1.0 - alpha) * (level + trend);
        trend = beta * (level - prev_level) + (1.0 - beta) * trend;
        seasonals[phase] = gamma * (y - level) + (1.0 - gamma) * seasonals[phase];
    }

    Smoothed {
        level,
        trend,
        seasonals,
        sse,
    }
}

impl ForecastModel for HoltWinters {
    type Trained = TrainedHoltWinters;

    fn train(&self, values: &[f64]) -> Result<Self::Trained> {
        let m = self.season_length;
        if values.len() < m {
            return Err(ForecastError::InsufficientData(format!(
                "seasonal model needs at least {} observations, got {}",
                m,
                values.len()
            )));
        }

        let [alpha, beta, gamma] = match self.params {
            Some(params) => params,
            None => {
                let result = nelder_mead(
                    |p| smooth(values, m, p[0], p[1], p[2]).sse,
                    &INITIAL_PARAMS,
                    &[PARAM_BOUNDS; 3],
                    &self.optimizer,
                );
                if !result.converged {
                    warn!(
                        iterations = result.iterations,
                        "Holt-Winters parameter search stopped before converging"
                    );
                }
                [result.point[0], result.point[1], result.point[2]]
            }
        };

        let fit = smooth(values, m, alpha, beta, gamma);
        ensure_finite(&self.name, &[fit.level, fit.trend, fit.sse])?;
        ensure_finite(&self.name, &fit.seasonals)?;
        debug!(
            alpha,
            beta,
            gamma,
            level = fit.level,
            trend = fit.trend,
            sse = fit.sse,
            "fitted Holt-Winters model"
        );

        Ok(TrainedHoltWinters {
            name: self.name.clone(),
            alpha,
            beta,
            gamma,
            level: fit.level,
            trend: fit.trend,
            seasonals: fit.seasonals,
            observations: values.len(),
            sse: fit.sse,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedHoltWinters {
    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn trend(&self) -> f64 {
        self.trend
    }

    pub fn sse(&self) -> f64 {
        self.sse
    }

    pub fn season_length(&self) -> usize {
        self.seasonals.len()
    }
}

impl TrainedForecastModel for TrainedHoltWinters {
    fn forecast(&self, horizon: usize) -> Result<Vec<f64>> {
        let m = self.seasonals.len();
        Ok((1..=horizon)
            .map(|h| {
                let phase = (self.observations + h - 1) % m;
                self.level + h as f64 * self.trend + self.seasonals[phase]
            })
            .collect())
    }

    fn parameters(&self) -> SmoothingParameters {
        SmoothingParameters {
            alpha: self.alpha,
            beta: self.beta,
            gamma: Some(self.gamma),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const PATTERN: [f64; 4] = [10.0, 14.0, 8.0, 12.0];

    fn seasonal_series(cycles: usize) -> Vec<f64> {
        (0..cycles * PATTERN.len())
            .map(|t| PATTERN[t % PATTERN.len()] + 0.5 * t as f64)
            .collect()
    }

    #[test]
    fn test_initial_state_two_seasons() {
        let values = seasonal_series(2);
        let (level, trend, seasonals) = initial_state(&values, 4);

        // First season: 10, 14.5, 9, 13.5 -> mean 11.75
        assert_abs_diff_eq!(level, 11.75, epsilon = 1e-12);
        // Second season is shifted up by 2.0 over 4 steps
        assert_abs_diff_eq!(trend, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(seasonals[0], -1.75, epsilon = 1e-12);
        assert_abs_diff_eq!(seasonals.iter().sum::<f64>(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_initial_state_single_season_has_no_trend() {
        let (_, trend, seasonals) = initial_state(&PATTERN, 4);
        assert_eq!(trend, 0.0);
        assert_eq!(seasonals.len(), 4);
    }

    #[test]
    fn test_tracks_seasonal_pattern() {
        let values = seasonal_series(4);
        let trained = HoltWinters::optimized(4, OptimizerConfig::default())
            .unwrap()
            .train(&values)
            .unwrap();

        let forecast = trained.forecast(4).unwrap();
        let n = values.len();
        for (h, value) in forecast.iter().enumerate() {
            let t = n + h;
            let expected = PATTERN[t % 4] + 0.5 * t as f64;
            assert_abs_diff_eq!(*value, expected, epsilon = 0.5);
        }
    }

    #[test]
    fn test_exactly_one_season() {
        let trained = HoltWinters::optimized(4, OptimizerConfig::default())
            .unwrap()
            .train(&PATTERN)
            .unwrap();
        let forecast = trained.forecast(6).unwrap();

        assert_eq!(forecast.len(), 6);
        assert!(forecast.iter().all(|v| v.is_finite()));
        assert_eq!(trained.season_length(), 4);
        assert!(trained.parameters().gamma.is_some());
    }

    #[test]
    fn test_too_short_for_season() {
        let model = HoltWinters::optimized(12, OptimizerConfig::default()).unwrap();
        let result = model.train(&[1.0; 11]);
        assert!(matches!(result, Err(ForecastError::InsufficientData(_))));
    }

    #[test]
    fn test_parameter_validation() {
        assert!(HoltWinters::optimized(1, OptimizerConfig::default()).is_err());
        assert!(HoltWinters::new(12, 0.5, 1.2, 0.1).is_err());
        assert!(HoltWinters::new(12, 0.5, 0.1, 0.1).is_ok());
    }
}
