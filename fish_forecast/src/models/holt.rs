//! Holt's linear trend method (double exponential smoothing)

use crate::config::OptimizerConfig;
use crate::error::{ForecastError, Result};
use crate::models::{ensure_finite, ForecastModel, SmoothingParameters, TrainedForecastModel};
use crate::utils::nelder_mead;
use tracing::{debug, warn};

const PARAM_BOUNDS: (f64, f64) = (1e-4, 1.0 - 1e-4);
const INITIAL_ALPHA: f64 = 0.5;
const INITIAL_BETA: f64 = 0.1;

/// Holt's linear trend model.
///
/// - Level: `l_t = α y_t + (1-α)(l_{t-1} + b_{t-1})`
/// - Trend: `b_t = β(l_t - l_{t-1}) + (1-β) b_{t-1}`
/// - Forecast: `ŷ_{t+h} = l_t + h b_t`
///
/// Starts from `l_0 = y_0` and `b_0 = y_1 - y_0`. Without fixed parameters,
/// α and β minimise the one-step-ahead squared error.
#[derive(Debug, Clone)]
pub struct Holt {
    name: String,
    alpha: Option<f64>,
    beta: Option<f64>,
    optimizer: OptimizerConfig,
}

/// Trained Holt model
#[derive(Debug, Clone)]
pub struct TrainedHolt {
    name: String,
    alpha: f64,
    beta: f64,
    level: f64,
    trend: f64,
    /// Sum of squared one-step-ahead errors
    sse: f64,
}

impl Holt {
    /// Model whose parameters are estimated from the data
    pub fn optimized(optimizer: OptimizerConfig) -> Self {
        Self {
            name: "Holt linear trend (optimized)".to_string(),
            alpha: None,
            beta: None,
            optimizer,
        }
    }

    /// Model with fixed smoothing parameters
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        for (name, value) in [("Alpha", alpha), ("Beta", beta)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ForecastError::InvalidParameter(format!(
                    "{} must be between 0 and 1",
                    name
                )));
            }
        }

        Ok(Self {
            name: format!("Holt linear trend (alpha={}, beta={})", alpha, beta),
            alpha: Some(alpha),
            beta: Some(beta),
            optimizer: OptimizerConfig::default(),
        })
    }
}

/// Run the recursions and return `(level, trend, sse)`
fn smooth(values: &[f64], alpha: f64, beta: f64) -> (f64, f64, f64) {
    let mut level = values[0];
    let mut trend = if values.len() > 1 {
        values[1] - values[0]
    } else {
        0.0
    };
    let mut sse = 0.0;

    for &y in &values[1..] {
        let error = y - (level + trend);
        sse += error * error;

        let prev_level = level;
        level = alpha * y + (1.0 - alpha) * (level + trend);
        trend = beta * (level - prev_level) + (1.0 - beta) * trend;
    }

    (level, trend, sse)
}

impl ForecastModel for Holt {
    type Trained = TrainedHolt;

    fn train(&self, values: &[f64]) -> Result<Self::Trained> {
        if values.is_empty() {
            return Err(ForecastError::InsufficientData(
                "Empty time series data".to_string(),
            ));
        }

        let (alpha, beta) = match (self.alpha, self.beta) {
            (Some(alpha), Some(beta)) => (alpha, beta),
            // With fewer than three points the error is zero for any α, β
            _ if values.len() < 3 => (INITIAL_ALPHA, INITIAL_BETA),
            _ => {
                let result = nelder_mead(
                    |p| smooth(values, p[0], p[1]).2,
                    &[INITIAL_ALPHA, INITIAL_BETA],
                    &[PARAM_BOUNDS, PARAM_BOUNDS],
                    &self.optimizer,
                );
                if !result.converged {
                    warn!(
                        iterations = result.iterations,
                        "Holt parameter search stopped before converging"
                    );
                }
                (result.point[0], result.point[1])
            }
        };

        let (level, trend, sse) = smooth(values, alpha, beta);
        ensure_finite(&self.name, &[level, trend, sse])?;
        debug!(alpha, beta, level, trend, sse, "fitted Holt model");

        Ok(TrainedHolt {
            name: self.name.clone(),
            alpha,
            beta,
            level,
            trend,
            sse,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedHolt {
    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn trend(&self) -> f64 {
        self.trend
    }

    pub fn sse(&self) -> f64 {
        self.sse
    }
}

impl TrainedForecastModel for TrainedHolt {
    fn forecast(&self, horizon: usize) -> Result<Vec<f64>> {
        Ok((1..=horizon)
            .map(|h| self.level + h as f64 * self.trend)
            .collect())
    }

    fn parameters(&self) -> SmoothingParameters {
        SmoothingParameters {
            alpha: self.alpha,
            beta: self.beta,
            gamma: None,
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

    #[test]
    fn test_fixed_parameters() {
        let model = Holt::new(0.5, 0.5).unwrap();
        let trained = model.train(&[10.0, 20.0, 30.0]).unwrap();

        // A perfect line is tracked exactly whatever the parameters
        assert_abs_diff_eq!(trained.level(), 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(trained.trend(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(trained.sse(), 0.0, epsilon = 1e-9);

        let forecast = trained.forecast(2).unwrap();
        assert_abs_diff_eq!(forecast[0], 40.0, epsilon = 1e-9);
        assert_abs_diff_eq!(forecast[1], 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_recursion_by_hand() {
        // l0 = 10, b0 = 2
        // t=1: err = 12 - 12 = 0, l = 12, b = 0.5*2 + 0.5*2 = 2
        // t=2: err = 11 - 14 = -3, l = 0.5*11 + 0.5*14 = 12.5,
        //      b = 0.5*0.5 + 0.5*2 = 1.25
        let trained = Holt::new(0.5, 0.5).unwrap().train(&[10.0, 12.0, 11.0]).unwrap();
        assert_abs_diff_eq!(trained.level(), 12.5, epsilon = 1e-12);
        assert_abs_diff_eq!(trained.trend(), 1.25, epsilon = 1e-12);
        assert_abs_diff_eq!(trained.sse(), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_point_is_flat() {
        let trained = Holt::optimized(OptimizerConfig::default())
            .train(&[7.5])
            .unwrap();
        assert_eq!(trained.forecast(3).unwrap(), vec![7.5, 7.5, 7.5]);
    }

    #[test]
    fn test_optimized_beats_fixed() {
        let values = [10.0, 12.0, 11.0, 14.0, 13.0, 16.0, 15.0, 18.0];
        let fixed = Holt::new(0.5, 0.1).unwrap().train(&values).unwrap();
        let tuned = Holt::optimized(OptimizerConfig::default())
            .train(&values)
            .unwrap();

        assert!(tuned.sse() <= fixed.sse() + 1e-9);
        let params = tuned.parameters();
        assert!(params.alpha >= PARAM_BOUNDS.0 && params.alpha <= PARAM_BOUNDS.1);
        assert!(params.beta >= PARAM_BOUNDS.0 && params.beta <= PARAM_BOUNDS.1);
    }

    #[test]
    fn test_parameter_validation() {
        assert!(Holt::new(1.5, 0.1).is_err());
        assert!(Holt::new(0.5, -0.1).is_err());
    }

    #[test]
    fn test_empty_data() {
        let result = Holt::optimized(OptimizerConfig::default()).train(&[]);
        assert!(matches!(result, Err(ForecastError::InsufficientData(_))));
    }
}
