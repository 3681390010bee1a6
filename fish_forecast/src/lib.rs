//! # Fish Forecast
//!
//! Short-horizon forecasting of monthly fish production for an aquaponics
//! setup, with feed and revenue projections for the coming month.
//!
//! ## Features
//!
//! - Monthly production series keyed by calendar month, one entry per month
//! - Automatic model choice: Holt's linear trend for short series,
//!   Holt-Winters additive seasonality once a full year of data exists
//! - Smoothing parameters fitted by Nelder-Mead on the one-step-ahead error
//! - Feed requirement, revenue and a production outlook for the first
//!   forecast month
//!
//! ## Quick Start
//!
//! ```rust
//! use fish_forecast::{ForecastEngine, ModelKind, PeriodKey, ProductionSeries};
//!
//! let mut series = ProductionSeries::new();
//! series.append(PeriodKey::parse("January", 2024)?, 10.0)?;
//! series.append(PeriodKey::parse("February", 2024)?, 12.0)?;
//! series.append(PeriodKey::parse("March", 2024)?, 11.0)?;
//!
//! let engine = ForecastEngine::default();
//! let projection = engine.project(&series, 2, 20_000.0)?;
//!
//! assert_eq!(projection.forecast.model(), ModelKind::Trend);
//! assert_eq!(projection.forecast.points()[0].period.to_string(), "Apr 2024");
//! # Ok::<(), fish_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod outlook;
pub mod period;
pub mod utils;

// Re-export commonly used types
pub use crate::config::{ForecastConfig, OptimizerConfig};
pub use crate::data::{ObservedPoint, ProductionSeries};
pub use crate::engine::{
    derived_metrics, DerivedMetrics, ForecastEngine, ForecastPoint, ForecastResult,
    ProductionProjection,
};
pub use crate::error::{ForecastError, Result};
pub use crate::models::{
    FittedModel, ForecastModel, ForecastModelSelector, ModelKind, SmoothingParameters,
    TrainedForecastModel,
};
pub use crate::outlook::{ProductionLevel, ProductionOutlook, RevenueLevel};
pub use crate::period::PeriodKey;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
