//! # Aquaponics
//!
//! Calculator for a small aquaponics setup. It bundles two libraries:
//!
//! - [`forecast`] (`fish_forecast`): monthly fish production forecasting
//!   with feed and revenue projections
//! - [`harvest`] (`harvest_math`): harvest, feed and start-up cost estimates
//!   for one rearing cycle
//!
//! ## Example
//!
//! ```
//! use aquaponics_workspace::forecast::{ForecastEngine, PeriodKey, ProductionSeries};
//! use aquaponics_workspace::harvest::{estimate, HarvestInput, RackLayout};
//!
//! let mut series = ProductionSeries::new();
//! series.append(PeriodKey::new(11, 2024)?, 18.0)?;
//! series.append(PeriodKey::new(12, 2024)?, 21.0)?;
//!
//! let forecast = ForecastEngine::default().forecast(&series, 1)?;
//! assert_eq!(forecast.points()[0].period, PeriodKey::new(1, 2025)?);
//!
//! let input = HarvestInput {
//!     fingerling_count: 100,
//!     initial_weight_g: 5.0,
//!     final_weight_g: 500.0,
//!     plant_count: 120,
//!     rearing_days: 60,
//!     fingerling_price: 1500.0,
//!     plant_price: 2000.0,
//! };
//! let harvest = estimate(&RackLayout::default(), &input).unwrap();
//! assert_eq!(harvest.harvest_kg, 50.0);
//! # Ok::<(), aquaponics_workspace::forecast::ForecastError>(())
//! ```

/// Production forecasting, re-exported from `fish_forecast`
#[cfg(feature = "forecasting")]
pub use fish_forecast as forecast;

/// Harvest estimates, re-exported from `harvest_math`
#[cfg(feature = "harvest")]
pub use harvest_math as harvest;
