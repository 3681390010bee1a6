//! Monthly production series handling for forecasting

use crate::error::{ForecastError, Result};
use crate::period::PeriodKey;
use serde::{Deserialize, Serialize};

/// A single month's recorded production
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservedPoint {
    /// Month the production was recorded for
    pub period: PeriodKey,
    /// Harvested fish mass in kilograms
    pub production_kg: f64,
}

/// Append-only store of monthly production, unique by period.
///
/// Observations are kept in insertion order; chronological order is produced
/// on read by [`ProductionSeries::ordered_snapshot`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductionSeries {
    points: Vec<ObservedPoint>,
}

impl ProductionSeries {
    /// Create an empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Record production for a period.
    ///
    /// Rejects negative or non-finite production and periods already present.
    /// On error the series is left untouched.
    pub fn append(&mut self, period: PeriodKey, production_kg: f64) -> Result<()> {
        if !production_kg.is_finite() || production_kg < 0.0 {
            return Err(ForecastError::NegativeProduction(production_kg));
        }
        if self.contains(&period) {
            return Err(ForecastError::DuplicatePeriod(period));
        }

        self.points.push(ObservedPoint {
            period,
            production_kg,
        });

        Ok(())
    }

    /// Whether the series already holds an observation for `period`
    pub fn contains(&self, period: &PeriodKey) -> bool {
        self.points.iter().any(|p| p.period == *period)
    }

    /// All observations sorted by period, oldest first
    pub fn ordered_snapshot(&self) -> Vec<ObservedPoint> {
        let mut snapshot = self.points.clone();
        snapshot.sort_by_key(|p| p.period);
        snapshot
    }

    /// Observations in the order they were appended
    pub fn points(&self) -> &[ObservedPoint] {
        &self.points
    }

    /// Number of observations
    pub fn size(&self) -> usize {
        self.points.len()
    }

    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent period in the series, if any
    pub fn last_period(&self) -> Option<PeriodKey> {
        self.points.iter().map(|p| p.period).max()
    }
}

/// Production values of a chronologically ordered snapshot
pub fn production_values(snapshot: &[ObservedPoint]) -> Vec<f64> {
    snapshot.iter().map(|p| p.production_kg).collect()
}
