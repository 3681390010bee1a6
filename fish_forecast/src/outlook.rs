//! Rough classification of a projected month for farm planning

use serde::{Deserialize, Serialize};

/// Production below this many kilograms per month is considered low
pub const LOW_PRODUCTION_KG: f64 = 10.0;
/// Production above this many kilograms per month is considered high
pub const HIGH_PRODUCTION_KG: f64 = 50.0;
/// Revenue below this is considered low
pub const LOW_REVENUE: f64 = 200_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductionLevel {
    /// Rearing or feeding should be improved
    Low,
    Stable,
    /// Feed stock and sales should be prepared
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevenueLevel {
    /// Sale price and production costs should be reviewed
    Low,
    Good,
}

/// Production and revenue ratings for one projected month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionOutlook {
    pub production: ProductionLevel,
    pub revenue: RevenueLevel,
}

impl ProductionOutlook {
    pub fn assess(production_kg: f64, revenue: f64) -> Self {
        let production = if production_kg < LOW_PRODUCTION_KG {
            ProductionLevel::Low
        } else if production_kg > HIGH_PRODUCTION_KG {
            ProductionLevel::High
        } else {
            ProductionLevel::Stable
        };

        let revenue = if revenue < LOW_REVENUE {
            RevenueLevel::Low
        } else {
            RevenueLevel::Good
        };

        Self {
            production,
            revenue,
        }
    }
}
