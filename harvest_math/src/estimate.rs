//! Harvest estimate for a single rearing cycle
//!
//! The rack is a stack of tiers, each with a row of holes. Every hole holds
//! one drum of water and up to `max_plants_per_hole` vegetables.

use crate::{HarvestError, Result};
use serde::{Deserialize, Serialize};

/// Feed mass needed per unit of fish mass
pub const FEED_CONVERSION_RATIO: f64 = 1.5;

/// Harvest yield per litre below which the cycle is rated low
const LOW_YIELD_PER_LITRE: f64 = 0.05;

/// Planting efficiency below which the rack is considered under-used
const NEAR_CAPACITY_EFFICIENCY: f64 = 0.7;

/// Physical layout of the rack
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RackLayout {
    /// Number of tiers in the rack
    pub tiers: u32,
    /// Holes per tier
    pub holes_per_tier: u32,
    /// Vegetables each hole can support
    pub max_plants_per_hole: u32,
    /// Water volume of the drum under each hole
    pub litres_per_drum: f64,
}

impl Default for RackLayout {
    fn default() -> Self {
        Self {
            tiers: 3,
            holes_per_tier: 5,
            max_plants_per_hole: 10,
            litres_per_drum: 200.0,
        }
    }
}

impl RackLayout {
    /// Total number of holes across all tiers
    pub fn total_holes(&self) -> Result<u32> {
        self.tiers
            .checked_mul(self.holes_per_tier)
            .ok_or_else(|| oversized("holes", self.tiers, self.holes_per_tier))
    }

    /// Largest number of vegetables the rack can hold
    pub fn max_plants(&self) -> Result<u32> {
        let holes = self.total_holes()?;
        holes
            .checked_mul(self.max_plants_per_hole)
            .ok_or_else(|| oversized("plants", holes, self.max_plants_per_hole))
    }

    /// Total water volume in litres
    pub fn total_volume_litres(&self) -> Result<f64> {
        Ok(self.total_holes()? as f64 * self.litres_per_drum)
    }

    fn validate(&self) -> Result<()> {
        if self.max_plants()? == 0 {
            return Err(HarvestError::InvalidInput(
                "Rack must have at least one hole and room for one plant".to_string(),
            ));
        }
        if !self.litres_per_drum.is_finite() || self.litres_per_drum <= 0.0 {
            return Err(HarvestError::InvalidInput(
                "Drum volume must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn oversized(what: &str, lhs: u32, rhs: u32) -> HarvestError {
    HarvestError::InvalidInput(format!(
        "Rack {} count {} x {} does not fit in 32 bits",
        what, lhs, rhs
    ))
}

/// Inputs for one rearing cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarvestInput {
    /// Number of fingerlings stocked
    pub fingerling_count: u32,
    /// Weight of one fingerling at stocking, in grams
    pub initial_weight_g: f64,
    /// Expected weight of one fish at harvest, in grams
    pub final_weight_g: f64,
    /// Vegetables planted across the rack
    pub plant_count: u32,
    /// Length of the rearing cycle in days
    pub rearing_days: u32,
    /// Price of one fingerling
    pub fingerling_price: f64,
    /// Price of one vegetable seedling
    pub plant_price: f64,
}

impl HarvestInput {
    fn validate(&self, layout: &RackLayout) -> Result<()> {
        if self.fingerling_count == 0 {
            return Err(HarvestError::InvalidInput(
                "At least one fingerling is required".to_string(),
            ));
        }
        if self.plant_count == 0 {
            return Err(HarvestError::InvalidInput(
                "At least one plant is required".to_string(),
            ));
        }
        if self.rearing_days == 0 {
            return Err(HarvestError::InvalidInput(
                "Rearing period must be at least one day".to_string(),
            ));
        }

        let non_negative = [
            ("initial weight", self.initial_weight_g),
            ("final weight", self.final_weight_g),
            ("fingerling price", self.fingerling_price),
            ("plant price", self.plant_price),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(HarvestError::InvalidInput(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let capacity = layout.max_plants()?;
        if self.plant_count > capacity {
            return Err(HarvestError::CapacityExceeded {
                requested: self.plant_count,
                capacity,
            });
        }

        Ok(())
    }
}

/// Rating of harvested mass per litre of water
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YieldRating {
    /// Stocking density or feed quality should be reviewed
    Low,
    Adequate,
}

/// Rating of how much of the rack's planting capacity is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlantingRating {
    /// Room left for more plants to take up nutrients
    BelowCapacity,
    NearCapacity,
}

/// Outcome of a harvest estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarvestEstimate {
    pub harvest_kg: f64,
    pub feed_kg: f64,
    pub fingerling_cost: f64,
    pub plant_cost: f64,
    pub total_cost: f64,
    /// Harvested kilograms per litre of water in the rack
    pub yield_per_litre: f64,
    /// Share of the rack's plant capacity in use, between 0 and 1
    pub planting_efficiency: f64,
    pub rearing_days: u32,
}

impl HarvestEstimate {
    pub fn yield_rating(&self) -> YieldRating {
        if self.yield_per_litre < LOW_YIELD_PER_LITRE {
            YieldRating::Low
        } else {
            YieldRating::Adequate
        }
    }

    pub fn planting_rating(&self) -> PlantingRating {
        if self.planting_efficiency < NEAR_CAPACITY_EFFICIENCY {
            PlantingRating::BelowCapacity
        } else {
            PlantingRating::NearCapacity
        }
    }
}

/// Estimate harvest mass, feed, start-up cost and rack efficiency
pub fn estimate(layout: &RackLayout, input: &HarvestInput) -> Result<HarvestEstimate> {
    layout.validate()?;
    input.validate(layout)?;

    let fish = input.fingerling_count as f64;
    let harvest_kg = fish * input.final_weight_g / 1000.0;
    let feed_kg = fish * input.final_weight_g * FEED_CONVERSION_RATIO / 1000.0;

    let fingerling_cost = fish * input.fingerling_price;
    let plant_cost = input.plant_count as f64 * input.plant_price;
    let volume = layout.total_volume_litres()?;
    let capacity = layout.max_plants()?;

    Ok(HarvestEstimate {
        harvest_kg,
        feed_kg,
        fingerling_cost,
        plant_cost,
        total_cost: fingerling_cost + plant_cost,
        yield_per_litre: harvest_kg / volume,
        planting_efficiency: input.plant_count as f64 / capacity as f64,
        rearing_days: input.rearing_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn sample_input() -> HarvestInput {
        HarvestInput {
            fingerling_count: 100,
            initial_weight_g: 5.0,
            final_weight_g: 500.0,
            plant_count: 120,
            rearing_days: 60,
            fingerling_price: 1500.0,
            plant_price: 2000.0,
        }
    }

    #[test]
    fn test_default_layout() {
        let layout = RackLayout::default();
        assert_eq!(layout.total_holes().unwrap(), 15);
        assert_eq!(layout.max_plants().unwrap(), 150);
        assert_relative_eq!(layout.total_volume_litres().unwrap(), 3000.0);
    }

    #[test]
    fn test_estimate() {
        let result = estimate(&RackLayout::default(), &sample_input()).unwrap();

        assert_relative_eq!(result.harvest_kg, 50.0);
        assert_relative_eq!(result.feed_kg, 75.0);
        assert_relative_eq!(result.fingerling_cost, 150_000.0);
        assert_relative_eq!(result.plant_cost, 240_000.0);
        assert_relative_eq!(result.total_cost, 390_000.0);
        assert_relative_eq!(result.yield_per_litre, 50.0 / 3000.0);
        assert_relative_eq!(result.planting_efficiency, 0.8);
        assert_eq!(result.rearing_days, 60);

        // 0.0167 kg/l is under the 0.05 line
        assert_eq!(result.yield_rating(), YieldRating::Low);
        assert_eq!(result.planting_rating(), PlantingRating::NearCapacity);
    }

    #[test]
    fn test_dense_stocking_rates_adequate() {
        let input = HarvestInput {
            fingerling_count: 400,
            plant_count: 60,
            ..sample_input()
        };
        let result = estimate(&RackLayout::default(), &input).unwrap();

        // 400 * 0.5 kg / 3000 l
        assert_relative_eq!(result.yield_per_litre, 200.0 / 3000.0);
        assert_eq!(result.yield_rating(), YieldRating::Adequate);
        assert_eq!(result.planting_rating(), PlantingRating::BelowCapacity);
    }

    #[test]
    fn test_capacity_exceeded() {
        let input = HarvestInput {
            plant_count: 151,
            ..sample_input()
        };
        let err = estimate(&RackLayout::default(), &input).unwrap_err();
        assert_eq!(
            err,
            HarvestError::CapacityExceeded {
                requested: 151,
                capacity: 150
            }
        );
    }

    #[rstest]
    #[case::no_fish(HarvestInput { fingerling_count: 0, ..sample_input() })]
    #[case::no_plants(HarvestInput { plant_count: 0, ..sample_input() })]
    #[case::no_days(HarvestInput { rearing_days: 0, ..sample_input() })]
    #[case::negative_weight(HarvestInput { final_weight_g: -1.0, ..sample_input() })]
    #[case::negative_price(HarvestInput { plant_price: -100.0, ..sample_input() })]
    #[case::nan_weight(HarvestInput { initial_weight_g: f64::NAN, ..sample_input() })]
    fn test_invalid_input(#[case] input: HarvestInput) {
        let result = estimate(&RackLayout::default(), &input);
        assert!(matches!(result, Err(HarvestError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_layout_rejected() {
        let layout = RackLayout {
            tiers: 0,
            ..RackLayout::default()
        };
        assert!(estimate(&layout, &sample_input()).is_err());
    }

    #[rstest]
    #[case::holes(RackLayout { tiers: 100_000, holes_per_tier: 100_000, ..RackLayout::default() })]
    #[case::plants(RackLayout { tiers: 1_000, holes_per_tier: 1_000, max_plants_per_hole: 10_000, ..RackLayout::default() })]
    fn test_oversized_layout_rejected(#[case] layout: RackLayout) {
        assert!(matches!(layout.max_plants(), Err(HarvestError::InvalidInput(_))));
        assert!(matches!(
            estimate(&layout, &sample_input()),
            Err(HarvestError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_largest_layout_fits() {
        let layout = RackLayout {
            tiers: 65_535,
            holes_per_tier: 65_537,
            max_plants_per_hole: 1,
            ..RackLayout::default()
        };
        assert_eq!(layout.max_plants().unwrap(), u32::MAX);
        assert!(estimate(&layout, &sample_input()).is_ok());
    }
}
