//! # Harvest Math
//!
//! Harvest, feed and cost estimates for a tiered aquaponics rack.
//! Every calculation is a pure function of a [`RackLayout`] and a
//! [`HarvestInput`]; nothing is stored between calls.

use thiserror::Error;

pub mod estimate;

pub use estimate::{
    estimate, HarvestEstimate, HarvestInput, PlantingRating, RackLayout, YieldRating,
    FEED_CONVERSION_RATIO,
};

/// Errors that can occur while estimating a harvest
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HarvestError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Capacity exceeded: {requested} plants requested, rack holds at most {capacity}")]
    CapacityExceeded { requested: u32, capacity: u32 },
}

/// Result type for harvest calculations
pub type Result<T> = std::result::Result<T, HarvestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_error_names_both_numbers() {
        let err = HarvestError::CapacityExceeded {
            requested: 200,
            capacity: 150,
        };
        let msg = err.to_string();
        assert!(msg.contains("200"));
        assert!(msg.contains("150"));
    }
}
