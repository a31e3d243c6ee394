//! Conversion between the internal Glicko-2 scale and the external scale
//!
//! The external scale is the traditional Glicko one where a new player sits
//! at 1500. The conversion is a fixed linear transform and is only applied at
//! the boundary, before and after an update.

use crate::types::Rating;
use serde::{Deserialize, Serialize};

/// Ratio between the external and internal scales
pub const SCALE_FACTOR: f64 = 173.7178;

/// External rating of a brand new player
pub const SCALE_CENTER: f64 = 1500.0;

/// Rating triple on the external (1500-centered) scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExternalRating {
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
}

impl ExternalRating {
    pub const fn new(rating: f64, deviation: f64, volatility: f64) -> Self {
        Self {
            rating,
            deviation,
            volatility,
        }
    }

    /// Interval `rating ± z * deviation`, e.g. `z = 1.96` for 95%
    pub fn confidence_interval(&self, z: f64) -> (f64, f64) {
        (
            self.rating - z * self.deviation,
            self.rating + z * self.deviation,
        )
    }
}

/// Convert an external rating triple to the internal scale
pub fn convert_to_internal(rating: f64, deviation: f64, volatility: f64) -> Rating {
    Rating {
        value: (rating - SCALE_CENTER) / SCALE_FACTOR,
        deviation: deviation / SCALE_FACTOR,
        volatility,
    }
}

/// Convert an internal rating to the external scale
pub fn convert_to_external(rating: &Rating) -> ExternalRating {
    ExternalRating {
        rating: SCALE_FACTOR * rating.value + SCALE_CENTER,
        deviation: SCALE_FACTOR * rating.deviation,
        volatility: rating.volatility,
    }
}

impl From<ExternalRating> for Rating {
    fn from(external: ExternalRating) -> Self {
        convert_to_internal(external.rating, external.deviation, external.volatility)
    }
}

impl From<Rating> for ExternalRating {
    fn from(rating: Rating) -> Self {
        convert_to_external(&rating)
    }
}
