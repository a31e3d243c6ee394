//! Glicko-2 rating system
//!
//! This module provides the scale conversion, the update engine, team
//! composites and the configured calculator built on top of them.

pub mod calculator;
pub mod composite;
pub mod glicko2;
pub mod scale;

// Re-export commonly used types
pub use calculator::{Glicko2RatingCalculator, RatingCalculator};
pub use composite::{composite, update_team};
pub use glicko2::{update, update_with, VolatilitySolver};
pub use scale::{convert_to_external, convert_to_internal, ExternalRating};
