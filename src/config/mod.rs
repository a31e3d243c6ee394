//! Configuration management for the rating engine
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values for the Glicko-2 calculator.

pub mod rating;

// Re-export commonly used types
pub use rating::{RatingConfig, TauBounds};
