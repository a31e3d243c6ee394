//! Parlor Glicko - Glicko-2 rating updates
//!
//! This crate computes new ratings for players after a rating period of
//! games using the Glicko-2 algorithm, with support for team games through
//! composite opponents and conversion to the traditional 1500-centered scale.
//!
//! ```
//! use parlor_glicko::{convert_to_external, convert_to_internal, update, GameResult};
//!
//! let player = convert_to_internal(1500.0, 200.0, 0.06);
//! let results = [
//!     GameResult::new(convert_to_internal(1400.0, 30.0, 0.06), 1.0),
//!     GameResult::new(convert_to_internal(1550.0, 100.0, 0.06), 0.0),
//!     GameResult::new(convert_to_internal(1700.0, 300.0, 0.06), 0.0),
//! ];
//!
//! let updated = convert_to_external(&update(&player, &results, 0.5)?);
//! assert!((updated.rating - 1464.06).abs() < 0.1);
//! # Ok::<(), parlor_glicko::RatingError>(())
//! ```

pub mod config;
pub mod error;
pub mod rating;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use config::RatingConfig;
pub use rating::{
    composite, convert_to_external, convert_to_internal, update, update_team, ExternalRating,
    Glicko2RatingCalculator, RatingCalculator,
};

/// Rating for a player with no history, on the internal scale
pub fn new_player() -> Rating {
    Rating::new_player()
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
