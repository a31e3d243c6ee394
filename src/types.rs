//! Common types used throughout the rating engine
//!
//! All ratings here live on the internal Glicko-2 scale (centered at zero).
//! Use [`crate::rating::scale`] to move to and from the familiar 1500-centered scale.

use crate::error::{RatingError, Result};
use serde::{Deserialize, Serialize};

/// Default deviation for a new player on the internal scale
pub const DEFAULT_DEVIATION: f64 = 2.0;

/// Default volatility for a new player
pub const DEFAULT_VOLATILITY: f64 = 0.06;

/// Skill estimate for a player/team on the internal scale
///
/// A rating is a plain value: every operation returns a new rating
/// instead of modifying an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Strength estimate, 0.0 is an average new player
    pub value: f64,
    /// Uncertainty in `value` (phi)
    pub deviation: f64,
    /// Expected fluctuation of `value` over time (sigma)
    pub volatility: f64,
}

impl Rating {
    pub const fn new(value: f64, deviation: f64, volatility: f64) -> Self {
        Self {
            value,
            deviation,
            volatility,
        }
    }

    /// Rating for a player with no history
    pub const fn new_player() -> Self {
        Self::new(0.0, DEFAULT_DEVIATION, DEFAULT_VOLATILITY)
    }

    /// Check that all fields are finite and deviation/volatility are positive
    pub fn validate(&self) -> Result<()> {
        if !self.value.is_finite() {
            return Err(RatingError::invalid(format!(
                "rating value must be finite, got {}",
                self.value
            )));
        }
        if !self.deviation.is_finite() || self.deviation <= 0.0 {
            return Err(RatingError::invalid(format!(
                "rating deviation must be finite and positive, got {}",
                self.deviation
            )));
        }
        if !self.volatility.is_finite() || self.volatility <= 0.0 {
            return Err(RatingError::invalid(format!(
                "rating volatility must be finite and positive, got {}",
                self.volatility
            )));
        }
        Ok(())
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::new_player()
    }
}

/// Outcome of a single game from the point of view of the rated player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Score credited to the rated player
    pub fn score(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Draw => 0.5,
            Outcome::Loss => 0.0,
        }
    }

    /// Same game seen from the opponent's side
    pub fn reversed(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Draw => Outcome::Draw,
            Outcome::Loss => Outcome::Win,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "Win"),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::Loss => write!(f, "Loss"),
        }
    }
}

/// One game against a single opponent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub opponent: Rating,
    /// 1.0 win, 0.5 draw, 0.0 loss; any value in [0, 1] is accepted
    pub score: f64,
}

impl GameResult {
    pub fn new(opponent: Rating, score: f64) -> Self {
        Self { opponent, score }
    }

    pub fn from_outcome(opponent: Rating, outcome: Outcome) -> Self {
        Self::new(opponent, outcome.score())
    }

    /// Check the opponent rating and that the score lies in [0, 1]
    pub fn validate(&self) -> Result<()> {
        self.opponent.validate()?;
        if !self.score.is_finite() || !(0.0..=1.0).contains(&self.score) {
            return Err(RatingError::invalid(format!(
                "score must be within [0, 1], got {}",
                self.score
            )));
        }
        Ok(())
    }
}

/// Result of a team against one opposing team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamResult {
    /// Ratings of every member of the opposing team
    pub opponents: Vec<Rating>,
    /// Score the whole team earned against `opponents`
    pub score: f64,
}

impl TeamResult {
    pub fn new(opponents: Vec<Rating>, score: f64) -> Self {
        Self { opponents, score }
    }
}

/// Rating before and after an update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub old_rating: Rating,
    pub new_rating: Rating,
}

impl RatingChange {
    /// Change of the rating value (internal scale)
    pub fn delta(&self) -> f64 {
        self.new_rating.value - self.old_rating.value
    }
}
