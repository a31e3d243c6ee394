//! Rating calculator trait and the Glicko-2 implementation
//!
//! The calculator wraps the pure update engine with a validated
//! [`RatingConfig`]: it enforces the configured tau range, applies the
//! configured solver settings and provides new-player ratings.

use crate::config::RatingConfig;
use crate::error::{RatingError, Result};
use crate::rating::composite::update_team_with;
use crate::rating::glicko2::{update_with, win_probability};
use crate::types::{GameResult, Outcome, Rating, RatingChange, TeamResult};
use tracing::debug;

/// Trait for calculating rating changes after games
pub trait RatingCalculator: Send + Sync {
    /// Calculate a player's new rating from their results in one rating period
    ///
    /// # Arguments
    /// * `player` - Current rating of the player
    /// * `results` - Games played during the period, possibly none
    fn calculate_new_rating(&self, player: &Rating, results: &[GameResult]) -> Result<Rating>;

    /// Calculate new ratings for every member of a team
    ///
    /// # Returns
    /// Updated ratings in the same order as `team`
    fn calculate_team_ratings(
        &self,
        team: &[Rating],
        results: &[TeamResult],
    ) -> Result<Vec<Rating>>;

    /// Get the initial rating for new players
    fn get_initial_rating(&self) -> Rating;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;

    /// Update configuration from JSON
    fn update_config(&mut self, config: serde_json::Value) -> Result<()>;
}

/// Glicko-2 rating calculator
#[derive(Debug, Clone)]
pub struct Glicko2RatingCalculator {
    config: RatingConfig,
}

impl Glicko2RatingCalculator {
    /// Create a new Glicko-2 rating calculator
    pub fn new(config: RatingConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Current system constant
    pub fn tau(&self) -> f64 {
        self.config.tau
    }

    /// Same as [`RatingCalculator::calculate_new_rating`] with an explicit tau
    ///
    /// The tau still has to fall within the configured bounds.
    pub fn calculate_new_rating_with_tau(
        &self,
        player: &Rating,
        results: &[GameResult],
        tau: f64,
    ) -> Result<Rating> {
        self.config.check_tau(tau)?;
        let new_rating = update_with(player, results, tau, &self.config.solver())?;

        debug!(
            games = results.len(),
            old_value = player.value,
            new_value = new_rating.value,
            new_deviation = new_rating.deviation,
            new_volatility = new_rating.volatility,
            "Calculated Glicko-2 rating"
        );

        Ok(new_rating)
    }

    /// Rate a single game between two players
    ///
    /// `outcome` is from the point of view of `player_one`.
    pub fn rate_game(
        &self,
        player_one: &Rating,
        player_two: &Rating,
        outcome: Outcome,
    ) -> Result<(RatingChange, RatingChange)> {
        let first = self.calculate_new_rating(
            player_one,
            &[GameResult::from_outcome(*player_two, outcome)],
        )?;
        let second = self.calculate_new_rating(
            player_two,
            &[GameResult::from_outcome(*player_one, outcome.reversed())],
        )?;

        Ok((
            RatingChange {
                old_rating: *player_one,
                new_rating: first,
            },
            RatingChange {
                old_rating: *player_two,
                new_rating: second,
            },
        ))
    }

    /// Average probability of `player` beating each of `opponents`
    pub fn calculate_expected_score(&self, player: &Rating, opponents: &[Rating]) -> f64 {
        if opponents.is_empty() {
            return 0.5; // Neutral expectation when no opponents
        }

        let total: f64 = opponents
            .iter()
            .map(|opponent| win_probability(player, opponent))
            .sum();

        total / opponents.len() as f64
    }
}

impl RatingCalculator for Glicko2RatingCalculator {
    fn calculate_new_rating(&self, player: &Rating, results: &[GameResult]) -> Result<Rating> {
        self.calculate_new_rating_with_tau(player, results, self.config.tau)
    }

    fn calculate_team_ratings(
        &self,
        team: &[Rating],
        results: &[TeamResult],
    ) -> Result<Vec<Rating>> {
        self.config.check_tau(self.config.tau)?;
        let new_ratings = update_team_with(team, results, self.config.tau, &self.config.solver())?;

        debug!(
            members = team.len(),
            matches = results.len(),
            "Calculated Glicko-2 team ratings"
        );

        Ok(new_ratings)
    }

    fn get_initial_rating(&self) -> Rating {
        self.config.initial_rating()
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }

    fn update_config(&mut self, config: serde_json::Value) -> Result<()> {
        let new_config: RatingConfig =
            serde_json::from_value(config).map_err(|e| RatingError::ConfigurationError {
                message: format!("Invalid Glicko-2 configuration: {}", e),
            })?;

        new_config.validate()?;
        self.config = new_config;
        Ok(())
    }
}
