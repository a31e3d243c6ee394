//! Glicko-2 update engine
//!
//! Computes a player's new rating from their current rating and a list of
//! game results within one rating period. Everything here works on the
//! internal scale; see [`crate::rating::scale`] for conversions.

use crate::error::{RatingError, Result};
use crate::types::{GameResult, Rating};
use std::f64::consts::PI;
use tracing::{debug, trace};

/// Stop the volatility iteration once the bracket is narrower than this
pub const DEFAULT_CONVERGENCE_TOLERANCE: f64 = 0.000_001;

/// Hard cap on volatility solver iterations
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Results carrying less information than this are treated as saturated
///
/// Keeps `v` below 1e60 so `delta^2` and the solver's bracket stay finite.
pub const MIN_INFORMATION: f64 = 1e-60;

/// Impact function `g(phi)`
///
/// Scales down how much a result against an opponent counts, the more
/// uncertain that opponent's own rating is. `g(0) = 1`.
pub fn impact(deviation: f64) -> f64 {
    1.0 / (1.0 + 3.0 * deviation * deviation / (PI * PI)).sqrt()
}

/// Expected score of a player rated `value` against an opponent
pub fn expected_score(value: f64, opponent_value: f64, opponent_deviation: f64) -> f64 {
    1.0 / (1.0 + (-impact(opponent_deviation) * (value - opponent_value)).exp())
}

/// Probability that `player` beats `opponent`, accounting for both deviations
pub fn win_probability(player: &Rating, opponent: &Rating) -> f64 {
    let combined_deviation =
        (player.deviation * player.deviation + opponent.deviation * opponent.deviation).sqrt();
    1.0 / (1.0 + (-impact(combined_deviation) * (player.value - opponent.value)).exp())
}

/// Estimated variance `v` of the player's rating based only on game outcomes
///
/// Returns `None` when the results carry no usable information: either there
/// are none, or every expected score has saturated at (or next to) 0 or 1.
pub fn estimated_variance(player: &Rating, results: &[GameResult]) -> Option<f64> {
    let information = result_information(player, results);
    if information >= MIN_INFORMATION {
        Some(1.0 / information)
    } else {
        None
    }
}

/// Sum of `g^2 * E * (1 - E)`, the reciprocal of `v`
fn result_information(player: &Rating, results: &[GameResult]) -> f64 {
    results
        .iter()
        .map(|result| {
            let g = impact(result.opponent.deviation);
            let e = expected_score(
                player.value,
                result.opponent.value,
                result.opponent.deviation,
            );
            g * g * e * (1.0 - e)
        })
        .sum()
}

/// Estimated improvement `delta` for the given variance
pub fn estimated_improvement(player: &Rating, results: &[GameResult], variance: f64) -> f64 {
    variance * score_surprise(player, results)
}

/// Impact-weighted sum of `score - expected`
fn score_surprise(player: &Rating, results: &[GameResult]) -> f64 {
    results
        .iter()
        .map(|result| {
            let e = expected_score(
                player.value,
                result.opponent.value,
                result.opponent.deviation,
            );
            impact(result.opponent.deviation) * (result.score - e)
        })
        .sum()
}

/// Deviation after one period, before any game results are applied
fn pre_period_deviation(deviation: f64, volatility: f64) -> f64 {
    (deviation * deviation + volatility * volatility).sqrt()
}

/// Check the system constant is usable
pub fn validate_tau(tau: f64) -> Result<()> {
    if !tau.is_finite() || tau <= 0.0 {
        return Err(RatingError::invalid(format!(
            "tau must be finite and positive, got {}",
            tau
        )));
    }
    Ok(())
}

/// Root finder for the new volatility (Illinois variant of regula falsi)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilitySolver {
    /// Bracket width at which the iteration stops
    pub tolerance: f64,
    /// Maximum iterations for both the bracket search and the refinement
    pub max_iterations: usize,
}

impl Default for VolatilitySolver {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_CONVERGENCE_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl VolatilitySolver {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Check the tolerance is finite and positive and at least one iteration is allowed
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(RatingError::invalid(format!(
                "solver tolerance must be finite and positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(RatingError::invalid(
                "solver max iterations must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Solve for the new volatility `sigma'`
    ///
    /// # Arguments
    /// * `deviation` - Current deviation of the player (phi)
    /// * `volatility` - Current volatility of the player (sigma)
    /// * `variance` - Estimated variance `v` from the period's results
    /// * `improvement` - Estimated improvement `delta`
    /// * `tau` - System constant
    pub fn solve(
        &self,
        deviation: f64,
        volatility: f64,
        variance: f64,
        improvement: f64,
        tau: f64,
    ) -> Result<f64> {
        self.validate()?;

        let phi_sq = deviation * deviation;
        let delta_sq = improvement * improvement;
        let ln_sigma_sq = (volatility * volatility).ln();
        let tau_sq = tau * tau;

        let f = |x: f64| {
            let ex = x.exp();
            let denom = phi_sq + variance + ex;
            ex * (delta_sq - phi_sq - variance - ex) / (2.0 * denom * denom)
                - (x - ln_sigma_sq) / tau_sq
        };

        let mut a = ln_sigma_sq;
        let mut b = if delta_sq > phi_sq + variance {
            (delta_sq - phi_sq - variance).ln()
        } else {
            let mut k = 1;
            loop {
                let candidate = a - k as f64 * tau;
                if f(candidate) >= 0.0 {
                    break candidate;
                }
                if k >= self.max_iterations {
                    return Err(self.no_convergence("bracket search", k));
                }
                k += 1;
            }
        };

        let mut fa = f(a);
        let mut fb = f(b);
        if !b.is_finite() || !fa.is_finite() || !fb.is_finite() {
            return Err(RatingError::InternalError {
                message: format!("volatility bracket is not finite: [{}, {}]", a, b),
            });
        }
        let mut iterations = 0;

        while (b - a).abs() > self.tolerance {
            if iterations >= self.max_iterations {
                return Err(self.no_convergence("refinement", iterations));
            }
            iterations += 1;

            let c = a + (a - b) * fa / (fb - fa);
            let fc = f(c);
            if !c.is_finite() || !fc.is_finite() {
                return Err(RatingError::InternalError {
                    message: format!("volatility iteration diverged at step {}", iterations),
                });
            }

            if fc * fb <= 0.0 {
                a = b;
                fa = fb;
            } else {
                // Same side kept twice: halve to avoid stalling
                fa /= 2.0;
            }
            b = c;
            fb = fc;

            trace!(iteration = iterations, a, b, "volatility solver step");
        }

        Ok((a / 2.0).exp())
    }

    fn no_convergence(&self, stage: &str, iterations: usize) -> RatingError {
        RatingError::InternalError {
            message: format!(
                "volatility {} did not converge after {} iterations",
                stage, iterations
            ),
        }
    }
}

/// Compute the new rating of `player` after `results`, with default solver settings
pub fn update(player: &Rating, results: &[GameResult], tau: f64) -> Result<Rating> {
    update_with(player, results, tau, &VolatilitySolver::default())
}

/// Compute the new rating of `player` after `results`
///
/// A player without results keeps value and volatility while the deviation
/// grows by one period of volatility.
pub fn update_with(
    player: &Rating,
    results: &[GameResult],
    tau: f64,
    solver: &VolatilitySolver,
) -> Result<Rating> {
    validate_tau(tau)?;
    solver.validate()?;
    player.validate()?;
    for result in results {
        result.validate()?;
    }

    if results.is_empty() {
        let deviation = pre_period_deviation(player.deviation, player.volatility);
        debug!(
            value = player.value,
            deviation, "No games played, only inflating deviation"
        );
        return Ok(Rating {
            value: player.value,
            deviation,
            volatility: player.volatility,
        });
    }

    let surprise = score_surprise(player, results);

    let Some(variance) = estimated_variance(player, results) else {
        // Expectations saturated, so volatility cannot be estimated
        let deviation = pre_period_deviation(player.deviation, player.volatility);
        debug!(
            games = results.len(),
            "Results carry no variance information, keeping volatility"
        );
        return Ok(Rating {
            value: player.value + deviation * deviation * surprise,
            deviation,
            volatility: player.volatility,
        });
    };

    let improvement = variance * surprise;
    let volatility = solver.solve(
        player.deviation,
        player.volatility,
        variance,
        improvement,
        tau,
    )?;

    let pre_rating_deviation = pre_period_deviation(player.deviation, volatility);
    let deviation =
        1.0 / (1.0 / (pre_rating_deviation * pre_rating_deviation) + 1.0 / variance).sqrt();
    let value = player.value + deviation * deviation * surprise;

    Ok(Rating {
        value,
        deviation,
        volatility,
    })
}
