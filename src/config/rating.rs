//! Rating system configuration
//!
//! Holds the Glicko-2 system constant, the allowed tau range, starting
//! values for new players and the volatility solver settings. Values can be
//! loaded from environment variables or a TOML file.

use crate::error::{RatingError, Result};
use crate::rating::glicko2::{
    VolatilitySolver, DEFAULT_CONVERGENCE_TOLERANCE, DEFAULT_MAX_ITERATIONS,
};
use crate::rating::scale::{convert_to_internal, SCALE_CENTER};
use crate::types::{Rating, DEFAULT_VOLATILITY};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Deserializer, Serialize};
use std::env;
use std::path::Path;

/// Inclusive range of accepted system constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TauBounds {
    pub min: f64,
    pub max: f64,
}

impl TauBounds {
    pub fn contains(&self, tau: f64) -> bool {
        (self.min..=self.max).contains(&tau)
    }
}

impl Default for TauBounds {
    fn default() -> Self {
        Self { min: 0.3, max: 1.2 }
    }
}

/// `tau_bounds` as written in a config file: a range, or a switch
#[derive(Deserialize)]
#[serde(untagged)]
enum TauBoundsSetting {
    Enabled(bool),
    Range(TauBounds),
}

/// `false` or null disables the range, `true` restores the default one
fn deserialize_tau_bounds<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<TauBounds>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<TauBoundsSetting>::deserialize(deserializer)? {
            None | Some(TauBoundsSetting::Enabled(false)) => None,
            Some(TauBoundsSetting::Enabled(true)) => Some(TauBounds::default()),
            Some(TauBoundsSetting::Range(bounds)) => Some(bounds),
        },
    )
}

/// Configuration for the Glicko-2 rating calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// System constant, limits how fast volatility can change
    pub tau: f64,
    /// Accepted tau range, `None` accepts any positive tau
    ///
    /// In TOML or JSON this is either a `{ min, max }` table or a boolean,
    /// where `false` disables the range.
    #[serde(deserialize_with = "deserialize_tau_bounds")]
    pub tau_bounds: Option<TauBounds>,
    /// Rating of a new player on the external scale
    pub initial_rating: f64,
    /// Deviation of a new player on the external scale
    pub initial_deviation: f64,
    /// Volatility of a new player
    pub initial_volatility: f64,
    /// Volatility solver stopping width
    pub convergence_tolerance: f64,
    /// Volatility solver iteration cap
    pub max_iterations: usize,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            tau: 0.5,
            tau_bounds: Some(TauBounds::default()),
            initial_rating: SCALE_CENTER,
            initial_deviation: 350.0,
            initial_volatility: DEFAULT_VOLATILITY,
            convergence_tolerance: DEFAULT_CONVERGENCE_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl RatingConfig {
    /// Create conservative configuration (volatility changes slowly)
    pub fn conservative() -> Self {
        Self {
            tau: 0.3,
            ..Self::default()
        }
    }

    /// Create aggressive configuration (volatility reacts quickly to upsets)
    pub fn aggressive() -> Self {
        Self {
            tau: 1.2,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.tau.is_finite() || self.tau <= 0.0 {
            return Err(RatingError::config("Tau must be finite and positive"));
        }

        if let Some(bounds) = &self.tau_bounds {
            if !bounds.min.is_finite() || !bounds.max.is_finite() || bounds.min <= 0.0 {
                return Err(RatingError::config(
                    "Tau bounds must be finite and positive",
                ));
            }
            if bounds.min > bounds.max {
                return Err(RatingError::config(format!(
                    "Tau bounds are inverted: min {} > max {}",
                    bounds.min, bounds.max
                )));
            }
            self.check_tau(self.tau)
                .map_err(|_| RatingError::config("Tau is outside the configured bounds"))?;
        }

        if !self.initial_rating.is_finite() {
            return Err(RatingError::config("Initial rating must be finite"));
        }

        if !self.initial_deviation.is_finite() || self.initial_deviation <= 0.0 {
            return Err(RatingError::config("Initial deviation must be positive"));
        }

        if !self.initial_volatility.is_finite() || self.initial_volatility <= 0.0 {
            return Err(RatingError::config("Initial volatility must be positive"));
        }

        self.solver().validate().map_err(|err| match err {
            RatingError::InvalidArgument { reason } => RatingError::config(reason),
            other => other,
        })
    }

    /// Check a tau against the configured bounds
    pub fn check_tau(&self, tau: f64) -> Result<()> {
        crate::rating::glicko2::validate_tau(tau)?;
        match &self.tau_bounds {
            Some(bounds) if !bounds.contains(tau) => Err(RatingError::invalid(format!(
                "tau {} is outside the configured range [{}, {}]",
                tau, bounds.min, bounds.max
            ))),
            _ => Ok(()),
        }
    }

    /// Rating for a new player, on the internal scale
    pub fn initial_rating(&self) -> Rating {
        convert_to_internal(
            self.initial_rating,
            self.initial_deviation,
            self.initial_volatility,
        )
    }

    /// Volatility solver using the configured tolerance and iteration cap
    pub fn solver(&self) -> VolatilitySolver {
        VolatilitySolver::new(self.convergence_tolerance, self.max_iterations)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(tau) = env::var("GLICKO_TAU") {
            config.tau = tau
                .parse()
                .map_err(|_| anyhow!("Invalid GLICKO_TAU value: {}", tau))?;
        }

        if let Ok(enabled) = env::var("GLICKO_TAU_BOUNDS_ENABLED") {
            let enabled: bool = enabled
                .parse()
                .map_err(|_| anyhow!("Invalid GLICKO_TAU_BOUNDS_ENABLED value: {}", enabled))?;
            if !enabled {
                config.tau_bounds = None;
            }
        }

        let tau_min = env::var("GLICKO_TAU_MIN").ok();
        let tau_max = env::var("GLICKO_TAU_MAX").ok();
        if tau_min.is_some() || tau_max.is_some() {
            let mut bounds = config.tau_bounds.unwrap_or_default();
            if let Some(min) = tau_min {
                bounds.min = min
                    .parse()
                    .map_err(|_| anyhow!("Invalid GLICKO_TAU_MIN value: {}", min))?;
            }
            if let Some(max) = tau_max {
                bounds.max = max
                    .parse()
                    .map_err(|_| anyhow!("Invalid GLICKO_TAU_MAX value: {}", max))?;
            }
            config.tau_bounds = Some(bounds);
        }

        if let Ok(rating) = env::var("GLICKO_INITIAL_RATING") {
            config.initial_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid GLICKO_INITIAL_RATING value: {}", rating))?;
        }
        if let Ok(deviation) = env::var("GLICKO_INITIAL_DEVIATION") {
            config.initial_deviation = deviation
                .parse()
                .map_err(|_| anyhow!("Invalid GLICKO_INITIAL_DEVIATION value: {}", deviation))?;
        }
        if let Ok(volatility) = env::var("GLICKO_INITIAL_VOLATILITY") {
            config.initial_volatility = volatility.parse().map_err(|_| {
                anyhow!("Invalid GLICKO_INITIAL_VOLATILITY value: {}", volatility)
            })?;
        }
        if let Ok(tolerance) = env::var("GLICKO_CONVERGENCE_TOLERANCE") {
            config.convergence_tolerance = tolerance.parse().map_err(|_| {
                anyhow!("Invalid GLICKO_CONVERGENCE_TOLERANCE value: {}", tolerance)
            })?;
        }
        if let Ok(iterations) = env::var("GLICKO_MAX_ITERATIONS") {
            config.max_iterations = iterations
                .parse()
                .map_err(|_| anyhow!("Invalid GLICKO_MAX_ITERATIONS value: {}", iterations))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML, missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(contents).context("Failed to parse rating config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
    }
}
