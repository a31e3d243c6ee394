//! Shared ratings and helpers for integration testing

#![allow(dead_code)]

use parlor_glicko::{convert_to_internal, GameResult, Rating, TeamResult};
use std::sync::Once;

static LOGGING: Once = Once::new();

/// Route `tracing` output through the test harness, controlled by `RUST_LOG`
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Player from the worked example in Glickman's Glicko-2 paper
pub fn glickman_player() -> Rating {
    convert_to_internal(1500.0, 200.0, 0.06)
}

/// Results from the worked example: beat 1400/30, lost to 1550/100 and 1700/300
pub fn glickman_results() -> Vec<GameResult> {
    vec![
        GameResult::new(convert_to_internal(1400.0, 30.0, 0.06), 1.0),
        GameResult::new(convert_to_internal(1550.0, 100.0, 0.06), 0.0),
        GameResult::new(convert_to_internal(1700.0, 300.0, 0.06), 0.0),
    ]
}

/// Three players with a wide prior
pub fn wide_prior_team() -> Vec<Rating> {
    vec![
        Rating::new(0.2, 2.0, 0.06),
        Rating::new(0.0, 2.0, 0.06),
        Rating::new(-0.1, 2.0, 0.06),
    ]
}

/// Team whose values are the negation of `team`
pub fn mirrored(team: &[Rating]) -> Vec<Rating> {
    team.iter()
        .map(|rating| Rating::new(-rating.value, rating.deviation, rating.volatility))
        .collect()
}

/// A single match against `opponents` with the given team score
pub fn single_match(opponents: &[Rating], score: f64) -> Vec<TeamResult> {
    vec![TeamResult::new(opponents.to_vec(), score)]
}
