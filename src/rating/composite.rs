//! Team ratings built from member ratings
//!
//! A team is rated against another team by collapsing the opposing team into
//! a single composite opponent and updating each member on their own.

use crate::error::{RatingError, Result};
use crate::rating::glicko2::{update_with, VolatilitySolver};
use crate::types::{GameResult, Rating, TeamResult};

/// Average rating of a group, field by field
///
/// The result is only meant to stand in for the group as an opponent; it is
/// never updated itself.
pub fn composite(ratings: &[Rating]) -> Result<Rating> {
    if ratings.is_empty() {
        return Err(RatingError::invalid(
            "Cannot build a composite rating from an empty team",
        ));
    }

    for rating in ratings {
        rating.validate()?;
    }

    // Divide before summing so large finite members cannot overflow the mean
    let count = ratings.len() as f64;
    let mean = ratings.iter().fold(
        Rating::new(0.0, 0.0, 0.0),
        |mean, rating| Rating {
            value: mean.value + rating.value / count,
            deviation: mean.deviation + rating.deviation / count,
            volatility: mean.volatility + rating.volatility / count,
        },
    );

    mean.validate()?;
    Ok(mean)
}

/// Update every member of `team` after a set of team results
///
/// Each opposing team becomes one composite opponent, and every member is
/// rated against the same list of composites. Ratings are returned in team order.
pub fn update_team(team: &[Rating], results: &[TeamResult], tau: f64) -> Result<Vec<Rating>> {
    update_team_with(team, results, tau, &VolatilitySolver::default())
}

pub(crate) fn update_team_with(
    team: &[Rating],
    results: &[TeamResult],
    tau: f64,
    solver: &VolatilitySolver,
) -> Result<Vec<Rating>> {
    let game_results = results
        .iter()
        .map(|result| -> Result<GameResult> {
            Ok(GameResult::new(composite(&result.opponents)?, result.score))
        })
        .collect::<Result<Vec<_>>>()?;

    team.iter()
        .map(|member| update_with(member, &game_results, tau, solver))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_composite_single_rating() {
        let rating = Rating::new(0.75, 1.1, 0.059);
        assert_eq!(composite(&[rating]).unwrap(), rating);
    }

    #[test]
    fn test_composite_identical_ratings() {
        let rating = Rating::new(-0.3, 0.8, 0.06);
        assert_eq!(composite(&[rating, rating]).unwrap(), rating);
    }

    #[test]
    fn test_composite_mean() {
        let team = [
            Rating::new(1.0, 1.0, 0.05),
            Rating::new(0.0, 2.0, 0.06),
            Rating::new(-0.4, 0.6, 0.07),
        ];
        let result = composite(&team).unwrap();
        assert_abs_diff_eq!(result.value, 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(result.deviation, 1.2, epsilon = 1e-12);
        assert_abs_diff_eq!(result.volatility, 0.06, epsilon = 1e-12);
    }

    #[test]
    fn test_composite_empty_team() {
        assert!(matches!(
            composite(&[]),
            Err(RatingError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_composite_rejects_invalid_members() {
        let valid = Rating::new(0.0, 1.0, 0.06);

        for invalid in [
            Rating::new(0.0, -0.5, 0.06),
            Rating::new(0.0, 0.0, 0.06),
            Rating::new(0.0, 1.0, -0.06),
            Rating::new(f64::NAN, 1.0, 0.06),
            Rating::new(0.0, f64::INFINITY, 0.06),
        ] {
            assert!(matches!(
                composite(&[valid, invalid]),
                Err(RatingError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn test_composite_of_extreme_values_stays_finite() {
        let huge = Rating::new(f64::MAX, f64::MAX, 0.06);
        let result = composite(&[huge, huge]).unwrap();
        assert_eq!(result, huge);
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_update_team_rejects_invalid_opponent_member() {
        let team = vec![Rating::new_player()];
        let opponents = vec![Rating::new_player(), Rating::new(0.0, -0.5, 0.06)];
        let results = vec![TeamResult::new(opponents, 1.0)];
        assert!(matches!(
            update_team(&team, &results, 0.5),
            Err(RatingError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_update_team_preserves_order() {
        let team = vec![
            Rating::new(0.5, 1.0, 0.06),
            Rating::new(-0.5, 1.5, 0.06),
            Rating::new(0.0, 2.0, 0.06),
        ];
        let opponents = vec![Rating::new_player(), Rating::new(0.2, 1.0, 0.06)];
        let results = vec![TeamResult::new(opponents, 1.0)];

        let updated = update_team(&team, &results, 0.5).unwrap();
        assert_eq!(updated.len(), team.len());

        // Same game list per member, so each matches an individual update
        let opponent = composite(&results[0].opponents).unwrap();
        for (member, new_rating) in team.iter().zip(&updated) {
            let expected =
                crate::rating::glicko2::update(member, &[GameResult::new(opponent, 1.0)], 0.5)
                    .unwrap();
            assert_eq!(*new_rating, expected);
            assert!(new_rating.value > member.value);
        }
    }

    #[test]
    fn test_update_team_without_results() {
        let team = vec![Rating::new_player(), Rating::new(1.0, 0.5, 0.06)];
        let updated = update_team(&team, &[], 0.5).unwrap();

        for (member, new_rating) in team.iter().zip(&updated) {
            assert_eq!(new_rating.value, member.value);
            assert!(new_rating.deviation > member.deviation);
        }
    }

    #[test]
    fn test_update_team_rejects_empty_opponents() {
        let team = vec![Rating::new_player()];
        let results = vec![TeamResult::new(vec![], 0.5)];
        assert!(update_team(&team, &results, 0.5).is_err());
    }

    #[test]
    fn test_update_empty_team() {
        let results = vec![TeamResult::new(vec![Rating::new_player()], 0.0)];
        assert!(update_team(&[], &results, 0.5).unwrap().is_empty());
    }
}
