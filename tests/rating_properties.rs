//! Property tests for the rating engine

use parlor_glicko::rating::glicko2::{expected_score, impact};
use parlor_glicko::rating::scale::SCALE_CENTER;
use parlor_glicko::{
    composite, convert_to_external, convert_to_internal, update, GameResult, Rating,
};
use proptest::prelude::*;

fn rating_strategy() -> impl Strategy<Value = Rating> {
    (-3.0..3.0f64, 0.05..2.5f64, 0.01..0.2f64)
        .prop_map(|(value, deviation, volatility)| Rating::new(value, deviation, volatility))
}

fn results_strategy() -> impl Strategy<Value = Vec<GameResult>> {
    prop::collection::vec(
        (rating_strategy(), prop::sample::select(vec![0.0, 0.5, 1.0]))
            .prop_map(|(opponent, score)| GameResult::new(opponent, score)),
        1..8,
    )
}

proptest! {
    #[test]
    fn scale_round_trip(
        rating in prop_oneof![-1e9..1e9f64, -5000.0..5000.0f64],
        deviation in prop_oneof![1e-3..1e6f64, 1.0..500.0f64],
        volatility in 0.001..0.5f64,
    ) {
        let back = convert_to_external(&convert_to_internal(rating, deviation, volatility));
        prop_assert!((back.rating - rating).abs() <= 1e-12 * rating.abs().max(SCALE_CENTER));
        prop_assert!((back.deviation - deviation).abs() <= 1e-12 * deviation.max(1.0));
        prop_assert_eq!(back.volatility, volatility);
    }

    #[test]
    fn impact_decreases_with_deviation(low in 0.0..5.0f64, extra in 0.001..5.0f64) {
        let high = low + extra;
        prop_assert!(impact(high) < impact(low));
        prop_assert!(impact(-high) < impact(-low));
        prop_assert!(impact(low) <= 1.0);
    }

    #[test]
    fn expected_score_against_equal_is_even(value in -5.0..5.0f64, deviation in 0.0..3.0f64) {
        prop_assert_eq!(expected_score(value, value, deviation), 0.5);
    }

    #[test]
    fn idle_period_only_grows_deviation(player in rating_strategy(), tau in 0.3..1.2f64) {
        let updated = update(&player, &[], tau).unwrap();
        prop_assert_eq!(updated.value, player.value);
        prop_assert_eq!(updated.volatility, player.volatility);
        prop_assert!(updated.deviation > player.deviation);
    }

    #[test]
    fn update_stays_valid(
        player in rating_strategy(),
        results in results_strategy(),
        tau in 0.3..1.2f64,
    ) {
        let updated = update(&player, &results, tau).unwrap();
        prop_assert!(updated.validate().is_ok());
    }

    #[test]
    fn wide_prior_shrinks_with_games(
        value in -1.0..1.0f64,
        opponents in prop::collection::vec((-1.0..1.0f64, 0.1..1.5f64), 1..6),
        won in any::<bool>(),
    ) {
        let player = Rating::new(value, 2.0, 0.06);
        let score = if won { 1.0 } else { 0.0 };
        let results: Vec<GameResult> = opponents
            .iter()
            .map(|&(opp_value, opp_deviation)| {
                GameResult::new(Rating::new(opp_value, opp_deviation, 0.06), score)
            })
            .collect();

        let updated = update(&player, &results, 0.5).unwrap();
        prop_assert!(updated.deviation <= player.deviation);
    }

    #[test]
    fn composite_of_copies_is_identity(rating in rating_strategy(), copies in 1usize..6) {
        let team = vec![rating; copies];
        let result = composite(&team).unwrap();
        prop_assert!((result.value - rating.value).abs() < 1e-12);
        prop_assert!((result.deviation - rating.deviation).abs() < 1e-12);
        prop_assert!((result.volatility - rating.volatility).abs() < 1e-12);
    }
}
