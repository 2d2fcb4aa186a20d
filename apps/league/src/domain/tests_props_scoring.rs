//! Property tests for score computation and outcome resolution.

use proptest::prelude::*;

use crate::domain::handicap::{recalculate, MAX_MATCH_SCORE};
use crate::domain::scoring::{resolve_outcome, MatchOutcome, ScoreCard, CLOSE_LOSS_THRESHOLD};
use crate::domain::test_gens::{self, recurve_table};
use crate::domain::test_prelude;
use crate::entities::Side;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_adjusted_is_raw_plus_allowance(h in test_gens::handicap(), raw in test_gens::raw_points()) {
        let table = recurve_table();
        let c = ScoreCard::compute(Side::Left, 1, &table, h, raw).unwrap();
        prop_assert_eq!(c.match_points_adjusted, raw + table.allowance(h).unwrap());
        prop_assert_eq!(c.allowance, test_gens::allowance_for(h));
    }

    #[test]
    fn prop_handicap_never_worsens(h in test_gens::handicap(), raw in test_gens::raw_points()) {
        let table = recurve_table();
        let after = recalculate(&table, h, raw).unwrap();
        prop_assert!(after <= h);
        prop_assert!(table.row(after).is_some());
        if raw + table.allowance(h).unwrap() < MAX_MATCH_SCORE {
            prop_assert_eq!(after, h);
        }
    }

    #[test]
    fn prop_outcome_assignments(
        (lh, lraw) in (test_gens::handicap(), test_gens::raw_points()),
        (rh, rraw) in (test_gens::handicap(), test_gens::raw_points()),
    ) {
        let table = recurve_table();
        let mut left = ScoreCard::compute(Side::Left, 1, &table, lh, lraw).unwrap();
        let mut right = ScoreCard::compute(Side::Right, 2, &table, rh, rraw).unwrap();

        let outcome = resolve_outcome(&mut left, &mut right);

        for c in [&left, &right] {
            if c.match_points_adjusted >= MAX_MATCH_SCORE {
                prop_assert!(c.bonus_points >= 1);
            }
        }

        match outcome {
            MatchOutcome::Draw => {
                prop_assert_eq!(left.match_points_adjusted, right.match_points_adjusted);
                prop_assert_eq!(left.league_points, 1);
                prop_assert_eq!(right.league_points, 1);
            }
            MatchOutcome::Decisive { winner, margin, close_loss } => {
                let (w, l) = if winner == Side::Left { (&left, &right) } else { (&right, &left) };
                prop_assert!(w.match_points_adjusted > l.match_points_adjusted);
                prop_assert_eq!(w.league_points, 3);
                prop_assert_eq!(l.league_points, 0);
                prop_assert_eq!(margin, w.match_points_adjusted - l.match_points_adjusted);
                prop_assert_eq!(close_loss, margin <= CLOSE_LOSS_THRESHOLD);

                let hit = |adj: i32| i32::from(adj >= MAX_MATCH_SCORE);
                prop_assert_eq!(w.bonus_points, hit(w.match_points_adjusted));
                prop_assert_eq!(l.bonus_points, hit(l.match_points_adjusted) + i32::from(close_loss));
            }
        }
    }

    #[test]
    fn prop_resolution_is_idempotent(
        (lh, lraw) in (test_gens::handicap(), test_gens::raw_points()),
        (rh, rraw) in (test_gens::handicap(), test_gens::raw_points()),
    ) {
        let table = recurve_table();
        let mut left = ScoreCard::compute(Side::Left, 1, &table, lh, lraw).unwrap();
        let mut right = ScoreCard::compute(Side::Right, 2, &table, rh, rraw).unwrap();

        let first = resolve_outcome(&mut left, &mut right);
        let after_first = (left, right);
        let second = resolve_outcome(&mut left, &mut right);

        prop_assert_eq!(first, second);
        prop_assert_eq!((left, right), after_first);
    }
}
