use crate::domain::scoring::{
    resolve_outcome, MatchOutcome, ScoreCard, LEAGUE_POINTS_FOR_DRAW, LEAGUE_POINTS_FOR_LOSS,
    LEAGUE_POINTS_FOR_WIN,
};
use crate::domain::test_gens::recurve_table;
use crate::entities::Side;
use crate::errors::domain::{DomainError, ValidationKind};

fn card(side: Side, entry_id: i64, handicap: i16, raw: i32) -> ScoreCard {
    ScoreCard::compute(side, entry_id, &recurve_table(), handicap, raw).expect("valid card")
}

#[test]
fn compute_applies_allowance_of_handicap_before() {
    let c = card(Side::Left, 1, 20, 100);
    assert_eq!(c.allowance, 80);
    assert_eq!(c.match_points_adjusted, 180);
    assert_eq!(c.bonus_points, 0);
    assert_eq!(c.league_points, 0);
    assert_eq!(c.handicap_after, 20);
    assert!(!c.improves_handicap());
}

#[test]
fn decisive_match_without_close_loss() {
    let mut a = card(Side::Left, 1, 20, 100);
    let mut b = card(Side::Right, 2, 15, 160);

    let outcome = resolve_outcome(&mut a, &mut b);

    assert_eq!(
        outcome,
        MatchOutcome::Decisive {
            winner: Side::Right,
            margin: 20,
            close_loss: false
        }
    );
    assert_eq!(b.match_points_adjusted, 200);
    assert_eq!(b.league_points, LEAGUE_POINTS_FOR_WIN);
    assert_eq!(a.league_points, LEAGUE_POINTS_FOR_LOSS);
    assert_eq!(a.bonus_points, 0);
    assert_eq!(b.bonus_points, 0);
}

#[test]
fn close_loss_at_threshold_earns_loser_a_bonus() {
    let mut a = card(Side::Left, 1, 20, 120); // 200
    let mut b = card(Side::Right, 2, 15, 165); // 205

    let outcome = resolve_outcome(&mut a, &mut b);

    assert_eq!(outcome.winner_side(), Some(Side::Right));
    assert_eq!(a.bonus_points, 1);
    assert_eq!(b.bonus_points, 0);
}

#[test]
fn one_point_past_threshold_earns_nothing() {
    let mut a = card(Side::Left, 1, 20, 119); // 199
    let mut b = card(Side::Right, 2, 15, 165); // 205

    resolve_outcome(&mut a, &mut b);

    assert_eq!(a.bonus_points, 0);
}

#[test]
fn equal_raw_with_different_allowances_is_not_a_draw() {
    let mut a = card(Side::Left, 1, 20, 150); // 230
    let mut b = card(Side::Right, 2, 15, 150); // 190

    let outcome = resolve_outcome(&mut a, &mut b);

    assert_eq!(outcome.winner_side(), Some(Side::Left));
    assert_eq!(a.league_points, 3);
    assert_eq!(b.league_points, 0);
}

#[test]
fn both_hitting_the_maximum_is_a_draw_with_hit_bonus() {
    let mut a = card(Side::Left, 1, 20, 1370); // 1450
    let mut b = card(Side::Right, 2, 15, 1410); // 1450

    let outcome = resolve_outcome(&mut a, &mut b);

    assert!(outcome.is_draw());
    assert_eq!(a.league_points, LEAGUE_POINTS_FOR_DRAW);
    assert_eq!(b.league_points, LEAGUE_POINTS_FOR_DRAW);
    assert_eq!(a.bonus_points, 1);
    assert_eq!(b.bonus_points, 1);
}

#[test]
fn close_loss_stacks_on_handicap_hit() {
    let mut a = card(Side::Left, 1, 20, 1362); // 1442
    let mut b = card(Side::Right, 2, 15, 1405); // 1445

    resolve_outcome(&mut a, &mut b);

    assert_eq!(b.league_points, 3);
    assert_eq!(b.bonus_points, 1);
    assert_eq!(a.bonus_points, 2);
}

#[test]
fn resolving_twice_is_stable() {
    let mut a = card(Side::Left, 1, 20, 120);
    let mut b = card(Side::Right, 2, 15, 165);

    let first = resolve_outcome(&mut a, &mut b);
    let snapshot = (a, b);
    let second = resolve_outcome(&mut a, &mut b);

    assert_eq!(first, second);
    assert_eq!((a, b), snapshot);
}

#[test]
fn raw_points_that_overflow_with_the_allowance_are_rejected() {
    let err = ScoreCard::compute(Side::Left, 1, &recurve_table(), 20, i32::MAX).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::MatchPointsOutOfRange, _)
    ));

    // no allowance at handicap 0, so the largest raw score still fits
    let c = card(Side::Right, 2, 0, i32::MAX);
    assert_eq!(c.match_points_adjusted, i32::MAX);
    assert_eq!(c.handicap_after, 0);
}
