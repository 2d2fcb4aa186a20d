use league::domain::pairing::{DUPLICATE_PAIRING_MESSAGE, SOLO_MATCH_MESSAGE};
use league::entities::Side;
use league::errors::domain::{NotFoundKind, ValidationKind};
use league::repos::rounds;
use league::{DomainError, MatchResultData, MatchResultService, SideScore};

use time::macros::datetime;

use crate::support::fixtures::{feb, jan, league, mar};

#[tokio::test]
async fn decisive_match_without_close_loss() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;
    let service = MatchResultService::new();

    let data = MatchResultData::new(jan(5), SideScore::new(a.id, 100), SideScore::new(b.id, 160));
    let m = service.record_match_result(&l.conn, l.autumn.id, data).await?;

    assert_eq!(m.round_id, l.january.id);
    assert_eq!(m.winner_id, Some(b.id));
    assert!(m.has_winner());

    let left = m.left().expect("left score");
    assert_eq!(left.entry_id, a.id);
    assert_eq!(left.handicap_before, 20);
    assert_eq!(left.allowance, 80);
    assert_eq!(left.match_points_adjusted, 180);
    assert_eq!(left.league_points, 0);
    assert_eq!(left.bonus_points, 0);

    let right = m.right().expect("right score");
    assert_eq!(right.entry_id, b.id);
    assert_eq!(right.allowance, 40);
    assert_eq!(right.match_points_adjusted, 200);
    assert_eq!(right.league_points, 3);
    assert_eq!(right.bonus_points, 0);

    // nobody reached the maximum score, so no handicap moves
    assert_eq!(l.reload(&a).await.current_handicap, 20);
    assert_eq!(l.reload(&b).await.current_handicap, 15);
    Ok(())
}

#[tokio::test]
async fn equal_adjusted_scores_at_the_maximum_are_a_drawn_handicap_hit() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;

    let data = MatchResultData::new(jan(5), SideScore::new(a.id, 1370), SideScore::new(b.id, 1410));
    let m = MatchResultService::new()
        .record_match_result(&l.conn, l.autumn.id, data)
        .await?;

    assert_eq!(m.winner_id, None);
    assert!(m.is_draw());
    for side in [Side::Left, Side::Right] {
        let s = m.side(side).expect("score");
        assert_eq!(s.match_points_adjusted, 1450);
        assert_eq!(s.league_points, 1);
        assert_eq!(s.bonus_points, 1);
    }
    Ok(())
}

#[tokio::test]
async fn close_loss_adds_a_bonus_point_for_the_loser() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;

    let data = MatchResultData::new(jan(5), SideScore::new(a.id, 120), SideScore::new(b.id, 165));
    let m = MatchResultService::new()
        .record_match_result(&l.conn, l.autumn.id, data)
        .await?;

    assert_eq!(m.winner_id, Some(b.id));
    assert_eq!(m.score_for(a.id).map(|s| s.bonus_points), Some(1));
    assert_eq!(m.score_for(b.id).map(|s| s.bonus_points), Some(0));
    Ok(())
}

#[tokio::test]
async fn a_handicap_hit_improves_the_entry() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;

    let data = MatchResultData::new(jan(5), SideScore::new(a.id, 1500), SideScore::new(b.id, 1000));
    let m = MatchResultService::new()
        .record_match_result(&l.conn, l.autumn.id, data)
        .await?;

    let left = m.left().expect("left score");
    assert_eq!(left.handicap_before, 20);
    assert_eq!(left.handicap_after, 10);
    assert_eq!(left.handicap_change(), 10);
    assert_eq!(left.bonus_points, 1);

    let reloaded = l.reload(&a).await;
    assert_eq!(reloaded.current_handicap, 10);
    assert_eq!(reloaded.initial_handicap, 20);
    assert_eq!(reloaded.lock_version, a.lock_version + 1);

    // the next match is shot off the improved handicap
    let c = l.entry("Archer C", 30).await;
    let data = MatchResultData::new(jan(9), SideScore::new(c.id, 900), SideScore::new(a.id, 900));
    let next = MatchResultService::new()
        .record_match_result(&l.conn, l.autumn.id, data)
        .await?;
    let right = next.right().expect("right score");
    assert_eq!(right.handicap_before, 10);
    assert_eq!(right.allowance, 0);
    Ok(())
}

#[tokio::test]
async fn solo_match_is_rejected_and_leaves_nothing_behind() {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;

    let data = MatchResultData::new(jan(5), SideScore::new(a.id, 1500), SideScore::new(a.id, 1200));
    let err = MatchResultService::new()
        .record_match_result(&l.conn, l.autumn.id, data)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(ValidationKind::SoloMatch, _)));
    assert_eq!(err.to_string(), SOLO_MATCH_MESSAGE);
    assert_eq!(l.match_rows().await, 0);
    assert_eq!(l.score_rows().await, 0);
    assert_eq!(l.reload(&a).await.current_handicap, 20);
}

#[tokio::test]
async fn same_pair_twice_in_one_stage_is_rejected() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;
    let service = MatchResultService::new();

    let first = MatchResultData::new(jan(5), SideScore::new(a.id, 100), SideScore::new(b.id, 160));
    service.record_match_result(&l.conn, l.autumn.id, first).await?;

    // a later round of the same stage, sides swapped
    let second = MatchResultData::new(feb(3), SideScore::new(b.id, 300), SideScore::new(a.id, 200));
    let err = service
        .record_match_result(&l.conn, l.autumn.id, second)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(ValidationKind::DuplicatePairing, _)));
    assert_eq!(err.to_string(), DUPLICATE_PAIRING_MESSAGE);
    assert_eq!(l.match_rows().await, 1);
    assert_eq!(l.score_rows().await, 2);
    Ok(())
}

#[tokio::test]
async fn same_pair_in_different_stages_is_allowed() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;
    let service = MatchResultService::new();

    let autumn = MatchResultData::new(jan(5), SideScore::new(a.id, 100), SideScore::new(b.id, 160));
    service.record_match_result(&l.conn, l.autumn.id, autumn).await?;

    let spring = MatchResultData::new(mar(5), SideScore::new(a.id, 100), SideScore::new(b.id, 160));
    let m = service.record_match_result(&l.conn, l.spring.id, spring).await?;

    assert_eq!(m.round_id, l.march.id);
    assert_eq!(service.count_for_competition(&l.conn, l.competition.id).await?, 2);
    Ok(())
}

#[tokio::test]
async fn date_outside_every_round_of_the_stage_is_not_found() {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;

    // March belongs to the spring stage only
    let data = MatchResultData::new(mar(5), SideScore::new(a.id, 100), SideScore::new(b.id, 160));
    let err = MatchResultService::new()
        .record_match_result(&l.conn, l.autumn.id, data)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Round, _)));
    assert_eq!(l.match_rows().await, 0);
}

#[tokio::test]
async fn round_boundaries_are_inclusive() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;
    let c = l.entry("Archer C", 15).await;
    let service = MatchResultService::new();

    let last_day = MatchResultData::new(jan(31), SideScore::new(a.id, 100), SideScore::new(b.id, 160));
    let first_day = MatchResultData::new(feb(1), SideScore::new(a.id, 100), SideScore::new(c.id, 160));

    assert_eq!(
        service.record_match_result(&l.conn, l.autumn.id, last_day).await?.round_id,
        l.january.id
    );
    assert_eq!(
        service.record_match_result(&l.conn, l.autumn.id, first_day).await?.round_id,
        l.february.id
    );
    Ok(())
}

#[tokio::test]
async fn missing_references_are_not_found() {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let off_table = l.entry("Archer Z", 150).await;
    let service = MatchResultService::new();

    let unknown_entry = MatchResultData::new(jan(5), SideScore::new(a.id, 100), SideScore::new(9999, 160));
    let err = service
        .record_match_result(&l.conn, l.autumn.id, unknown_entry)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Entry, _)));

    let no_handicap_row = MatchResultData::new(jan(5), SideScore::new(a.id, 100), SideScore::new(off_table.id, 160));
    let err = service
        .record_match_result(&l.conn, l.autumn.id, no_handicap_row)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Handicap, _)));

    let data = MatchResultData::new(jan(5), SideScore::new(a.id, 100), SideScore::new(off_table.id, 160));
    let err = service
        .record_match_result(&l.conn, 4242, data)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Stage, _)));

    assert_eq!(l.match_rows().await, 0);
    assert_eq!(l.score_rows().await, 0);
}

#[tokio::test]
async fn negative_points_are_rejected() {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;

    let data = MatchResultData::new(jan(5), SideScore::new(a.id, -1), SideScore::new(b.id, 160));
    let err = MatchResultService::new()
        .record_match_result(&l.conn, l.autumn.id, data)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(ValidationKind::NegativeMatchPoints, _)));
    assert!(err.is_rule_violation());
    assert_eq!(l.match_rows().await, 0);
}

#[tokio::test]
async fn points_too_large_for_the_allowance_are_rejected() {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;

    let data = MatchResultData::new(jan(5), SideScore::new(a.id, i32::MAX), SideScore::new(b.id, 160));
    let err = MatchResultService::new()
        .record_match_result(&l.conn, l.autumn.id, data)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(ValidationKind::MatchPointsOutOfRange, _)));
    assert!(err.is_rule_violation());
    assert_eq!(l.match_rows().await, 0);
    assert_eq!(l.score_rows().await, 0);
    assert_eq!(l.reload(&a).await.current_handicap, 20);
}

#[tokio::test]
async fn round_follows_the_stored_utc_instant() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;
    let service = MatchResultService::new();

    // still January 31st locally, already February 1st in UTC
    let late_evening = datetime!(2025-01-31 23:30 -02:00);
    let m = service
        .record_match_result(
            &l.conn,
            l.autumn.id,
            MatchResultData::new(late_evening, SideScore::new(a.id, 100), SideScore::new(b.id, 160)),
        )
        .await?;

    assert_eq!(m.shot_at, datetime!(2025-02-01 01:30 UTC));
    assert_eq!(m.round_id, l.february.id);
    let round = rounds::require_round(&l.conn, m.round_id).await?;
    assert!(round.covers(m.shot_at.date()));

    // resubmitting what was stored keeps the match where it is
    let resubmitted = service
        .update_match_result(
            &l.conn,
            m.id,
            l.autumn.id,
            MatchResultData::new(m.shot_at, SideScore::new(a.id, 100), SideScore::new(b.id, 160)),
        )
        .await?;
    assert_eq!(resubmitted.round_id, m.round_id);
    assert_eq!(resubmitted.shot_at, m.shot_at);
    Ok(())
}
