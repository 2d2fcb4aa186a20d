use league::entities::Side;
use league::errors::domain::{NotFoundKind, ValidationKind};
use league::repos::{pairings, rounds};
use league::{DomainError, MatchResultData, MatchResultService, SideScore};

use crate::support::fixtures::{feb, jan, league, mar};

#[tokio::test]
async fn update_flips_the_winner_in_place() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;
    let service = MatchResultService::new();

    let original = service
        .record_match_result(
            &l.conn,
            l.autumn.id,
            MatchResultData::new(jan(5), SideScore::new(a.id, 100), SideScore::new(b.id, 160)),
        )
        .await?;
    assert_eq!(original.winner_id, Some(b.id));

    let updated = service
        .update_match_result(
            &l.conn,
            original.id,
            l.autumn.id,
            MatchResultData::new(jan(5), SideScore::new(a.id, 300), SideScore::new(b.id, 160)),
        )
        .await?;

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.winner_id, Some(a.id));
    for side in [Side::Left, Side::Right] {
        assert_eq!(
            updated.side(side).map(|s| s.id),
            original.side(side).map(|s| s.id),
            "score rows are rewritten, not replaced"
        );
    }

    let left = updated.left().expect("left score");
    assert_eq!(left.match_points, 300);
    assert_eq!(left.match_points_adjusted, 380);
    assert_eq!(left.league_points, 3);
    assert_eq!(updated.right().map(|s| s.league_points), Some(0));

    assert_eq!(l.match_rows().await, 1);
    assert_eq!(l.score_rows().await, 2);
    Ok(())
}

#[tokio::test]
async fn update_moves_the_match_to_the_round_covering_the_new_date() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;
    let service = MatchResultService::new();

    let m = service
        .record_match_result(
            &l.conn,
            l.autumn.id,
            MatchResultData::new(jan(5), SideScore::new(a.id, 100), SideScore::new(b.id, 160)),
        )
        .await?;

    let moved = service
        .update_match_result(
            &l.conn,
            m.id,
            l.autumn.id,
            MatchResultData::new(feb(3), SideScore::new(a.id, 100), SideScore::new(b.id, 160)),
        )
        .await?;

    assert_eq!(moved.round_id, l.february.id);
    assert_eq!(moved.shot_at, feb(3));
    let round = rounds::require_round(&l.conn, moved.round_id).await?;
    assert!(round.covers(moved.shot_at.date()));
    Ok(())
}

#[tokio::test]
async fn update_scores_off_the_handicap_held_before_the_match() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;
    let c = l.entry("Archer C", 15).await;
    let service = MatchResultService::new();

    let first = service
        .record_match_result(
            &l.conn,
            l.autumn.id,
            MatchResultData::new(jan(5), SideScore::new(a.id, 1500), SideScore::new(b.id, 1000)),
        )
        .await?;
    assert_eq!(first.left().map(|s| s.handicap_after), Some(10));

    let second = service
        .record_match_result(
            &l.conn,
            l.autumn.id,
            MatchResultData::new(jan(10), SideScore::new(a.id, 900), SideScore::new(c.id, 900)),
        )
        .await?;
    assert_eq!(second.left().map(|s| s.handicap_before), Some(10));

    // nothing was shot before the first match, so it is rescored off the initial handicap
    let first = service
        .update_match_result(
            &l.conn,
            first.id,
            l.autumn.id,
            MatchResultData::new(jan(5), SideScore::new(a.id, 1400), SideScore::new(b.id, 1000)),
        )
        .await?;
    let left = first.left().expect("left score");
    assert_eq!(left.handicap_before, 20);
    assert_eq!(left.allowance, 80);
    assert_eq!(left.handicap_after, 18);

    // updates never move the entry
    assert_eq!(l.reload(&a).await.current_handicap, 10);

    // the second match now follows the rewritten first one
    let second = service
        .update_match_result(
            &l.conn,
            second.id,
            l.autumn.id,
            MatchResultData::new(jan(10), SideScore::new(a.id, 900), SideScore::new(c.id, 900)),
        )
        .await?;
    let left = second.left().expect("left score");
    assert_eq!(left.handicap_before, 18);
    assert_eq!(left.allowance, 64);
    assert_eq!(left.match_points_adjusted, 964);
    Ok(())
}

#[tokio::test]
async fn update_into_an_existing_pairing_is_rejected_and_rolled_back() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;
    let c = l.entry("Archer C", 15).await;
    let service = MatchResultService::new();

    service
        .record_match_result(
            &l.conn,
            l.autumn.id,
            MatchResultData::new(jan(5), SideScore::new(a.id, 100), SideScore::new(b.id, 160)),
        )
        .await?;
    let second = service
        .record_match_result(
            &l.conn,
            l.autumn.id,
            MatchResultData::new(jan(6), SideScore::new(a.id, 100), SideScore::new(c.id, 160)),
        )
        .await?;

    let err = service
        .update_match_result(
            &l.conn,
            second.id,
            l.autumn.id,
            MatchResultData::new(jan(6), SideScore::new(b.id, 500), SideScore::new(a.id, 100)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::DuplicatePairing, _)));

    let unchanged = service.find_match_result(&l.conn, second.id).await?;
    assert_eq!(unchanged.entry_ids(), second.entry_ids());
    assert_eq!(unchanged.left().map(|s| s.match_points), Some(100));
    assert_eq!(unchanged.winner_id, second.winner_id);

    let (stage_id, pair) = pairings::find_for_match(&l.conn, second.id)
        .await?
        .expect("pairing still claimed");
    assert_eq!(stage_id, l.autumn.id);
    assert!(pair.contains(c.id));
    Ok(())
}

#[tokio::test]
async fn update_keeps_its_own_pairing() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;
    let service = MatchResultService::new();

    let m = service
        .record_match_result(
            &l.conn,
            l.autumn.id,
            MatchResultData::new(jan(5), SideScore::new(a.id, 100), SideScore::new(b.id, 160)),
        )
        .await?;

    // same pair, sides swapped
    let updated = service
        .update_match_result(
            &l.conn,
            m.id,
            l.autumn.id,
            MatchResultData::new(jan(5), SideScore::new(b.id, 160), SideScore::new(a.id, 100)),
        )
        .await?;

    assert_eq!(updated.left().map(|s| s.entry_id), Some(b.id));
    assert_eq!(updated.winner_id, Some(b.id));
    Ok(())
}

#[tokio::test]
async fn update_rejections() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;
    let service = MatchResultService::new();

    let m = service
        .record_match_result(
            &l.conn,
            l.autumn.id,
            MatchResultData::new(jan(5), SideScore::new(a.id, 100), SideScore::new(b.id, 160)),
        )
        .await?;

    let solo = MatchResultData::new(jan(5), SideScore::new(a.id, 100), SideScore::new(a.id, 160));
    let err = service
        .update_match_result(&l.conn, m.id, l.autumn.id, solo)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::SoloMatch, _)));

    let data = MatchResultData::new(jan(5), SideScore::new(a.id, 100), SideScore::new(b.id, 160));
    let err = service
        .update_match_result(&l.conn, 9999, l.autumn.id, data)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::MatchResult, _)));

    let no_round = MatchResultData::new(mar(5), SideScore::new(a.id, 100), SideScore::new(b.id, 160));
    let err = service
        .update_match_result(&l.conn, m.id, l.autumn.id, no_round)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Round, _)));

    let after = service.find_match_result(&l.conn, m.id).await?;
    assert_eq!(after.round_id, l.january.id);
    assert_eq!(after.winner_id, Some(b.id));
    Ok(())
}
