use league::repos::standings::Standing;
use league::{
    DomainError, MatchResultData, MatchResultService, SideScore, StandingService,
};

use crate::support::fixtures::{jan, league, mar};
use crate::support::recording_aggregator::{Call, RecordingAggregator};

fn row(table: &[Standing], entry_id: i64) -> &Standing {
    table
        .iter()
        .find(|s| s.entry_id == entry_id)
        .expect("entry has a standing")
}

#[tokio::test]
async fn standings_follow_record_update_and_remove() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;
    let service = MatchResultService::new();
    let standings = StandingService::new();

    let m = service
        .record_match_result(
            &l.conn,
            l.autumn.id,
            MatchResultData::new(jan(5), SideScore::new(a.id, 100), SideScore::new(b.id, 160)),
        )
        .await?;

    let table = standings.standings_for_stage(&l.conn, l.autumn.id).await?;
    assert_eq!(table.iter().map(|s| s.entry_id).collect::<Vec<_>>(), vec![b.id, a.id]);
    let winner = row(&table, b.id);
    assert_eq!((winner.played, winner.won, winner.drawn, winner.lost), (1, 1, 0, 0));
    assert_eq!(winner.total_points, 3);
    assert_eq!(winner.match_points_adjusted, 200);
    let loser = row(&table, a.id);
    assert_eq!((loser.played, loser.lost, loser.total_points), (1, 1, 0));
    assert_eq!(loser.match_points_adjusted, 180);

    service
        .update_match_result(
            &l.conn,
            m.id,
            l.autumn.id,
            MatchResultData::new(jan(5), SideScore::new(a.id, 300), SideScore::new(b.id, 160)),
        )
        .await?;

    let table = standings.standings_for_stage(&l.conn, l.autumn.id).await?;
    assert_eq!(table[0].entry_id, a.id);
    assert_eq!(row(&table, a.id).won, 1);
    assert_eq!(row(&table, a.id).match_points_adjusted, 380);
    assert_eq!(row(&table, b.id).lost, 1);
    assert_eq!(row(&table, b.id).played, 1);

    service.remove_match_result(&l.conn, m.id).await?;

    let table = standings.standings_for_stage(&l.conn, l.autumn.id).await?;
    for s in &table {
        assert_eq!(*s, Standing::empty(l.autumn.id, s.entry_id));
    }
    Ok(())
}

#[tokio::test]
async fn draws_and_bonuses_count_towards_the_total() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;
    let c = l.entry("Archer C", 15).await;
    let service = MatchResultService::new();

    // drawn handicap hit: 1 league point and 1 bonus point each
    service
        .record_match_result(
            &l.conn,
            l.autumn.id,
            MatchResultData::new(jan(5), SideScore::new(a.id, 1370), SideScore::new(b.id, 1410)),
        )
        .await?;
    // close loss for C
    service
        .record_match_result(
            &l.conn,
            l.autumn.id,
            MatchResultData::new(jan(8), SideScore::new(b.id, 300), SideScore::new(c.id, 296)),
        )
        .await?;

    let table = StandingService::new()
        .standings_for_stage(&l.conn, l.autumn.id)
        .await?;
    let b_row = row(&table, b.id);
    assert_eq!((b_row.played, b_row.won, b_row.drawn), (2, 1, 1));
    assert_eq!((b_row.league_points, b_row.bonus_points, b_row.total_points), (4, 1, 5));

    let a_row = row(&table, a.id);
    assert_eq!((a_row.drawn, a_row.total_points), (1, 2));

    let c_row = row(&table, c.id);
    assert_eq!((c_row.lost, c_row.bonus_points, c_row.total_points), (1, 1, 1));

    assert_eq!(
        table.iter().map(|s| s.entry_id).collect::<Vec<_>>(),
        vec![b.id, a.id, c.id]
    );
    Ok(())
}

#[tokio::test]
async fn standings_are_kept_per_stage() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;
    let service = MatchResultService::new();

    service
        .record_match_result(
            &l.conn,
            l.spring.id,
            MatchResultData::new(mar(5), SideScore::new(a.id, 100), SideScore::new(b.id, 160)),
        )
        .await?;

    let standings = StandingService::new();
    assert!(standings
        .standings_for_stage(&l.conn, l.autumn.id)
        .await?
        .is_empty());
    assert_eq!(
        standings.standings_for_stage(&l.conn, l.spring.id).await?.len(),
        2
    );
    Ok(())
}

#[tokio::test]
async fn recompute_is_idempotent() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;

    MatchResultService::new()
        .record_match_result(
            &l.conn,
            l.autumn.id,
            MatchResultData::new(jan(5), SideScore::new(a.id, 100), SideScore::new(b.id, 160)),
        )
        .await?;

    let standings = StandingService::new();
    let once = standings.recompute(&l.conn, l.autumn.id, b.id).await?;
    let twice = standings.recompute(&l.conn, l.autumn.id, b.id).await?;
    assert_eq!(once, twice);
    assert_eq!(once.total_points, 3);
    Ok(())
}

#[tokio::test]
async fn workflow_notifies_the_aggregator() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;
    let service = MatchResultService::with_aggregator(RecordingAggregator::default());

    let m = service
        .record_match_result(
            &l.conn,
            l.autumn.id,
            MatchResultData::new(jan(5), SideScore::new(b.id, 100), SideScore::new(a.id, 160)),
        )
        .await?;
    service
        .update_match_result(
            &l.conn,
            m.id,
            l.autumn.id,
            MatchResultData::new(jan(5), SideScore::new(b.id, 300), SideScore::new(a.id, 160)),
        )
        .await?;
    service.remove_match_result(&l.conn, m.id).await?;
    // already removed: nothing to retract
    service.remove_match_result(&l.conn, m.id).await?;

    let pair = vec![a.id, b.id];
    assert_eq!(
        service.aggregator().calls(),
        vec![
            Call::Apply { match_id: m.id, entry_ids: pair.clone() },
            Call::Retract { match_id: m.id, entry_ids: pair.clone() },
            Call::Apply { match_id: m.id, entry_ids: pair.clone() },
            Call::Retract { match_id: m.id, entry_ids: pair },
        ]
    );

    // a custom aggregator replaces the built-in table
    assert!(StandingService::new()
        .standings_for_stage(&l.conn, l.autumn.id)
        .await?
        .is_empty());
    Ok(())
}

#[tokio::test]
async fn rejected_workflow_does_not_reach_the_aggregator() {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let service = MatchResultService::with_aggregator(RecordingAggregator::default());

    let result = service
        .record_match_result(
            &l.conn,
            l.autumn.id,
            MatchResultData::new(jan(5), SideScore::new(a.id, 100), SideScore::new(a.id, 160)),
        )
        .await;

    assert!(result.is_err());
    assert!(service.aggregator().calls().is_empty());
}
