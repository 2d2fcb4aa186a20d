use league::domain::PairKey;
use league::entities::MatchFormat;
use league::errors::domain::ConflictKind;
use league::repos::{entries, match_results, pairings};
use league::DomainError;

use crate::support::fixtures::{feb, jan, league};

#[tokio::test]
async fn stale_lock_version_is_a_retryable_conflict() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;

    let updated = entries::update_current_handicap(&l.conn, a.id, 18, a.lock_version).await?;
    assert_eq!(updated.current_handicap, 18);
    assert_eq!(updated.lock_version, a.lock_version + 1);

    // a second writer still holding the old version
    let err = entries::update_current_handicap(&l.conn, a.id, 16, a.lock_version)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::OptimisticLock, _)));
    assert!(err.is_retryable());
    assert_eq!(l.reload(&a).await.current_handicap, 18);

    let err = entries::update_current_handicap(&l.conn, 9999, 16, 1)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

#[tokio::test]
async fn second_claim_on_a_stage_pairing_is_a_retryable_conflict() -> Result<(), DomainError> {
    let l = league().await;
    let a = l.entry("Archer A", 20).await;
    let b = l.entry("Archer B", 15).await;

    let first =
        match_results::create_shell(&l.conn, l.january.id, MatchFormat::Scores, jan(5), None)
            .await?;
    let second =
        match_results::create_shell(&l.conn, l.february.id, MatchFormat::Scores, feb(2), None)
            .await?;

    pairings::claim(&l.conn, l.autumn.id, PairKey::new(a.id, b.id)?, first.id).await?;
    let err = pairings::claim(&l.conn, l.autumn.id, PairKey::new(b.id, a.id)?, second.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::DuplicatePairing, _)));
    assert!(err.is_retryable());

    // another stage has its own guard
    pairings::claim(&l.conn, l.spring.id, PairKey::new(a.id, b.id)?, second.id).await?;
    Ok(())
}
