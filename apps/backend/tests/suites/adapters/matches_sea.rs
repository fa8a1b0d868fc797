use rps_backend::adapters::matches_sea::{self, MatchCreate, MatchProgressUpdate};
use rps_backend::db::require_db;
use rps_backend::db::txn::SharedTxn;
use rps_backend::errors::domain::{ConflictKind, DomainError};
use rps_backend::infra::db_errors::map_db_err;
use rps_backend::AppError;

use crate::support::build_test_state;
use crate::support::factory::create_test_participant;

#[tokio::test]
async fn new_match_defaults() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let txn = shared.transaction();

    let one = create_test_participant(txn, "m1").await?;
    let two = create_test_participant(txn, "m2").await?;
    let row = matches_sea::create_match(txn, MatchCreate::new(3, one.id, two.id)).await?;

    assert_eq!(row.total_rounds, 3);
    assert_eq!(row.current_round, 1);
    assert_eq!((row.score_one, row.score_two), (0, 0));
    assert_eq!(row.winner_id, None);
    assert!(!row.finished);
    assert_eq!(row.lock_version, 1);

    let locked = matches_sea::find_by_id_for_update(txn, row.id).await?;
    assert_eq!(locked.map(|m| m.id), Some(row.id));

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn update_progress_is_compare_and_set() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let txn = shared.transaction();

    let one = create_test_participant(txn, "c1").await?;
    let two = create_test_participant(txn, "c2").await?;
    let row = matches_sea::create_match(txn, MatchCreate::new(1, one.id, two.id)).await?;

    let update = |expected_version| MatchProgressUpdate {
        id: row.id,
        current_round: 2,
        score_one: 1,
        score_two: 0,
        winner_id: Some(one.id),
        finished: true,
        expected_version,
    };

    let updated = matches_sea::update_progress(txn, update(row.lock_version)).await?;
    assert_eq!(updated.lock_version, row.lock_version + 1);
    assert!(updated.finished);
    assert_eq!(updated.winner_id, Some(one.id));

    // Replaying with the stale version matches no row
    let err = matches_sea::update_progress(txn, update(row.lock_version))
        .await
        .unwrap_err();
    let mapped = map_db_err(err);
    assert!(matches!(
        mapped,
        DomainError::Conflict(ConflictKind::OptimisticLock, _)
    ));
    assert!(mapped.is_retryable());

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn update_of_missing_match_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;

    let err = matches_sea::update_progress(
        shared.transaction(),
        MatchProgressUpdate {
            id: 31_337,
            current_round: 2,
            score_one: 0,
            score_two: 0,
            winner_id: None,
            finished: false,
            expected_version: 1,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, sea_orm::DbErr::RecordNotFound(_)));

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn match_with_unknown_participant_violates_foreign_key() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let txn = shared.transaction();

    let one = create_test_participant(txn, "fk").await?;
    let err = matches_sea::create_match(txn, MatchCreate::new(3, one.id, 8_888_888))
        .await
        .unwrap_err();
    assert!(matches!(map_db_err(err), DomainError::Validation(_, _)));

    // Postgres aborts the transaction after a failed statement; drop it
    let _ = shared.rollback().await;
    Ok(())
}
