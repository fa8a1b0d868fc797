use rps_backend::adapters::rounds_sea::{self, RoundCreate, RoundHandsUpdate};
use rps_backend::db::require_db;
use rps_backend::db::txn::SharedTxn;
use rps_backend::entities::{rounds, DbHand};
use rps_backend::errors::domain::{DomainError, InfraErrorKind};
use rps_backend::errors::ErrorCode;
use rps_backend::infra::db_errors::map_db_err;
use rps_backend::repos::matches::Match;
use rps_backend::repos::rounds as rounds_repo;
use rps_backend::AppError;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter};

use crate::support::build_test_state;
use crate::support::factory::create_test_match;

fn round_for(m: &Match, round_no: i32) -> RoundCreate {
    RoundCreate {
        match_id: m.state.id,
        round_no,
        participant_one_id: m.state.participant_one_id,
        participant_two_id: m.state.participant_two_id,
    }
}

async fn seeded(txn: &DatabaseTransaction) -> Result<Match, AppError> {
    Ok(create_test_match(txn, 3).await?.0)
}

#[tokio::test]
async fn new_round_has_unplayed_slots() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let txn = shared.transaction();

    let m = seeded(txn).await?;
    let row = rounds_sea::create_round(txn, round_for(&m, 1)).await?;

    assert_eq!(row.hand_one, DbHand::Unplayed);
    assert_eq!(row.hand_two, DbHand::Unplayed);
    assert!(!row.finished);
    assert_eq!(row.winner_id, None);
    assert_eq!(row.resolved_at, None);
    assert_eq!(row.lock_version, 1);

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn list_orders_by_round_no_and_count_matches() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let txn = shared.transaction();

    let m = seeded(txn).await?;
    for n in [3, 1, 2] {
        rounds_sea::create_round(txn, round_for(&m, n)).await?;
    }

    let listed: Vec<i32> = rounds_sea::list_by_match(txn, m.state.id)
        .await?
        .into_iter()
        .map(|r| r.round_no)
        .collect();
    assert_eq!(listed, vec![1, 2, 3]);
    assert_eq!(rounds_sea::count_by_match(txn, m.state.id).await?, 3);

    let second = rounds_sea::find_by_match_and_round_no(txn, m.state.id, 2).await?;
    assert_eq!(second.map(|r| r.round_no), Some(2));
    assert!(rounds_sea::find_by_match_and_round_no(txn, m.state.id, 9)
        .await?
        .is_none());

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn update_hands_bumps_version_and_rejects_stale_writes() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let txn = shared.transaction();

    let m = seeded(txn).await?;
    let row = rounds_sea::create_round(txn, round_for(&m, 1)).await?;

    let first = rounds_sea::update_hands(
        txn,
        RoundHandsUpdate {
            id: row.id,
            hand_one: DbHand::Rock,
            hand_two: DbHand::Unplayed,
            winner_id: None,
            finished: false,
            resolved_at: None,
            expected_version: row.lock_version,
        },
    )
    .await?;
    assert_eq!(first.hand_one, DbHand::Rock);
    assert_eq!(first.lock_version, row.lock_version + 1);

    let stale = rounds_sea::update_hands(
        txn,
        RoundHandsUpdate {
            id: row.id,
            hand_one: DbHand::Paper,
            hand_two: DbHand::Unplayed,
            winner_id: None,
            finished: false,
            resolved_at: None,
            expected_version: row.lock_version,
        },
    )
    .await
    .unwrap_err();
    assert!(map_db_err(stale).is_retryable());

    let current = rounds_sea::find_by_id(txn, row.id).await?;
    assert_eq!(current.map(|r| r.hand_one), Some(DbHand::Rock));

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn duplicate_round_number_is_retryable_conflict() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let txn = shared.transaction();

    let m = seeded(txn).await?;
    rounds_sea::create_round(txn, round_for(&m, 1)).await?;
    let err = rounds_sea::create_round(txn, round_for(&m, 1))
        .await
        .unwrap_err();
    assert!(map_db_err(err).is_retryable());

    let _ = shared.rollback().await;
    Ok(())
}

#[tokio::test]
async fn undecodable_hand_surfaces_as_data_corruption() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let txn = shared.transaction();

    let m = seeded(txn).await?;
    let row = rounds_sea::create_round(txn, round_for(&m, 1)).await?;

    rounds::Entity::update_many()
        .col_expr(rounds::Column::HandOne, Expr::value("lizard"))
        .filter(rounds::Column::Id.eq(row.id))
        .exec(txn)
        .await?;

    let err = rounds_repo::find_by_id(txn, row.id).await.unwrap_err();
    assert!(
        matches!(err, DomainError::Infra(InfraErrorKind::DataCorruption, _)),
        "got {err:?}"
    );
    assert!(!err.is_retryable());
    assert_eq!(AppError::from(err).code(), ErrorCode::DataCorruption);

    let _ = shared.rollback().await;
    Ok(())
}
