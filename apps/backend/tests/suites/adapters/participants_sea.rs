use backend_test_support::unique_helpers::unique_username;
use rps_backend::adapters::participants_sea::{self, ParticipantCreate};
use rps_backend::db::require_db;
use rps_backend::db::txn::SharedTxn;
use rps_backend::errors::domain::{ConflictKind, DomainError};
use rps_backend::infra::db_errors::map_db_err;
use rps_backend::AppError;

use crate::support::build_test_state;

#[tokio::test]
async fn create_then_find_by_id_and_username() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let txn = shared.transaction();

    let name = unique_username("finder");
    let created = participants_sea::create_participant(txn, ParticipantCreate::new(&name)).await?;
    assert!(created.id > 0);

    let by_id = participants_sea::find_by_id(txn, created.id).await?;
    assert_eq!(by_id.map(|p| p.username), Some(name.clone()));

    let by_name = participants_sea::find_by_username(txn, &name).await?;
    assert_eq!(by_name.map(|p| p.id), Some(created.id));

    assert!(participants_sea::find_by_username(txn, "nobody-here")
        .await?
        .is_none());

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn duplicate_username_maps_to_unique_username() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let txn = shared.transaction();

    let name = unique_username("dupe");
    participants_sea::create_participant(txn, ParticipantCreate::new(&name)).await?;

    let err = participants_sea::create_participant(txn, ParticipantCreate::new(&name))
        .await
        .unwrap_err();
    assert!(matches!(
        map_db_err(err),
        DomainError::Conflict(ConflictKind::UniqueUsername, _)
    ));

    shared.rollback().await?;
    Ok(())
}
