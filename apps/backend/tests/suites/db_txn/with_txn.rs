use rps_backend::db::retry::RetryPolicy;
use rps_backend::db::txn::with_txn;
use rps_backend::errors::ErrorCode;
use rps_backend::repos::participants;
use rps_backend::state::app_state::AppState;
use rps_backend::AppError;

use crate::support::build_test_state;

#[tokio::test]
async fn err_rolls_back_writes() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let name = backend_test_support::unique_helpers::unique_username("ghost");

    let inner_name = name.clone();
    let result: Result<(), AppError> = with_txn(None, &state, move |txn| {
        Box::pin(async move {
            participants::create_participant(txn, &inner_name).await?;
            Err(AppError::internal("boom after insert"))
        })
    })
    .await;
    assert!(result.is_err());

    let found = with_txn(None, &state, move |txn| {
        Box::pin(async move { Ok(participants::find_by_username(txn, &name).await?) })
    })
    .await?;
    assert!(found.is_none(), "write must not survive an Err");

    Ok(())
}

#[tokio::test]
async fn without_db_is_unavailable() {
    let state = AppState::without_db(RetryPolicy::default());

    let err = with_txn(None, &state, |_txn| Box::pin(async { Ok(()) }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DbUnavailable);
    assert_eq!(err.status().as_u16(), 503);
}
