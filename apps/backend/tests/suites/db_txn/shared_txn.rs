use actix_web::test;
use rps_backend::db::require_db;
use rps_backend::db::txn::{with_txn, SharedTxn};
use rps_backend::repos::participants;
use rps_backend::AppError;

use crate::support::build_test_state;

#[actix_web::test]
async fn shared_txn_is_reused_and_left_open() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;

    let req = test::TestRequest::default().to_http_request();
    shared.inject(&req);

    let name = backend_test_support::unique_helpers::unique_username("shared");
    let insert_name = name.clone();
    let created = with_txn(Some(&req), &state, move |txn| {
        Box::pin(async move { Ok(participants::create_participant(txn, &insert_name).await?) })
    })
    .await?;

    // A second call on the same request sees the uncommitted row
    let lookup_name = name.clone();
    let seen = with_txn(Some(&req), &state, move |txn| {
        Box::pin(async move { Ok(participants::find_by_username(txn, &lookup_name).await?) })
    })
    .await?;
    assert_eq!(seen.map(|p| p.id), Some(created.id));

    drop(req);
    shared.rollback().await?;

    // Rolled back by the test, not committed by with_txn
    let after = with_txn(None, &state, move |txn| {
        Box::pin(async move { Ok(participants::find_by_username(txn, &name).await?) })
    })
    .await?;
    assert!(after.is_none());

    Ok(())
}
