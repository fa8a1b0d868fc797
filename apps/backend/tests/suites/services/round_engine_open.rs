use rps_backend::db::require_db;
use rps_backend::db::txn::SharedTxn;
use rps_backend::domain::Hand;
use rps_backend::errors::ErrorCode;
use rps_backend::repos::matches;
use rps_backend::services::RoundEngine;
use rps_backend::AppError;

use crate::support::build_test_state;
use crate::support::factory::{create_test_match, play_round};

#[tokio::test]
async fn first_round_is_numbered_one_and_seats_match_participants() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let txn = shared.transaction();

    let (m, one, two) = create_test_match(txn, 3).await?;
    let round = RoundEngine::new().open_round(txn, m.state.id).await?;

    assert_eq!(round.state.round_no, 1);
    assert_eq!(round.state.match_id, m.state.id);
    assert_eq!(round.state.participant_one_id, one.id);
    assert_eq!(round.state.participant_two_id, two.id);
    assert!(!round.state.hand_one.is_played());
    assert!(!round.state.hand_two.is_played());
    assert!(!round.state.finished);
    assert_eq!(round.state.winner_id, None);

    // Opening a round does not touch the match
    let reloaded = matches::require_match(txn, m.state.id).await?;
    assert_eq!(reloaded.state, m.state);
    assert_eq!(reloaded.lock_version, m.lock_version);

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn second_open_while_round_unresolved_is_round_in_progress() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let txn = shared.transaction();

    let (m, _, _) = create_test_match(txn, 3).await?;
    let engine = RoundEngine::new();
    engine.open_round(txn, m.state.id).await?;

    let err = engine.open_round(txn, m.state.id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoundInProgress);
    assert_eq!(err.status().as_u16(), 409);

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn all_rounds_opened_is_round_limit_reached() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let txn = shared.transaction();

    let (m, _, _) = create_test_match(txn, 1).await?;
    let engine = RoundEngine::new();
    engine.open_round(txn, m.state.id).await?;

    // The limit is checked before the in-progress rule
    let err = engine.open_round(txn, m.state.id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoundLimitReached);

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn next_round_follows_resolution() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let txn = shared.transaction();

    let (m, _, _) = create_test_match(txn, 3).await?;
    play_round(txn, &m, Hand::Rock, Hand::Rock).await?;

    let round = RoundEngine::new().open_round(txn, m.state.id).await?;
    assert_eq!(round.state.round_no, 2);

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn finished_match_refuses_new_rounds() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let txn = shared.transaction();

    let (m, _, _) = create_test_match(txn, 1).await?;
    play_round(txn, &m, Hand::Paper, Hand::Rock).await?;

    let err = RoundEngine::new()
        .open_round(txn, m.state.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::MatchFinished);

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn unknown_match_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;

    let err = RoundEngine::new()
        .open_round(shared.transaction(), 999_999)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::MatchNotFound);
    assert_eq!(err.status().as_u16(), 404);

    shared.rollback().await?;
    Ok(())
}
