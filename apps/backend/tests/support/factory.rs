//! Seed data for integration tests.

use backend_test_support::unique_helpers::unique_username;
use rps_backend::domain::Hand;
use rps_backend::repos::matches::{self, Match};
use rps_backend::repos::participants::{self, Participant};
use rps_backend::repos::rounds::Round;
use rps_backend::services::RoundEngine;
use rps_backend::AppError;
use sea_orm::DatabaseTransaction;

pub async fn create_test_participant(
    txn: &DatabaseTransaction,
    prefix: &str,
) -> Result<Participant, AppError> {
    Ok(participants::create_participant(txn, &unique_username(prefix)).await?)
}

/// Two fresh participants and a match between them.
pub async fn create_test_match(
    txn: &DatabaseTransaction,
    total_rounds: i32,
) -> Result<(Match, Participant, Participant), AppError> {
    let one = create_test_participant(txn, "one").await?;
    let two = create_test_participant(txn, "two").await?;
    let created = matches::create_match(txn, total_rounds, one.id, two.id).await?;
    Ok((created, one, two))
}

/// Open the next round and play both hands.
pub async fn play_round(
    txn: &DatabaseTransaction,
    m: &Match,
    hand_one: Hand,
    hand_two: Hand,
) -> Result<Round, AppError> {
    let engine = RoundEngine::new();
    let round = engine.open_round(txn, m.state.id).await?;
    engine
        .submit_hand(txn, round.state.id, m.state.participant_one_id, hand_one)
        .await?;
    let done = engine
        .submit_hand(txn, round.state.id, m.state.participant_two_id, hand_two)
        .await?;
    Ok(done.round)
}
