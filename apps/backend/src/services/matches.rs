//! Match service: creation and reads.

use sea_orm::DatabaseTransaction;
use serde::Serialize;
use tracing::info;

use crate::domain::validate_match_setup;
use crate::error::AppError;
use crate::repos::matches::{self, Match};
use crate::repos::participants;
use crate::repos::rounds::{self, Round};

/// A match together with its rounds in sequence order.
#[derive(Debug, Clone, Serialize)]
pub struct MatchDetail {
    #[serde(flatten)]
    pub summary: Match,
    pub rounds: Vec<Round>,
}

pub async fn create_match(
    txn: &DatabaseTransaction,
    total_rounds: i32,
    participant_one_id: i64,
    participant_two_id: i64,
) -> Result<Match, AppError> {
    validate_match_setup(total_rounds, participant_one_id, participant_two_id)?;

    participants::require_participant(txn, participant_one_id).await?;
    participants::require_participant(txn, participant_two_id).await?;

    let created =
        matches::create_match(txn, total_rounds, participant_one_id, participant_two_id).await?;

    info!(
        match_id = created.state.id,
        total_rounds,
        participant_one_id,
        participant_two_id,
        "Match created"
    );
    Ok(created)
}

pub async fn get_match(txn: &DatabaseTransaction, match_id: i64) -> Result<Match, AppError> {
    Ok(matches::require_match(txn, match_id).await?)
}

pub async fn get_match_detail(
    txn: &DatabaseTransaction,
    match_id: i64,
) -> Result<MatchDetail, AppError> {
    let summary = matches::require_match(txn, match_id).await?;
    let rounds = rounds::list_by_match(txn, match_id).await?;
    Ok(MatchDetail { summary, rounds })
}

pub async fn get_round(txn: &DatabaseTransaction, round_id: i64) -> Result<Round, AppError> {
    Ok(rounds::require_round(txn, round_id).await?)
}
