//! Match repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::matches_sea as matches_adapter;
use crate::domain::MatchState;
use crate::entities::matches;
use crate::errors::domain::{DomainError, NotFoundKind};

/// A stored match: domain state plus row bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    #[serde(flatten)]
    pub state: MatchState,
    #[serde(skip)]
    pub lock_version: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

impl From<matches::Model> for Match {
    fn from(model: matches::Model) -> Self {
        Self {
            state: MatchState {
                id: model.id,
                total_rounds: model.total_rounds,
                current_round: model.current_round,
                participant_one_id: model.participant_one_id,
                participant_two_id: model.participant_two_id,
                score_one: model.score_one,
                score_two: model.score_two,
                winner_id: model.winner_id,
                finished: model.finished,
            },
            lock_version: model.lock_version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn match_not_found(match_id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found"))
}

pub async fn create_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    total_rounds: i32,
    participant_one_id: i64,
    participant_two_id: i64,
) -> Result<Match, DomainError> {
    let model = matches_adapter::create_match(
        conn,
        matches_adapter::MatchCreate::new(total_rounds, participant_one_id, participant_two_id),
    )
    .await?;
    Ok(Match::from(model))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<Match>, DomainError> {
    let model = matches_adapter::find_by_id(conn, match_id).await?;
    Ok(model.map(Match::from))
}

pub async fn require_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Match, DomainError> {
    find_by_id(conn, match_id)
        .await?
        .ok_or_else(|| match_not_found(match_id))
}

/// Load and row-lock the match for the rest of the transaction.
pub async fn lock_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Match, DomainError> {
    matches_adapter::find_by_id_for_update(conn, match_id)
        .await?
        .map(Match::from)
        .ok_or_else(|| match_not_found(match_id))
}

pub async fn list_for_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
) -> Result<Vec<Match>, DomainError> {
    let models = matches_adapter::list_for_participant(conn, participant_id).await?;
    Ok(models.into_iter().map(Match::from).collect())
}

/// Persist score/counter/finish fields of `state`, guarded by `expected_version`.
pub async fn save_progress<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    state: &MatchState,
    expected_version: i32,
) -> Result<Match, DomainError> {
    let model = matches_adapter::update_progress(
        conn,
        matches_adapter::MatchProgressUpdate {
            id: state.id,
            current_round: state.current_round,
            score_one: state.score_one,
            score_two: state.score_two,
            winner_id: state.winner_id,
            finished: state.finished,
            expected_version,
        },
    )
    .await?;
    Ok(Match::from(model))
}
