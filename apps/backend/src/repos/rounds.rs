//! Round repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::rounds_sea as rounds_adapter;
use crate::domain::{Hand, RoundState, Slot};
use crate::entities::{rounds, DbHand};
use crate::errors::domain::{DomainError, NotFoundKind};

/// A stored round: domain state plus row bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    #[serde(flatten)]
    pub state: RoundState,
    #[serde(skip)]
    pub lock_version: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub resolved_at: Option<time::OffsetDateTime>,
}

impl From<DbHand> for Slot {
    fn from(value: DbHand) -> Self {
        match value {
            DbHand::Unplayed => Slot::Unplayed,
            DbHand::Rock => Slot::Played(Hand::Rock),
            DbHand::Paper => Slot::Played(Hand::Paper),
            DbHand::Scissors => Slot::Played(Hand::Scissors),
        }
    }
}

impl From<Slot> for DbHand {
    fn from(value: Slot) -> Self {
        match value {
            Slot::Unplayed => DbHand::Unplayed,
            Slot::Played(Hand::Rock) => DbHand::Rock,
            Slot::Played(Hand::Paper) => DbHand::Paper,
            Slot::Played(Hand::Scissors) => DbHand::Scissors,
        }
    }
}

impl From<rounds::Model> for Round {
    fn from(model: rounds::Model) -> Self {
        Self {
            state: RoundState {
                id: model.id,
                match_id: model.match_id,
                round_no: model.round_no,
                participant_one_id: model.participant_one_id,
                participant_two_id: model.participant_two_id,
                hand_one: Slot::from(model.hand_one),
                hand_two: Slot::from(model.hand_two),
                winner_id: model.winner_id,
                finished: model.finished,
            },
            lock_version: model.lock_version,
            created_at: model.created_at,
            resolved_at: model.resolved_at,
        }
    }
}

fn round_not_found(round_id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found"))
}

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    round_no: i32,
    participant_one_id: i64,
    participant_two_id: i64,
) -> Result<Round, DomainError> {
    let model = rounds_adapter::create_round(
        conn,
        rounds_adapter::RoundCreate {
            match_id,
            round_no,
            participant_one_id,
            participant_two_id,
        },
    )
    .await?;
    Ok(Round::from(model))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<Round>, DomainError> {
    let model = rounds_adapter::find_by_id(conn, round_id).await?;
    Ok(model.map(Round::from))
}

pub async fn require_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Round, DomainError> {
    find_by_id(conn, round_id)
        .await?
        .ok_or_else(|| round_not_found(round_id))
}

/// Load and row-lock the round for the rest of the transaction.
pub async fn lock_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Round, DomainError> {
    rounds_adapter::find_by_id_for_update(conn, round_id)
        .await?
        .map(Round::from)
        .ok_or_else(|| round_not_found(round_id))
}

pub async fn find_by_match_and_round_no<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    round_no: i32,
) -> Result<Option<Round>, DomainError> {
    let model = rounds_adapter::find_by_match_and_round_no(conn, match_id, round_no).await?;
    Ok(model.map(Round::from))
}

pub async fn list_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<Round>, DomainError> {
    let models = rounds_adapter::list_by_match(conn, match_id).await?;
    Ok(models.into_iter().map(Round::from).collect())
}

pub async fn count_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<u64, DomainError> {
    Ok(rounds_adapter::count_by_match(conn, match_id).await?)
}

/// Persist hands and result of `state`, guarded by `expected_version`.
/// `resolved_at` is stamped when the state is finished.
pub async fn save_hands<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    state: &RoundState,
    expected_version: i32,
) -> Result<Round, DomainError> {
    let resolved_at = state.finished.then(time::OffsetDateTime::now_utc);
    let model = rounds_adapter::update_hands(
        conn,
        rounds_adapter::RoundHandsUpdate {
            id: state.id,
            hand_one: DbHand::from(state.hand_one),
            hand_two: DbHand::from(state.hand_two),
            winner_id: state.winner_id,
            finished: state.finished,
            resolved_at,
            expected_version,
        },
    )
    .await?;
    Ok(Round::from(model))
}
