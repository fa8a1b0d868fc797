//! SeaORM adapter for matches - generic over ConnectionTrait.

use sea_orm::sea_query::{Condition, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::optimistic_lock_error;
use crate::entities::matches;

pub mod dto;

pub use dto::{MatchCreate, MatchProgressUpdate};

/// Apply an update guarded by `lock_version`, then refetch.
///
/// Bumps `lock_version` and `updated_at`. A miss is reported as
/// RecordNotFound when the row is gone and as an optimistic-lock error
/// when the version moved.
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    expected_version: i32,
    configure_update: F,
) -> Result<matches::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(sea_orm::UpdateMany<matches::Entity>) -> sea_orm::UpdateMany<matches::Entity>,
{
    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(matches::Entity::update_many())
        .col_expr(matches::Column::UpdatedAt, Expr::value(now))
        .col_expr(
            matches::Column::LockVersion,
            Expr::col(matches::Column::LockVersion).add(1),
        )
        .filter(matches::Column::Id.eq(id))
        .filter(matches::Column::LockVersion.eq(expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, id).await? {
            Some(current) => Err(optimistic_lock_error(
                "match",
                id,
                expected_version,
                current.lock_version,
            )),
            None => Err(sea_orm::DbErr::RecordNotFound(format!("match {id}"))),
        };
    }

    require_match(conn, id).await
}

pub async fn create_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchCreate,
) -> Result<matches::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let active = matches::ActiveModel {
        id: NotSet,
        total_rounds: Set(dto.total_rounds),
        current_round: Set(1),
        participant_one_id: Set(dto.participant_one_id),
        participant_two_id: Set(dto.participant_two_id),
        score_one: Set(0),
        score_two: Set(0),
        winner_id: Set(None),
        finished: Set(false),
        lock_version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };
    active.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find_by_id(match_id).one(conn).await
}

/// Find match by ID or return RecordNotFound.
pub async fn require_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<matches::Model, sea_orm::DbErr> {
    find_by_id(conn, match_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("match {match_id}")))
}

/// `SELECT ... FOR UPDATE` on the match row. SQLite ignores the lock clause;
/// its single-writer transaction gives the same serialization.
pub async fn find_by_id_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find_by_id(match_id)
        .lock_exclusive()
        .one(conn)
        .await
}

/// Matches where the participant holds either slot, newest first.
pub async fn list_for_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
) -> Result<Vec<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(
            Condition::any()
                .add(matches::Column::ParticipantOneId.eq(participant_id))
                .add(matches::Column::ParticipantTwoId.eq(participant_id)),
        )
        .order_by_desc(matches::Column::CreatedAt)
        .order_by_desc(matches::Column::Id)
        .all(conn)
        .await
}

pub async fn update_progress<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchProgressUpdate,
) -> Result<matches::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, dto.id, dto.expected_version, |update| {
        update
            .col_expr(matches::Column::CurrentRound, Expr::value(dto.current_round))
            .col_expr(matches::Column::ScoreOne, Expr::value(dto.score_one))
            .col_expr(matches::Column::ScoreTwo, Expr::value(dto.score_two))
            .col_expr(matches::Column::WinnerId, Expr::value(dto.winner_id))
            .col_expr(matches::Column::Finished, Expr::value(dto.finished))
    })
    .await
}
