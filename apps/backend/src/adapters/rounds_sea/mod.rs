//! SeaORM adapter for rounds.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::optimistic_lock_error;
use crate::entities::rounds;
use crate::entities::DbHand;

pub mod dto;

pub use dto::{RoundCreate, RoundHandsUpdate};

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundCreate,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let active = rounds::ActiveModel {
        id: NotSet,
        match_id: Set(dto.match_id),
        round_no: Set(dto.round_no),
        participant_one_id: Set(dto.participant_one_id),
        participant_two_id: Set(dto.participant_two_id),
        hand_one: Set(DbHand::Unplayed),
        hand_two: Set(DbHand::Unplayed),
        winner_id: Set(None),
        finished: Set(false),
        lock_version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
        resolved_at: Set(None),
    };
    active.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find_by_id(round_id).one(conn).await
}

/// `SELECT ... FOR UPDATE` on the round row (no-op clause on SQLite).
pub async fn find_by_id_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find_by_id(round_id)
        .lock_exclusive()
        .one(conn)
        .await
}

pub async fn find_by_match_and_round_no<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    round_no: i32,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::MatchId.eq(match_id))
        .filter(rounds::Column::RoundNo.eq(round_no))
        .one(conn)
        .await
}

pub async fn list_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::MatchId.eq(match_id))
        .order_by_asc(rounds::Column::RoundNo)
        .all(conn)
        .await
}

pub async fn count_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::MatchId.eq(match_id))
        .count(conn)
        .await
}

/// Compare-and-set write of both hands plus the result columns.
pub async fn update_hands<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundHandsUpdate,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = rounds::Entity::update_many()
        .col_expr(rounds::Column::HandOne, Expr::value(dto.hand_one))
        .col_expr(rounds::Column::HandTwo, Expr::value(dto.hand_two))
        .col_expr(rounds::Column::WinnerId, Expr::value(dto.winner_id))
        .col_expr(rounds::Column::Finished, Expr::value(dto.finished))
        .col_expr(rounds::Column::ResolvedAt, Expr::value(dto.resolved_at))
        .col_expr(rounds::Column::UpdatedAt, Expr::value(now))
        .col_expr(
            rounds::Column::LockVersion,
            Expr::col(rounds::Column::LockVersion).add(1),
        )
        .filter(rounds::Column::Id.eq(dto.id))
        .filter(rounds::Column::LockVersion.eq(dto.expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, dto.id).await? {
            Some(current) => Err(optimistic_lock_error(
                "round",
                dto.id,
                dto.expected_version,
                current.lock_version,
            )),
            None => Err(sea_orm::DbErr::RecordNotFound(format!("round {}", dto.id))),
        };
    }

    find_by_id(conn, dto.id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("round {}", dto.id)))
}
