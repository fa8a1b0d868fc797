//! SeaORM adapter for participants.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::participants;

pub mod dto;

pub use dto::ParticipantCreate;

pub async fn create_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ParticipantCreate,
) -> Result<participants::Model, sea_orm::DbErr> {
    let active = participants::ActiveModel {
        id: NotSet,
        username: Set(dto.username),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };
    active.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
) -> Result<Option<participants::Model>, sea_orm::DbErr> {
    participants::Entity::find_by_id(participant_id).one(conn).await
}

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<participants::Model>, sea_orm::DbErr> {
    participants::Entity::find()
        .filter(participants::Column::Username.eq(username))
        .one(conn)
        .await
}
