use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "total_rounds")]
    pub total_rounds: i32,
    /// 1-based; advances past `total_rounds` once the last round resolves
    #[sea_orm(column_name = "current_round")]
    pub current_round: i32,
    #[sea_orm(column_name = "participant_one_id")]
    pub participant_one_id: i64,
    #[sea_orm(column_name = "participant_two_id")]
    pub participant_two_id: i64,
    #[sea_orm(column_name = "score_one")]
    pub score_one: i32,
    #[sea_orm(column_name = "score_two")]
    pub score_two: i32,
    #[sea_orm(column_name = "winner_id")]
    pub winner_id: Option<i64>,
    pub finished: bool,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rounds::Entity")]
    Rounds,
}

impl Related<super::rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rounds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
