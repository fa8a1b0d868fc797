use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stored form of a hand slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum DbHand {
    #[sea_orm(string_value = "none")]
    Unplayed,
    #[sea_orm(string_value = "rock")]
    Rock,
    #[sea_orm(string_value = "paper")]
    Paper,
    #[sea_orm(string_value = "scissors")]
    Scissors,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "match_id")]
    pub match_id: i64,
    #[sea_orm(column_name = "round_no")]
    pub round_no: i32,
    #[sea_orm(column_name = "participant_one_id")]
    pub participant_one_id: i64,
    #[sea_orm(column_name = "participant_two_id")]
    pub participant_two_id: i64,
    #[sea_orm(column_name = "hand_one")]
    pub hand_one: DbHand,
    #[sea_orm(column_name = "hand_two")]
    pub hand_two: DbHand,
    #[sea_orm(column_name = "winner_id")]
    pub winner_id: Option<i64>,
    pub finished: bool,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "resolved_at")]
    pub resolved_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matches::Entity",
        from = "Column::MatchId",
        to = "super::matches::Column::Id"
    )]
    Match,
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Match.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
