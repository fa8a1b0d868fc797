use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Participants {
    Table,
    Id,
    Username,
    CreatedAt,
}

#[derive(Iden)]
enum Matches {
    Table,
    Id,
    TotalRounds,
    CurrentRound,
    ParticipantOneId,
    ParticipantTwoId,
    ScoreOne,
    ScoreTwo,
    WinnerId,
    Finished,
    LockVersion,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Rounds {
    Table,
    Id,
    MatchId,
    RoundNo,
    ParticipantOneId,
    ParticipantTwoId,
    HandOne,
    HandTwo,
    WinnerId,
    Finished,
    LockVersion,
    CreatedAt,
    UpdatedAt,
    ResolvedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // participants
        manager
            .create_table(
                Table::create()
                    .table(Participants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Participants::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Participants::Username)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("participants_username_key")
                    .table(Participants::Table)
                    .col(Participants::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // matches
        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Matches::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Matches::TotalRounds)
                            .integer()
                            .not_null()
                            .check(Expr::col(Matches::TotalRounds).gte(1)),
                    )
                    .col(
                        ColumnDef::new(Matches::CurrentRound)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Matches::ParticipantOneId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::ParticipantTwoId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::ScoreOne)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Matches::ScoreTwo)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Matches::WinnerId).big_integer().null())
                    .col(
                        ColumnDef::new(Matches::Finished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Matches::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Matches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .check(
                        Expr::col(Matches::ParticipantOneId).ne(Expr::col(Matches::ParticipantTwoId)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_participant_one_id")
                            .from(Matches::Table, Matches::ParticipantOneId)
                            .to(Participants::Table, Participants::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_participant_two_id")
                            .from(Matches::Table, Matches::ParticipantTwoId)
                            .to(Participants::Table, Participants::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_winner_id")
                            .from(Matches::Table, Matches::WinnerId)
                            .to(Participants::Table, Participants::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // participant lookups for "list my matches"
        manager
            .create_index(
                Index::create()
                    .name("idx_matches_participant_one_id")
                    .table(Matches::Table)
                    .col(Matches::ParticipantOneId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_matches_participant_two_id")
                    .table(Matches::Table)
                    .col(Matches::ParticipantTwoId)
                    .to_owned(),
            )
            .await?;

        // rounds
        manager
            .create_table(
                Table::create()
                    .table(Rounds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rounds::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Rounds::MatchId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Rounds::RoundNo)
                            .integer()
                            .not_null()
                            .check(Expr::col(Rounds::RoundNo).gte(1)),
                    )
                    .col(
                        ColumnDef::new(Rounds::ParticipantOneId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rounds::ParticipantTwoId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rounds::HandOne)
                            .string_len(16)
                            .not_null()
                            .default("none"),
                    )
                    .col(
                        ColumnDef::new(Rounds::HandTwo)
                            .string_len(16)
                            .not_null()
                            .default("none"),
                    )
                    .col(ColumnDef::new(Rounds::WinnerId).big_integer().null())
                    .col(
                        ColumnDef::new(Rounds::Finished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Rounds::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Rounds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rounds::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rounds::ResolvedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rounds_match_id")
                            .from(Rounds::Table, Rounds::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rounds_participant_one_id")
                            .from(Rounds::Table, Rounds::ParticipantOneId)
                            .to(Participants::Table, Participants::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rounds_participant_two_id")
                            .from(Rounds::Table, Rounds::ParticipantTwoId)
                            .to(Participants::Table, Participants::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // one round per sequence number per match
        manager
            .create_index(
                Index::create()
                    .name("rounds_match_id_round_no_key")
                    .table(Rounds::Table)
                    .col(Rounds::MatchId)
                    .col(Rounds::RoundNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rounds::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Matches::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(Participants::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
