use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Competitions {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Stages {
    Table,
    Id,
    CompetitionId,
    Name,
    Sequence,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Rounds {
    Table,
    Id,
    StageId,
    Name,
    StartsOn,
    EndsOn,
    Sequence,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum Entries {
    Table,
    Id,
    CompetitionId,
    Name,
    BowStyle,
    InitialHandicap,
    CurrentHandicap,
    LockVersion,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Handicaps {
    Table,
    Id,
    BowStyle,
    Number,
    MatchAllowance,
}

#[derive(Iden)]
enum MatchResults {
    Table,
    Id,
    RoundId,
    WinnerId,
    NextMatchResultId,
    Format,
    ShotAt,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum SetResults {
    Table,
    Id,
    MatchResultId,
    WinnerId,
    Sequence,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum Scores {
    Table,
    Id,
    ResultType,
    ResultId,
    EntryId,
    Side,
    HandicapBefore,
    HandicapAfter,
    Allowance,
    MatchPoints,
    MatchPointsAdjusted,
    BonusPoints,
    LeaguePoints,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum MatchPairings {
    Table,
    Id,
    StageId,
    LowEntryId,
    HighEntryId,
    MatchResultId,
    CreatedAt,
}

#[derive(Iden)]
enum Standings {
    Table,
    Id,
    StageId,
    EntryId,
    Played,
    Won,
    Drawn,
    Lost,
    LeaguePoints,
    BonusPoints,
    TotalPoints,
    MatchPointsAdjusted,
    UpdatedAt,
}

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

fn ts_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

fn tombstone_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .null()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // competitions
        manager
            .create_table(
                Table::create()
                    .table(Competitions::Table)
                    .if_not_exists()
                    .col(id_col(Competitions::Id))
                    .col(ColumnDef::new(Competitions::Name).string().not_null())
                    .col(ts_col(Competitions::CreatedAt))
                    .col(ts_col(Competitions::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // stages
        manager
            .create_table(
                Table::create()
                    .table(Stages::Table)
                    .if_not_exists()
                    .col(id_col(Stages::Id))
                    .col(
                        ColumnDef::new(Stages::CompetitionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Stages::Name).string().not_null())
                    .col(ColumnDef::new(Stages::Sequence).small_integer().not_null())
                    .col(ts_col(Stages::CreatedAt))
                    .col(ts_col(Stages::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stages_competition_id")
                            .from(Stages::Table, Stages::CompetitionId)
                            .to(Competitions::Table, Competitions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // rounds
        manager
            .create_table(
                Table::create()
                    .table(Rounds::Table)
                    .if_not_exists()
                    .col(id_col(Rounds::Id))
                    .col(ColumnDef::new(Rounds::StageId).big_integer().not_null())
                    .col(ColumnDef::new(Rounds::Name).string().not_null())
                    .col(ColumnDef::new(Rounds::StartsOn).date().not_null())
                    .col(ColumnDef::new(Rounds::EndsOn).date().not_null())
                    .col(ColumnDef::new(Rounds::Sequence).small_integer().not_null())
                    .col(ts_col(Rounds::CreatedAt))
                    .col(ts_col(Rounds::UpdatedAt))
                    .col(tombstone_col(Rounds::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rounds_stage_id")
                            .from(Rounds::Table, Rounds::StageId)
                            .to(Stages::Table, Stages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_rounds_stage_window")
                    .table(Rounds::Table)
                    .col(Rounds::StageId)
                    .col(Rounds::StartsOn)
                    .col(Rounds::EndsOn)
                    .to_owned(),
            )
            .await?;

        // entries
        manager
            .create_table(
                Table::create()
                    .table(Entries::Table)
                    .if_not_exists()
                    .col(id_col(Entries::Id))
                    .col(
                        ColumnDef::new(Entries::CompetitionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Entries::Name).string().not_null())
                    .col(ColumnDef::new(Entries::BowStyle).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Entries::InitialHandicap)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Entries::CurrentHandicap)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Entries::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ts_col(Entries::CreatedAt))
                    .col(ts_col(Entries::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entries_competition_id")
                            .from(Entries::Table, Entries::CompetitionId)
                            .to(Competitions::Table, Competitions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // handicaps (reference data)
        manager
            .create_table(
                Table::create()
                    .table(Handicaps::Table)
                    .if_not_exists()
                    .col(id_col(Handicaps::Id))
                    .col(
                        ColumnDef::new(Handicaps::BowStyle)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Handicaps::Number).small_integer().not_null())
                    .col(
                        ColumnDef::new(Handicaps::MatchAllowance)
                            .integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_handicaps_bow_style_number")
                    .table(Handicaps::Table)
                    .col(Handicaps::BowStyle)
                    .col(Handicaps::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // match_results
        manager
            .create_table(
                Table::create()
                    .table(MatchResults::Table)
                    .if_not_exists()
                    .col(id_col(MatchResults::Id))
                    .col(
                        ColumnDef::new(MatchResults::RoundId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MatchResults::WinnerId).big_integer().null())
                    .col(
                        ColumnDef::new(MatchResults::NextMatchResultId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MatchResults::Format)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(ts_col(MatchResults::ShotAt))
                    .col(ts_col(MatchResults::CreatedAt))
                    .col(ts_col(MatchResults::UpdatedAt))
                    .col(tombstone_col(MatchResults::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_results_round_id")
                            .from(MatchResults::Table, MatchResults::RoundId)
                            .to(Rounds::Table, Rounds::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_results_winner_id")
                            .from(MatchResults::Table, MatchResults::WinnerId)
                            .to(Entries::Table, Entries::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_results_next_match_result_id")
                            .from(MatchResults::Table, MatchResults::NextMatchResultId)
                            .to(MatchResults::Table, MatchResults::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_match_results_round_shot_at")
                    .table(MatchResults::Table)
                    .col(MatchResults::RoundId)
                    .col(MatchResults::ShotAt)
                    .to_owned(),
            )
            .await?;

        // set_results
        manager
            .create_table(
                Table::create()
                    .table(SetResults::Table)
                    .if_not_exists()
                    .col(id_col(SetResults::Id))
                    .col(
                        ColumnDef::new(SetResults::MatchResultId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SetResults::WinnerId).big_integer().null())
                    .col(
                        ColumnDef::new(SetResults::Sequence)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ts_col(SetResults::CreatedAt))
                    .col(ts_col(SetResults::UpdatedAt))
                    .col(tombstone_col(SetResults::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_set_results_match_result_id")
                            .from(SetResults::Table, SetResults::MatchResultId)
                            .to(MatchResults::Table, MatchResults::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_set_results_winner_id")
                            .from(SetResults::Table, SetResults::WinnerId)
                            .to(Entries::Table, Entries::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // scores (polymorphic parent: result_type + result_id)
        manager
            .create_table(
                Table::create()
                    .table(Scores::Table)
                    .if_not_exists()
                    .col(id_col(Scores::Id))
                    .col(ColumnDef::new(Scores::ResultType).string_len(10).not_null())
                    .col(ColumnDef::new(Scores::ResultId).big_integer().not_null())
                    .col(ColumnDef::new(Scores::EntryId).big_integer().not_null())
                    .col(ColumnDef::new(Scores::Side).string_len(5).not_null())
                    .col(
                        ColumnDef::new(Scores::HandicapBefore)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Scores::HandicapAfter)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Scores::Allowance)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Scores::MatchPoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Scores::MatchPointsAdjusted)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Scores::BonusPoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Scores::LeaguePoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ts_col(Scores::CreatedAt))
                    .col(ts_col(Scores::UpdatedAt))
                    .col(tombstone_col(Scores::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scores_entry_id")
                            .from(Scores::Table, Scores::EntryId)
                            .to(Entries::Table, Entries::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_scores_result")
                    .table(Scores::Table)
                    .col(Scores::ResultType)
                    .col(Scores::ResultId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_scores_entry_id")
                    .table(Scores::Table)
                    .col(Scores::EntryId)
                    .to_owned(),
            )
            .await?;

        // match_pairings: one live pairing per stage, enforced by the store
        manager
            .create_table(
                Table::create()
                    .table(MatchPairings::Table)
                    .if_not_exists()
                    .col(id_col(MatchPairings::Id))
                    .col(
                        ColumnDef::new(MatchPairings::StageId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MatchPairings::LowEntryId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MatchPairings::HighEntryId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MatchPairings::MatchResultId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ts_col(MatchPairings::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_pairings_match_result_id")
                            .from(MatchPairings::Table, MatchPairings::MatchResultId)
                            .to(MatchResults::Table, MatchResults::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_match_pairings_stage_pair")
                    .table(MatchPairings::Table)
                    .col(MatchPairings::StageId)
                    .col(MatchPairings::LowEntryId)
                    .col(MatchPairings::HighEntryId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // standings
        manager
            .create_table(
                Table::create()
                    .table(Standings::Table)
                    .if_not_exists()
                    .col(id_col(Standings::Id))
                    .col(ColumnDef::new(Standings::StageId).big_integer().not_null())
                    .col(ColumnDef::new(Standings::EntryId).big_integer().not_null())
                    .col(ColumnDef::new(Standings::Played).integer().not_null().default(0))
                    .col(ColumnDef::new(Standings::Won).integer().not_null().default(0))
                    .col(ColumnDef::new(Standings::Drawn).integer().not_null().default(0))
                    .col(ColumnDef::new(Standings::Lost).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Standings::LeaguePoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Standings::BonusPoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Standings::TotalPoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Standings::MatchPointsAdjusted)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ts_col(Standings::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_standings_stage_id")
                            .from(Standings::Table, Standings::StageId)
                            .to(Stages::Table, Stages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_standings_entry_id")
                            .from(Standings::Table, Standings::EntryId)
                            .to(Entries::Table, Entries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_standings_stage_entry")
                    .table(Standings::Table)
                    .col(Standings::StageId)
                    .col(Standings::EntryId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse dependency order
        manager
            .drop_table(Table::drop().table(Standings::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(MatchPairings::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Scores::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SetResults::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(MatchResults::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Handicaps::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Entries::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rounds::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stages::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(Competitions::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
