use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum MatchSnapshots {
    Table,
    MatchId,
    Snapshot,
    Version,
    UpdatedAt,
}

#[derive(Iden)]
enum SeatHands {
    Table,
    MatchId,
    Seat,
    Cards,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // match_snapshots: authoritative state, one row per match
        manager
            .create_table(
                Table::create()
                    .table(MatchSnapshots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MatchSnapshots::MatchId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MatchSnapshots::Snapshot).text().not_null())
                    .col(
                        ColumnDef::new(MatchSnapshots::Version)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MatchSnapshots::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // seat_hands: best-effort per-seat copy for clients, never read back as state
        manager
            .create_table(
                Table::create()
                    .table(SeatHands::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SeatHands::MatchId).big_integer().not_null())
                    .col(ColumnDef::new(SeatHands::Seat).small_integer().not_null())
                    .col(ColumnDef::new(SeatHands::Cards).text().not_null())
                    .col(
                        ColumnDef::new(SeatHands::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_seat_hands")
                            .col(SeatHands::MatchId)
                            .col(SeatHands::Seat),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SeatHands::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(MatchSnapshots::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
