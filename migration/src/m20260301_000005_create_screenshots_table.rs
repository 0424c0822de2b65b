use sea_orm_migration::prelude::*;

/// Creates the `screenshots` table. Rows are disabled rather than deleted.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Screenshots {
    Table,
    Id,
    Url,
    GameId,
    Enabled,
    TimeStamp,
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Screenshots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Screenshots::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        // As long as the whole screenshot box, which one URL may fill.
                        ColumnDef::new(Screenshots::Url)
                            .string_len(1100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Screenshots::GameId).integer().not_null())
                    .col(
                        ColumnDef::new(Screenshots::Enabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Screenshots::TimeStamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_screenshots_game_id")
                            .from(Screenshots::Table, Screenshots::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Screenshots::Table).to_owned())
            .await
    }
}
