use sea_orm_migration::prelude::*;

/// Creates the `releases` table; each release belongs to one game.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Releases {
    Table,
    Id,
    GameId,
    Title,
    Platform,
    Publisher,
    Version,
    ReleaseDate,
    Notes,
    EntryCreated,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
}

fn text_col(name: Releases, len: u32) -> ColumnDef {
    ColumnDef::new(name)
        .string_len(len)
        .not_null()
        .default("")
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Releases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Releases::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Releases::GameId).integer().not_null())
                    .col(&mut text_col(Releases::Title, 100))
                    .col(&mut text_col(Releases::Platform, 50))
                    .col(&mut text_col(Releases::Publisher, 100))
                    .col(&mut text_col(Releases::Version, 50))
                    .col(&mut text_col(Releases::ReleaseDate, 10))
                    .col(&mut text_col(Releases::Notes, 1000))
                    .col(
                        ColumnDef::new(Releases::EntryCreated)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Releases::LastUpdated)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_releases_game_id")
                            .from(Releases::Table, Releases::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_releases_game_id")
                    .table(Releases::Table)
                    .col(Releases::GameId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Releases::Table).to_owned())
            .await
    }
}
