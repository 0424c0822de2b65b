use sea_orm_migration::prelude::*;

/// Creates the `games` table for catalogue entries.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
    TitleJp,
    TitleRomaji,
    TitleEnglish,
    TitleEnglishOfficial,
    TitleOther,
    Description,
    Website,
    Vndb,
    Download,
    DownloadAlt,
    Screenshots,
    EntryCreated,
    LastUpdated,
}

/// Text column that defaults to the empty string.
fn text_col(name: Games, len: u32) -> ColumnDef {
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
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(&mut text_col(Games::TitleJp, 100))
                    .col(&mut text_col(Games::TitleRomaji, 100))
                    .col(&mut text_col(Games::TitleEnglish, 100))
                    .col(
                        ColumnDef::new(Games::TitleEnglishOfficial)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(&mut text_col(Games::TitleOther, 100))
                    .col(
                        ColumnDef::new(Games::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(&mut text_col(Games::Website, 100))
                    .col(&mut text_col(Games::Vndb, 25))
                    .col(&mut text_col(Games::Download, 200))
                    .col(&mut text_col(Games::DownloadAlt, 200))
                    .col(&mut text_col(Games::Screenshots, 1100))
                    .col(
                        ColumnDef::new(Games::EntryCreated)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::LastUpdated)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}
