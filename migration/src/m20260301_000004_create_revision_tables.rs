use sea_orm_migration::prelude::*;

/// Creates the append-only `game_revisions` and `release_revisions` tables.
///
/// Every revisioned field gets a nullable column; NULL means the field was
/// left untouched by that revision.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum GameRevisions {
    Table,
    Id,
    RelationId,
    UserId,
    TimeStamp,
    Message,
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
}

#[derive(DeriveIden)]
enum ReleaseRevisions {
    Table,
    Id,
    RelationId,
    UserId,
    TimeStamp,
    Message,
    Title,
    Platform,
    Publisher,
    Version,
    ReleaseDate,
    Notes,
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Releases {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

fn id_col<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn changed_text<T: IntoIden>(name: T, len: u32) -> ColumnDef {
    ColumnDef::new(name).string_len(len).null().to_owned()
}

#[async_trait::async_trait]
#[allow(clippy::too_many_lines)]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameRevisions::Table)
                    .if_not_exists()
                    .col(&mut id_col(GameRevisions::Id))
                    .col(ColumnDef::new(GameRevisions::RelationId).integer().not_null())
                    .col(ColumnDef::new(GameRevisions::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(GameRevisions::TimeStamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameRevisions::Message).string_len(310).not_null())
                    .col(&mut changed_text(GameRevisions::TitleJp, 100))
                    .col(&mut changed_text(GameRevisions::TitleRomaji, 100))
                    .col(&mut changed_text(GameRevisions::TitleEnglish, 100))
                    .col(
                        ColumnDef::new(GameRevisions::TitleEnglishOfficial)
                            .boolean()
                            .null(),
                    )
                    .col(&mut changed_text(GameRevisions::TitleOther, 100))
                    .col(ColumnDef::new(GameRevisions::Description).text().null())
                    .col(&mut changed_text(GameRevisions::Website, 100))
                    .col(&mut changed_text(GameRevisions::Vndb, 25))
                    .col(&mut changed_text(GameRevisions::Download, 200))
                    .col(&mut changed_text(GameRevisions::DownloadAlt, 200))
                    .col(&mut changed_text(GameRevisions::Screenshots, 1100))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_revisions_relation_id")
                            .from(GameRevisions::Table, GameRevisions::RelationId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_revisions_user_id")
                            .from(GameRevisions::Table, GameRevisions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_revisions_relation_id")
                    .table(GameRevisions::Table)
                    .col(GameRevisions::RelationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReleaseRevisions::Table)
                    .if_not_exists()
                    .col(&mut id_col(ReleaseRevisions::Id))
                    .col(
                        ColumnDef::new(ReleaseRevisions::RelationId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ReleaseRevisions::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(ReleaseRevisions::TimeStamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReleaseRevisions::Message)
                            .string_len(310)
                            .not_null(),
                    )
                    .col(&mut changed_text(ReleaseRevisions::Title, 100))
                    .col(&mut changed_text(ReleaseRevisions::Platform, 50))
                    .col(&mut changed_text(ReleaseRevisions::Publisher, 100))
                    .col(&mut changed_text(ReleaseRevisions::Version, 50))
                    .col(&mut changed_text(ReleaseRevisions::ReleaseDate, 10))
                    .col(&mut changed_text(ReleaseRevisions::Notes, 1000))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_release_revisions_relation_id")
                            .from(ReleaseRevisions::Table, ReleaseRevisions::RelationId)
                            .to(Releases::Table, Releases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_release_revisions_user_id")
                            .from(ReleaseRevisions::Table, ReleaseRevisions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_release_revisions_relation_id")
                    .table(ReleaseRevisions::Table)
                    .col(ReleaseRevisions::RelationId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReleaseRevisions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(GameRevisions::Table).to_owned())
            .await
    }
}
