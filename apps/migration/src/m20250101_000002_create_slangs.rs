use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Slangs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Slangs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Slangs::Term).string().not_null())
                    .col(ColumnDef::new(Slangs::Meaning).text().not_null())
                    .col(ColumnDef::new(Slangs::Example).text().null())
                    .col(ColumnDef::new(Slangs::AuthorId).uuid().not_null())
                    .col(
                        ColumnDef::new(Slangs::UpvotedBy)
                            .array(ColumnType::Uuid)
                            .not_null()
                            .default(Expr::cust("'{}'::uuid[]")),
                    )
                    .col(
                        ColumnDef::new(Slangs::DownvotedBy)
                            .array(ColumnType::Uuid)
                            .not_null()
                            .default(Expr::cust("'{}'::uuid[]")),
                    )
                    .col(
                        ColumnDef::new(Slangs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Slangs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // No foreign key on author_id: slangs outlive deleted users.
        // The index backs my-slangs and the leaderboard GROUP BY.
        manager
            .create_index(
                Index::create()
                    .name("idx_slangs_author_id")
                    .table(Slangs::Table)
                    .col(Slangs::AuthorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_slangs_created_at")
                    .table(Slangs::Table)
                    .col(Slangs::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Slangs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Slangs {
    Table,
    Id,
    Term,
    Meaning,
    Example,
    AuthorId,
    UpvotedBy,
    DownvotedBy,
    CreatedAt,
    UpdatedAt,
}
