use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_properties_created_at")
                    .table(Properties::Table)
                    .col(Properties::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_marla_size")
                    .table(Properties::Table)
                    .col(Properties::MarlaSize)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_consultations_submitted_at")
                    .table(Consultations::Table)
                    .col(Consultations::SubmittedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_consultations_submitted_at")
                    .table(Consultations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_properties_marla_size")
                    .table(Properties::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_properties_created_at")
                    .table(Properties::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    CreatedAt,
    MarlaSize,
}

#[derive(DeriveIden)]
enum Consultations {
    Table,
    SubmittedAt,
}
