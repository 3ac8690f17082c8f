use sea_orm_migration::prelude::*;

use crate::m20250301_000002_create_profiles::Profiles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Hobbies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Hobbies::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Hobbies::ProfileId).big_integer().not_null())
                    .col(ColumnDef::new(Hobbies::Title).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hobbies_profile_id")
                            .from(Hobbies::Table, Hobbies::ProfileId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_hobbies_profile_id")
                    .table(Hobbies::Table)
                    .col(Hobbies::ProfileId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Hobbies::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Hobbies {
    Table,
    Id,
    ProfileId,
    Title,
}
