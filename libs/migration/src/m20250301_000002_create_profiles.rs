use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(create_profiles_table()).await?;

        // Prefix search on name/surname
        manager
            .create_index(
                Index::create()
                    .name("idx_profiles_name_surname")
                    .table(Profiles::Table)
                    .col(Profiles::Name)
                    .col(Profiles::Surname)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_profiles_user_id")
                    .table(Profiles::Table)
                    .col(Profiles::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profiles::Table).if_exists().to_owned())
            .await
    }
}

fn create_profiles_table() -> TableCreateStatement {
    Table::create()
        .table(Profiles::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Profiles::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Profiles::UserId).big_integer().not_null())
        .col(ColumnDef::new(Profiles::Name).text())
        .col(ColumnDef::new(Profiles::Surname).text())
        .col(ColumnDef::new(Profiles::Sex).text())
        .col(ColumnDef::new(Profiles::Age).small_integer())
        .col(ColumnDef::new(Profiles::Address).text())
        .col(
            ColumnDef::new(Profiles::CreatedAt)
                .timestamp_with_time_zone()
                .default(Expr::current_timestamp()),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_profiles_user_id")
                .from(Profiles::Table, Profiles::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[derive(DeriveIden)]
pub enum Profiles {
    Table,
    Id,
    UserId,
    Name,
    Surname,
    Sex,
    Age,
    Address,
    CreatedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_reference_users_with_cascade() {
        let sql = create_profiles_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#""age" smallint"#), "{sql}");
        assert!(sql.contains(r#"REFERENCES "users" ("id")"#), "{sql}");
        assert!(sql.contains("ON DELETE CASCADE"), "{sql}");
    }
}
