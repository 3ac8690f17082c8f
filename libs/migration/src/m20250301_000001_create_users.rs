use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(create_users_table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await
    }
}

fn create_users_table() -> TableCreateStatement {
    Table::create()
        .table(Users::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Users::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Users::Email).text().unique_key())
        .col(ColumnDef::new(Users::Login).text().unique_key())
        .col(ColumnDef::new(Users::PasswordHash).text())
        .col(
            ColumnDef::new(Users::CreatedAt)
                .timestamp_with_time_zone()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    Email,
    Login,
    PasswordHash,
    CreatedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_table_has_unique_credentials() {
        let sql = create_users_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#""id" bigserial"#), "{sql}");
        assert!(sql.contains(r#""email" text"#), "{sql}");
        assert!(sql.contains(r#""login" text"#), "{sql}");
        assert_eq!(sql.matches("UNIQUE").count(), 2, "{sql}");
    }
}
