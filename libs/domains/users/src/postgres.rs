use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbBackend, DbErr, FromQueryResult, SqlErr, Statement};

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UsersStorage;

/// PostgreSQL implementation of UsersStorage using SeaORM raw statements
#[derive(Clone)]
pub struct PgUsersStorage {
    db: DatabaseConnection,
}

impl PgUsersStorage {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Row as read from the `users` table; every column may come back NULL
#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: Option<i64>,
    email: Option<String>,
    login: Option<String>,
    password_hash: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id.map(|id| id.to_string()).unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            login: row.login.unwrap_or_default(),
            password_hash: row.password_hash.unwrap_or_default(),
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct IdRow {
    id: i64,
}

fn map_insert_error(err: DbErr, user: &User) -> UserError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => UserError::AlreadyExists {
            email: user.email.clone(),
            login: user.login.clone(),
        },
        _ => UserError::from(err),
    }
}

#[async_trait]
impl UsersStorage for PgUsersStorage {
    async fn exists(&self, user: &User) -> UserResult<bool> {
        let sql = "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 OR login = $2) AS exists";

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [user.email.clone().into(), user.login.clone().into()],
        );

        #[derive(FromQueryResult)]
        struct ExistsResult {
            exists: bool,
        }

        let result = ExistsResult::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| UserError::from(e).context("checking user existence"))?;

        Ok(result.map(|r| r.exists).unwrap_or(false))
    }

    async fn get(&self, login: &str) -> UserResult<User> {
        let sql = "SELECT id, email, login, password_hash FROM users WHERE login = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [login.into()]);

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| UserError::from(e).context("looking for user"))?
            .ok_or_else(|| UserError::NotFound(login.to_string()))?;

        Ok(row.into())
    }

    async fn add(&self, user: User) -> UserResult<String> {
        let sql = r#"
            INSERT INTO users (email, login, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                user.email.clone().into(),
                user.login.clone().into(),
                user.password_hash.clone().into(),
            ],
        );

        let rows = IdRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| map_insert_error(e, &user).context("inserting user"))?;

        let id = match rows.as_slice() {
            [row] => row.id.to_string(),
            rows => {
                return Err(UserError::Internal(format!(
                    "inserting user: expected exactly one returned id, got {}",
                    rows.len()
                )));
            }
        };

        tracing::info!(user_id = %id, "Stored user");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn user_row(
        id: Option<i64>,
        email: Option<&str>,
        login: Option<&str>,
        hash: Option<&str>,
    ) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("id", Value::BigInt(id)),
            ("email", Value::from(email.map(|s| s.to_string()))),
            ("login", Value::from(login.map(|s| s.to_string()))),
            ("password_hash", Value::from(hash.map(|s| s.to_string()))),
        ])
    }

    fn id_row(id: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("id", Value::BigInt(Some(id)))])
    }

    #[tokio::test]
    async fn test_get_maps_row_to_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_row(
                Some(7),
                Some("a@x.com"),
                Some("alice"),
                Some("$argon2id$hash"),
            )]])
            .into_connection();

        let user = PgUsersStorage::new(db).get("alice").await.unwrap();

        assert_eq!(user.id, "7");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.login, "alice");
        assert_eq!(user.password_hash, "$argon2id$hash");
    }

    #[tokio::test]
    async fn test_get_maps_null_columns_to_empty_values() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_row(Some(3), None, Some("bob"), None)]])
            .into_connection();

        let user = PgUsersStorage::new(db).get("bob").await.unwrap();

        assert_eq!(user.id, "3");
        assert_eq!(user.email, "");
        assert_eq!(user.password_hash, "");
    }

    #[tokio::test]
    async fn test_get_zero_rows_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();

        let result = PgUsersStorage::new(db).get("ghost").await;

        assert!(matches!(result, Err(UserError::NotFound(ref login)) if login == "ghost"));
    }

    #[tokio::test]
    async fn test_exists_reads_flag() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("exists", Value::Bool(Some(true)))])]])
            .into_connection();

        let user = User::new("a@x.com".into(), "alice".into(), String::new());
        assert!(PgUsersStorage::new(db).exists(&user).await.unwrap());
    }

    #[tokio::test]
    async fn test_add_returns_inserted_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![id_row(42)]])
            .into_connection();

        let user = User::new("a@x.com".into(), "alice".into(), "hash".into());
        let id = PgUsersStorage::new(db).add(user).await.unwrap();

        assert_eq!(id, "42");
    }

    #[tokio::test]
    async fn test_add_rejects_unexpected_row_count() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![id_row(1), id_row(2)]])
            .into_connection();

        let user = User::new("a@x.com".into(), "alice".into(), "hash".into());
        let result = PgUsersStorage::new(db).add(user).await;

        assert!(matches!(result, Err(UserError::Internal(ref msg)) if msg.contains("got 2")));
    }

    #[tokio::test]
    async fn test_add_wraps_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let user = User::new("a@x.com".into(), "alice".into(), "hash".into());
        let result = PgUsersStorage::new(db).add(user).await;

        match result {
            Err(UserError::Internal(msg)) => {
                assert!(msg.starts_with("inserting user"));
                assert!(msg.contains("connection reset"));
            }
            other => panic!("expected internal error, got {:?}", other),
        }
    }
}
