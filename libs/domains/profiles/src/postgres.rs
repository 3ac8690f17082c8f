use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement};
use std::collections::HashMap;

use crate::error::{ProfileError, ProfileResult};
use crate::models::{Hobby, Profile, SearchParams, Sex};
use crate::repository::ProfilesStorage;

const PROFILE_COLUMNS: &str = "id, user_id, name, surname, sex, age, address";

/// PostgreSQL implementation of ProfilesStorage using SeaORM raw statements
#[derive(Clone)]
pub struct PgProfilesStorage {
    db: DatabaseConnection,
}

impl PgProfilesStorage {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Row as read from the `profiles` table; any column may come back NULL
#[derive(Debug, FromQueryResult)]
struct ProfileRow {
    id: Option<i64>,
    user_id: Option<i64>,
    name: Option<String>,
    surname: Option<String>,
    sex: Option<String>,
    age: Option<i16>,
    address: Option<String>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = ProfileError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let id = row
            .id
            .ok_or_else(|| ProfileError::Internal("profile row without id".to_string()))?;
        let sex = Sex::parse(row.sex.as_deref().unwrap_or_default())?;

        let age = row.age.unwrap_or_default();
        let age = u8::try_from(age).map_err(|_| {
            ProfileError::Parse(format!("age {} of profile '{}' is out of range", age, id))
        })?;

        Ok(Profile {
            id: id.to_string(),
            user_id: row.user_id.map(|id| id.to_string()).unwrap_or_default(),
            name: row.name.unwrap_or_default(),
            surname: row.surname.unwrap_or_default(),
            sex,
            age,
            address: row.address.unwrap_or_default(),
            hobbies: Vec::new(),
        })
    }
}

#[derive(Debug, FromQueryResult)]
struct HobbyRow {
    profile_id: i64,
    title: Option<String>,
}

impl From<HobbyRow> for Hobby {
    fn from(row: HobbyRow) -> Self {
        Hobby {
            title: row.title.unwrap_or_default(),
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct IdRow {
    id: i64,
}

/// Escapes LIKE wildcards so the value only ever matches as a literal prefix
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl PgProfilesStorage {
    async fn query_profiles(&self, stmt: Statement) -> ProfileResult<Vec<ProfileRow>> {
        Ok(ProfileRow::find_by_statement(stmt).all(&self.db).await?)
    }

    async fn hobbies_of(&self, profile_id: i64) -> ProfileResult<Vec<Hobby>> {
        let sql = "SELECT profile_id, title FROM hobbies WHERE profile_id = $1 ORDER BY id";
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [profile_id.into()]);

        let rows = HobbyRow::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows.into_iter().map(Hobby::from).collect())
    }

    /// Loads hobbies for all rows in one query and attaches them
    async fn with_hobbies(&self, rows: Vec<ProfileRow>) -> ProfileResult<Vec<Profile>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().filter_map(|row| row.id).collect();
        let sql = r#"
            SELECT profile_id, title
            FROM hobbies
            WHERE profile_id = ANY($1)
            ORDER BY profile_id, id
        "#;
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [ids.into()]);

        let mut hobbies: HashMap<i64, Vec<Hobby>> = HashMap::new();
        for row in HobbyRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| ProfileError::from(e).context("loading hobbies"))?
        {
            hobbies.entry(row.profile_id).or_default().push(row.into());
        }

        rows.into_iter()
            .map(|row| {
                let key = row.id;
                let mut profile =
                    Profile::try_from(row).map_err(|e| e.context("converting profile row"))?;
                profile.hobbies = key.and_then(|k| hobbies.remove(&k)).unwrap_or_default();
                Ok(profile)
            })
            .collect()
    }
}

#[async_trait]
impl ProfilesStorage for PgProfilesStorage {
    async fn get_all(&self) -> ProfileResult<Vec<Profile>> {
        let sql = format!("SELECT {} FROM profiles ORDER BY id", PROFILE_COLUMNS);
        let stmt = Statement::from_string(DbBackend::Postgres, sql);

        let rows = self
            .query_profiles(stmt)
            .await
            .map_err(|e| e.context("getting all profiles"))?;

        self.with_hobbies(rows)
            .await
            .map_err(|e| e.context("getting all profiles"))
    }

    async fn get(&self, id: &str) -> ProfileResult<Profile> {
        // Keys are BIGSERIAL rendered in decimal; "01" or "+1" name no stored profile
        let key = match id.parse::<i64>() {
            Ok(key) if key.to_string() == id => key,
            _ => return Err(ProfileError::NotFound(id.to_string())),
        };

        let sql = format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS);
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [key.into()]);

        let row = self
            .query_profiles(stmt)
            .await
            .map_err(|e| e.context(format!("getting profile '{}'", id)))?
            .into_iter()
            .next()
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))?;

        let mut profile =
            Profile::try_from(row).map_err(|e| e.context(format!("converting profile '{}'", id)))?;
        profile.hobbies = self
            .hobbies_of(key)
            .await
            .map_err(|e| e.context(format!("loading hobbies of profile '{}'", id)))?;

        Ok(profile)
    }

    async fn search(&self, params: &SearchParams) -> ProfileResult<Vec<Profile>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM profiles
            WHERE name LIKE $1 ESCAPE '\' AND surname LIKE $2 ESCAPE '\'
            ORDER BY id
            "#,
            PROFILE_COLUMNS
        );
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                like_prefix(&params.name_prefix).into(),
                like_prefix(&params.surname_prefix).into(),
            ],
        );

        let rows = self
            .query_profiles(stmt)
            .await
            .map_err(|e| e.context("searching profiles"))?;

        if rows.is_empty() {
            return Err(ProfileError::NotFound(format!(
                "name '{}*', surname '{}*'",
                params.name_prefix, params.surname_prefix
            )));
        }

        self.with_hobbies(rows)
            .await
            .map_err(|e| e.context("searching profiles"))
    }

    async fn add(&self, profile: Profile) -> ProfileResult<String> {
        let user_id: i64 = profile
            .user_id
            .parse()
            .map_err(|_| ProfileError::Parse(format!("illegal user id '{}'", profile.user_id)))?;

        // Profile and hobbies go in as one statement so a profile is never stored half-written
        let sql = r#"
            WITH new_profile AS (
                INSERT INTO profiles (user_id, name, surname, sex, age, address)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id
            ), new_hobbies AS (
                INSERT INTO hobbies (profile_id, title)
                SELECT new_profile.id, h.title
                FROM new_profile, unnest($7::text[]) WITH ORDINALITY AS h(title, ord)
                ORDER BY h.ord
            )
            SELECT id FROM new_profile
        "#;

        let titles: Vec<String> = profile.hobbies.into_iter().map(|h| h.title).collect();

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                user_id.into(),
                profile.name.into(),
                profile.surname.into(),
                profile.sex.to_string().into(),
                i16::from(profile.age).into(),
                profile.address.into(),
                titles.into(),
            ],
        );

        let rows = IdRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| ProfileError::from(e).context("inserting profile"))?;

        let id = match rows.as_slice() {
            [row] => row.id.to_string(),
            rows => {
                return Err(ProfileError::Internal(format!(
                    "inserting profile: expected exactly one returned id, got {}",
                    rows.len()
                )));
            }
        };

        tracing::info!(profile_id = %id, user_id = %user_id, "Stored profile");
        Ok(id)
    }
}
