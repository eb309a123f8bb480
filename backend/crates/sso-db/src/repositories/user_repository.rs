//! User records, addressed field by field.
//!
//! Column names are never taken from callers: every dynamic statement is built
//! from [`UserField::as_str`], which only yields fixed identifiers.

use crate::{DbError, Result as DbErrorResult};

use sso_core::{LocalUser, NewUser, StoreResult, Uid, UserField, UserFields, UserStore};

use std::panic::Location;

use async_trait::async_trait;
use chrono::Utc;
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the account and mark it as awaiting email validation.
    pub async fn create(&self, user: &NewUser) -> DbErrorResult<Uid> {
        let now = Utc::now().timestamp();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
                INSERT INTO users (username, email, email_confirmed, created_at)
                VALUES (?, ?, 0, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::from_write(e, "email", &user.email))?;

        let uid = to_uid(result.last_insert_rowid())?;

        sqlx::query("INSERT INTO users_not_validated (uid, created_at) VALUES (?, ?)")
            .bind(uid.get())
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(uid)
    }

    pub async fn find_by_uid(&self, uid: Uid) -> DbErrorResult<Option<LocalUser>> {
        let row = sqlx::query(
            r#"
                SELECT uid, username, email, email_confirmed, fullname,
                    picture, uploaded_picture, external_id
                FROM users
                WHERE uid = ?
            "#,
        )
        .bind(uid.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_user(&r)).transpose()
    }

    pub async fn find_uid_by_email(&self, email: &str) -> DbErrorResult<Option<Uid>> {
        let uid: Option<i64> = sqlx::query_scalar("SELECT uid FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        uid.map(to_uid).transpose()
    }

    pub async fn get_field(&self, uid: Uid, field: UserField) -> DbErrorResult<Option<String>> {
        let sql = format!(
            "SELECT CAST({} AS TEXT) FROM users WHERE uid = ?",
            field.as_str()
        );

        let value: Option<Option<String>> = sqlx::query_scalar(&sql)
            .bind(uid.get())
            .fetch_optional(&self.pool)
            .await?;

        Ok(value.flatten().filter(|v| !v.is_empty()))
    }

    pub async fn get_fields(&self, uid: Uid, fields: &[UserField]) -> DbErrorResult<UserFields> {
        if fields.is_empty() {
            return Ok(UserFields::new());
        }

        let columns = fields
            .iter()
            .map(|f| format!("CAST({} AS TEXT)", f.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("SELECT {} FROM users WHERE uid = ?", columns);

        let Some(row) = sqlx::query(&sql)
            .bind(uid.get())
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(UserFields::new());
        };

        fields
            .iter()
            .enumerate()
            .map(|(i, field)| -> DbErrorResult<_> {
                Ok((*field, row.try_get::<Option<String>, _>(i)?))
            })
            .collect()
    }

    pub async fn set_field(&self, uid: Uid, field: UserField, value: &str) -> DbErrorResult<()> {
        let sql = format!("UPDATE users SET {} = ? WHERE uid = ?", field.as_str());

        let result = sqlx::query(&sql)
            .bind(value)
            .bind(uid.get())
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::from_write(e, field.as_str(), value))?;

        if result.rows_affected() == 0 {
            return Err(DbError::UserNotFound {
                uid,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Clear a field. Clearing on an unknown user is a no-op.
    pub async fn clear_field(&self, uid: Uid, field: UserField) -> DbErrorResult<()> {
        if !field.is_nullable() {
            return Err(DbError::InvalidRow {
                message: format!("users.{} cannot be cleared", field),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let sql = format!("UPDATE users SET {} = NULL WHERE uid = ?", field.as_str());
        sqlx::query(&sql).bind(uid.get()).execute(&self.pool).await?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create_user(&self, user: &NewUser) -> StoreResult<Uid> {
        Ok(self.create(user).await?)
    }

    async fn user_field(&self, uid: Uid, field: UserField) -> StoreResult<Option<String>> {
        Ok(self.get_field(uid, field).await?)
    }

    async fn user_fields(&self, uid: Uid, fields: &[UserField]) -> StoreResult<UserFields> {
        Ok(self.get_fields(uid, fields).await?)
    }

    async fn set_user_field(&self, uid: Uid, field: UserField, value: &str) -> StoreResult<()> {
        Ok(self.set_field(uid, field, value).await?)
    }

    async fn delete_user_field(&self, uid: Uid, field: UserField) -> StoreResult<()> {
        Ok(self.clear_field(uid, field).await?)
    }

    async fn uid_by_email(&self, email: &str) -> StoreResult<Option<Uid>> {
        Ok(self.find_uid_by_email(email).await?)
    }
}

#[track_caller]
fn to_uid(value: i64) -> DbErrorResult<Uid> {
    Uid::new(value).map_err(|e| DbError::InvalidRow {
        message: format!("Invalid uid in users.uid: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}

fn map_user(r: &SqliteRow) -> DbErrorResult<LocalUser> {
    Ok(LocalUser {
        uid: to_uid(r.try_get("uid")?)?,
        username: r.try_get("username")?,
        email: r.try_get("email")?,
        email_confirmed: r.try_get::<i64, _>("email_confirmed")? != 0,
        fullname: r.try_get("fullname")?,
        picture: r.try_get("picture")?,
        uploaded_picture: r.try_get("uploaded_picture")?,
        external_id: r.try_get("external_id")?,
    })
}
