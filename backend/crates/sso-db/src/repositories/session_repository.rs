use crate::{DbError, Result as DbErrorResult};

use sso_core::Uid;

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Opaque login session tokens.
#[derive(Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Issue a fresh token for `uid`.
    pub async fn create(&self, uid: Uid) -> DbErrorResult<String> {
        let token = Uuid::new_v4().simple().to_string();

        sqlx::query("INSERT INTO sessions (token, uid, created_at) VALUES (?, ?, ?)")
            .bind(&token)
            .bind(uid.get())
            .bind(Utc::now().timestamp())
            .execute(&self.pool)
            .await?;

        Ok(token)
    }

    pub async fn find_uid(&self, token: &str) -> DbErrorResult<Option<Uid>> {
        let uid: Option<i64> = sqlx::query_scalar("SELECT uid FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        uid.map(|value| {
            Uid::new(value).map_err(|e| DbError::InvalidRow {
                message: format!("Invalid uid in sessions.uid: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
        })
        .transpose()
    }

    pub async fn delete(&self, token: &str) -> DbErrorResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
