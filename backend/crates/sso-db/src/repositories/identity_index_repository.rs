use crate::{DbError, Result as DbErrorResult};

use sso_core::{IdentityIndex, StoreResult, Uid};

use std::panic::Location;

use async_trait::async_trait;
use chrono::Utc;
use error_location::ErrorLocation;
use sqlx::SqlitePool;

/// External id -> uid index, scoped to a single provider.
#[derive(Clone)]
pub struct IdentityIndexRepository {
    pool: SqlitePool,
    provider: String,
}

impl IdentityIndexRepository {
    pub fn new(pool: SqlitePool, provider: impl Into<String>) -> Self {
        Self {
            pool,
            provider: provider.into(),
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub async fn find_uid(&self, external_id: &str) -> DbErrorResult<Option<Uid>> {
        let uid: Option<i64> = sqlx::query_scalar(
            r#"
                SELECT uid FROM external_identities
                WHERE provider = ? AND external_id = ?
            "#,
        )
        .bind(&self.provider)
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await?;

        uid.map(|value| {
            Uid::new(value).map_err(|e| DbError::InvalidRow {
                message: format!("Invalid uid in external_identities.uid: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
        })
        .transpose()
    }

    /// Last writer wins.
    pub async fn upsert(&self, external_id: &str, uid: Uid) -> DbErrorResult<()> {
        let linked_at = Utc::now().timestamp();

        sqlx::query(
            r#"
                INSERT INTO external_identities (provider, external_id, uid, linked_at)
                VALUES (?, ?, ?, ?)
                ON CONFLICT(provider, external_id)
                DO UPDATE SET uid = excluded.uid, linked_at = excluded.linked_at
            "#,
        )
        .bind(&self.provider)
        .bind(external_id)
        .bind(uid.get())
        .bind(linked_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn remove(&self, external_id: &str) -> DbErrorResult<u64> {
        let result = sqlx::query(
            "DELETE FROM external_identities WHERE provider = ? AND external_id = ?",
        )
        .bind(&self.provider)
        .bind(external_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl IdentityIndex for IdentityIndexRepository {
    async fn get(&self, external_id: &str) -> StoreResult<Option<Uid>> {
        Ok(self.find_uid(external_id).await?)
    }

    async fn set(&self, external_id: &str, uid: Uid) -> StoreResult<()> {
        Ok(self.upsert(external_id, uid).await?)
    }

    async fn delete(&self, external_id: &str) -> StoreResult<()> {
        self.remove(external_id).await?;
        Ok(())
    }
}
