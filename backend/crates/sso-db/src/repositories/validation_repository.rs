use crate::Result as DbErrorResult;

use sso_core::{StoreResult, Uid, ValidationRegistry};

use async_trait::async_trait;
use sqlx::SqlitePool;

/// Pending-validation set and outstanding email confirmation tokens.
#[derive(Clone)]
pub struct ValidationRepository {
    pool: SqlitePool,
}

impl ValidationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn is_pending(&self, uid: Uid) -> DbErrorResult<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users_not_validated WHERE uid = ?")
                .bind(uid.get())
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }

    pub async fn remove_from_pending(&self, uid: Uid) -> DbErrorResult<()> {
        sqlx::query("DELETE FROM users_not_validated WHERE uid = ?")
            .bind(uid.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn has_confirmation(&self, uid: Uid) -> DbErrorResult<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM email_confirmations WHERE uid = ?")
                .bind(uid.get())
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }

    pub async fn delete_confirmation(&self, uid: Uid) -> DbErrorResult<()> {
        sqlx::query("DELETE FROM email_confirmations WHERE uid = ?")
            .bind(uid.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl ValidationRegistry for ValidationRepository {
    async fn remove_pending(&self, uid: Uid) -> StoreResult<()> {
        Ok(self.remove_from_pending(uid).await?)
    }

    async fn clear_email_confirmation(&self, uid: Uid) -> StoreResult<()> {
        Ok(self.delete_confirmation(uid).await?)
    }
}
