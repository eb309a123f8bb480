use crate::{DbError, Result as DbErrorResult};

use sso_core::Uid;

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use sqlx::SqlitePool;
use uuid::Uuid;

/// How long an authorization request stays redeemable.
pub const STATE_TTL_SECS: i64 = 600;

/// A redeemed authorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingLogin {
    /// Logged-in user that started the flow; `None` for anonymous logins
    pub uid: Option<Uid>,
}

/// Single-use `state` values for the OAuth authorization redirect.
#[derive(Clone)]
pub struct OAuthStateRepository {
    pool: SqlitePool,
}

impl OAuthStateRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Issue a state bound to the session user (if any). Expired states are
    /// swept on the way.
    pub async fn issue(&self, uid: Option<Uid>) -> DbErrorResult<String> {
        let now = Utc::now().timestamp();
        let state = Uuid::new_v4().simple().to_string();

        sqlx::query("DELETE FROM oauth_states WHERE created_at < ?")
            .bind(now - STATE_TTL_SECS)
            .execute(&self.pool)
            .await?;

        sqlx::query("INSERT INTO oauth_states (state, uid, created_at) VALUES (?, ?, ?)")
            .bind(&state)
            .bind(uid.map(Uid::get))
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(state)
    }

    /// Redeem a state. Each value works once; unknown and expired values
    /// yield `None`.
    pub async fn consume(&self, state: &str) -> DbErrorResult<Option<PendingLogin>> {
        let row: Option<(Option<i64>, i64)> = sqlx::query_as(
            "DELETE FROM oauth_states WHERE state = ? RETURNING uid, created_at",
        )
        .bind(state)
        .fetch_optional(&self.pool)
        .await?;

        let Some((uid, created_at)) = row else {
            return Ok(None);
        };

        if Utc::now().timestamp() - created_at > STATE_TTL_SECS {
            log::debug!("Discarding expired OAuth state");
            return Ok(None);
        }

        let uid = uid
            .map(|value| {
                Uid::new(value).map_err(|e| DbError::InvalidRow {
                    message: format!("Invalid uid in oauth_states.uid: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })
            })
            .transpose()?;

        Ok(Some(PendingLogin { uid }))
    }
}
