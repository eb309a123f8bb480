//! Administrator settings stored as key/value rows under a plugin namespace.

use crate::Result as DbErrorResult;

use sso_core::{SettingsStore, SsoSettings, StoreResult};

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::SqlitePool;

const KEY_CLIENT_ID: &str = "client_id";
const KEY_CLIENT_SECRET: &str = "client_secret";
const KEY_DISABLE_REGISTRATION: &str = "disable_registration";
const TOGGLE_ON: &str = "on";
const TOGGLE_OFF: &str = "off";

#[derive(Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
    namespace: String,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool, namespace: impl Into<String>) -> Self {
        Self {
            pool,
            namespace: namespace.into(),
        }
    }

    pub async fn get_all(&self) -> DbErrorResult<HashMap<String, String>> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT key, value FROM settings WHERE namespace = ?")
                .bind(&self.namespace)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().collect())
    }

    pub async fn set(&self, key: &str, value: &str) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO settings (namespace, key, value) VALUES (?, ?, ?)
                ON CONFLICT(namespace, key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(&self.namespace)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn remove(&self, key: &str) -> DbErrorResult<()> {
        sqlx::query("DELETE FROM settings WHERE namespace = ? AND key = ?")
            .bind(&self.namespace)
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn set_optional(&self, key: &str, value: Option<&str>) -> DbErrorResult<()> {
        match value {
            Some(v) if !v.is_empty() => self.set(key, v).await,
            _ => self.remove(key).await,
        }
    }
}

#[async_trait]
impl SettingsStore for SettingsRepository {
    async fn load(&self) -> StoreResult<SsoSettings> {
        let mut values = self.get_all().await?;

        Ok(SsoSettings {
            client_id: values.remove(KEY_CLIENT_ID),
            client_secret: values.remove(KEY_CLIENT_SECRET),
            disable_registration: values
                .get(KEY_DISABLE_REGISTRATION)
                .is_some_and(|v| v == TOGGLE_ON),
        })
    }

    async fn save(&self, settings: &SsoSettings) -> StoreResult<()> {
        self.set_optional(KEY_CLIENT_ID, settings.client_id.as_deref())
            .await?;
        self.set_optional(KEY_CLIENT_SECRET, settings.client_secret.as_deref())
            .await?;
        self.set(
            KEY_DISABLE_REGISTRATION,
            if settings.disable_registration {
                TOGGLE_ON
            } else {
                TOGGLE_OFF
            },
        )
        .await?;

        Ok(())
    }

    async fn registration_disabled(&self) -> StoreResult<bool> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM settings WHERE namespace = ? AND key = ?")
                .bind(&self.namespace)
                .bind(KEY_DISABLE_REGISTRATION)
                .fetch_optional(&self.pool)
                .await
                .map_err(crate::DbError::from)?;

        Ok(value.as_deref() == Some(TOGGLE_ON))
    }
}
