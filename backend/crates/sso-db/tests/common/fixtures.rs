use sso_core::{NewUser, Uid};
use sso_db::UserRepository;

use chrono::Utc;
use sqlx::SqlitePool;

pub const PROVIDER: &str = "github";

/// Creates a user through the repository and returns its uid
pub async fn create_test_user(pool: &SqlitePool, username: &str, email: &str) -> Uid {
    UserRepository::new(pool.clone())
        .create(&NewUser::new(username, email))
        .await
        .expect("Failed to create test user")
}

/// Simulate the host sending a confirmation email with `code`
pub async fn record_confirmation_sent(pool: &SqlitePool, uid: Uid, code: &str) {
    sqlx::query(
        r#"
            INSERT INTO email_confirmations (uid, code, sent_at)
            VALUES (?, ?, ?)
            ON CONFLICT(uid) DO UPDATE SET code = excluded.code, sent_at = excluded.sent_at
        "#,
    )
    .bind(uid.get())
    .bind(code)
    .bind(Utc::now().timestamp())
    .execute(pool)
    .await
    .expect("Failed to record confirmation");
}

/// Index entries pointing at `uid` for `provider`
pub async fn count_links(pool: &SqlitePool, provider: &str, uid: Uid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM external_identities WHERE provider = ? AND uid = ?")
        .bind(provider)
        .bind(uid.get())
        .fetch_one(pool)
        .await
        .expect("Failed to count links")
}
